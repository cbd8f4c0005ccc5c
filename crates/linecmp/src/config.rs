//! Configuration file support
//!
//! Settings live in `<config dir>/linecmp/config.toml`:
//!
//! ```toml
//! [compare]
//! context = 5
//!
//! [output]
//! labels = false
//! lineno = false
//! json = false
//! ```
//!
//! Every key is optional. Command-line flags take precedence.

use crate::cli::Cli;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub compare: CompareConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Matching lines shown before a mismatch
    pub context: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self { context: 5 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub labels: bool,
    pub lineno: bool,
    pub json: bool,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linecmp").join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load an explicitly named file, or the default one if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Effective settings after layering flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub context: usize,
    pub labels: bool,
    pub lineno: bool,
    pub json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            context: cli.prev.unwrap_or(config.compare.context),
            labels: cli.labels || config.output.labels,
            lineno: cli.lineno || config.output.lineno,
            json: cli.json || config.output.json,
        }
    }
}
