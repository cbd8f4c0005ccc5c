//! linecmp - report where two logs first diverge

mod cli;
mod config;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Cli;
use config::{Config, Settings};
use linecmp_core::{ErrorKind, LineComparator, SourceError, SourceSpec, Verdict};
use render::RenderOptions;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status when either log could not be compared
const EXIT_ERROR: u8 = 2;

fn init_tracing() {
    // stdout carries the report, so diagnostics go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<Verdict> {
    let config = if cli.no_config {
        Config::default()
    } else {
        Config::load(cli.config.as_deref())?
    };
    let settings = Settings::resolve(&cli, &config);
    debug!(?settings, "resolved settings");

    let spec1: SourceSpec = cli.log1.parse()?;
    let spec2: SourceSpec = cli.log2.parse()?;
    if spec1.is_stdin() && spec2.is_stdin() {
        bail!("only one log can be read from stdin");
    }

    let left = linecmp_core::open(&spec1)?;
    let right = linecmp_core::open(&spec2)?;

    let verdict = LineComparator::new()
        .with_context(settings.context)
        .compare(left, right)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if settings.json {
        render::write_json(&mut out, &verdict)
    } else {
        let opts = RenderOptions {
            labels: settings.labels,
            lineno: settings.lineno,
        };
        render::write_verdict(&mut out, &verdict, opts)
    };
    written
        .and_then(|()| out.flush())
        .context("failed to write report")?;

    Ok(verdict)
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(verdict) if verdict.is_match() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            let prefix = match err.downcast_ref::<SourceError>().map(SourceError::kind) {
                Some(ErrorKind::Configuration) => "configuration error: ",
                _ => "",
            };
            eprintln!("linecmp: {prefix}{err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
