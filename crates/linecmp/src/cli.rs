//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linecmp",
    version,
    about = "Report the first line where two logs diverge",
    long_about = "Compare two line-oriented logs and stop at the first differing line.\n\
                  Each log is given as `path` or `path:skip`, where `skip` leading lines\n\
                  are discarded first. Paths ending in `.gz` are decompressed, `-` reads stdin."
)]
pub struct Cli {
    /// First log (`path[:skip]`)
    #[arg(value_name = "LOG1")]
    pub log1: String,

    /// Second log (`path[:skip]`)
    #[arg(value_name = "LOG2")]
    pub log2: String,

    /// Number of previous lines to show [default: 5]
    #[arg(short = 'p', long = "prev", visible_alias = "context", value_name = "N")]
    pub prev: Option<usize>,

    /// Print the mismatching line number in LOG2 last (0 on a full match)
    #[arg(short = 'n', long)]
    pub lineno: bool,

    /// Label mismatching lines with their source and line number
    #[arg(short = 'l', long)]
    pub labels: bool,

    /// Emit the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore any configuration file
    #[arg(long)]
    pub no_config: bool,
}
