//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan recursively for zip archives
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Worker threads for the outer pool (default: min of CPU count and 8)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// Concurrent streams within each bulky archive
    #[arg(long, value_name = "N", default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    pub inner_streams: u32,

    /// Extract archives one at a time instead of using a worker pool
    #[arg(long)]
    pub sequential: bool,

    /// Progress ledger file (default: <DIRECTORY>/zipsweep_progress.json)
    #[arg(long, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Reset the progress ledger and exit
    #[arg(long)]
    pub clear_progress: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}
