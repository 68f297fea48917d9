//! Zipsweep CLI - recursively extracts zip archives in place, with
//! resume support across runs.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(&cli);

    let formatter = output::create_formatter(cli.json, cli.quiet);
    commands::sweep::execute(&cli, &*formatter)
}

fn init_tracing(cli: &cli::Cli) {
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already set, skipping re-initialization");
    }
}
