//! Sweep command implementation.

use crate::cli::Cli;
use crate::error::add_sweep_context;
use crate::output::OutputFormatter;
use crate::progress::SweepStatus;
use anyhow::Context;
use anyhow::Result;
use std::path::PathBuf;
use zipsweep_core::BatchSummary;
use zipsweep_core::CancelFlag;
use zipsweep_core::NoopSink;
use zipsweep_core::ProgressLedger;
use zipsweep_core::StatusSink;
use zipsweep_core::SweepConfig;
use zipsweep_core::sweep_directory;

/// Default ledger file name, created inside the scan root.
const LEDGER_FILE_NAME: &str = "zipsweep_progress.json";

pub fn execute(args: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let ledger_path = ledger_path(args);
    let mut ledger = ProgressLedger::load(&ledger_path);

    if args.clear_progress {
        ledger
            .clear()
            .context("failed to clear progress ledger")?;
        formatter.format_success("Progress ledger cleared");
        return Ok(());
    }

    let config = SweepConfig {
        parallel: !args.sequential,
        max_workers: args.workers.map(|n| n as usize),
        inner_streams: args.inner_streams as usize,
        ..Default::default()
    };

    // Cancellation is cooperative; the flag is threaded through so an
    // embedding surface (or a future signal handler) can stop the run.
    let cancel = CancelFlag::new();

    // Use a live status line if a TTY is attached (not quiet, not JSON)
    let summary = if SweepStatus::should_show() && !args.quiet && !args.json {
        let status = SweepStatus::new();
        run(args, &mut ledger, &cancel, &config, &status)?
    } else {
        run(args, &mut ledger, &cancel, &config, &NoopSink)?
    };

    formatter.format_sweep_summary(&summary)?;
    Ok(())
}

fn run(
    args: &Cli,
    ledger: &mut ProgressLedger,
    cancel: &CancelFlag,
    config: &SweepConfig,
    status: &dyn StatusSink,
) -> Result<BatchSummary> {
    add_sweep_context(
        sweep_directory(&args.directory, ledger, cancel, status, config),
        &args.directory,
    )
}

fn ledger_path(args: &Cli) -> PathBuf {
    args.ledger
        .clone()
        .unwrap_or_else(|| args.directory.join(LEDGER_FILE_NAME))
}
