//! Top-level sweep entry point.

use std::path::Path;
use tracing::info;

use crate::CancelFlag;
use crate::Result;
use crate::StatusSink;
use crate::SweepConfig;
use crate::ledger::ProgressLedger;
use crate::scheduler;
use crate::scheduler::BatchSummary;
use crate::walk;

/// Sweeps `root` for zip archives and extracts each one in place.
///
/// Composes discovery, scheduling, and ledger reconciliation: every
/// archive found under `root` that the ledger has not already seen is
/// extracted to a sibling directory and then deleted.
///
/// # Errors
///
/// Only an unusable scan root aborts the run. Per-archive failures are
/// absorbed into the returned [`BatchSummary`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipsweep_core::CancelFlag;
/// use zipsweep_core::NoopSink;
/// use zipsweep_core::ProgressLedger;
/// use zipsweep_core::SweepConfig;
/// use zipsweep_core::sweep_directory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut ledger = ProgressLedger::load("zipsweep_progress.json");
/// let summary = sweep_directory(
///     Path::new("/data/incoming"),
///     &mut ledger,
///     &CancelFlag::new(),
///     &NoopSink,
///     &SweepConfig::default(),
/// )?;
/// println!("extracted {}/{}", summary.succeeded, summary.processed);
/// # Ok(())
/// # }
/// ```
pub fn sweep_directory(
    root: &Path,
    ledger: &mut ProgressLedger,
    cancel: &CancelFlag,
    status: &dyn StatusSink,
    config: &SweepConfig,
) -> Result<BatchSummary> {
    info!(root = %root.display(), "scanning directory");
    status.status("Scanning for zip archives...");

    let archives = walk::discover_archives(root)?;
    if archives.is_empty() {
        info!("no zip archives found");
        return Ok(BatchSummary::default());
    }
    info!(found = archives.len(), "archives discovered");

    Ok(scheduler::run(&archives, ledger, cancel, status, config))
}
