//! Batch orchestration of extraction jobs across a worker pool.
//!
//! The scheduler owns the run: it filters out already-processed
//! archives, classifies the rest, dispatches jobs to a pool of worker
//! threads (or processes them inline when pooling is disabled or
//! pointless), and reconciles every result back into the progress
//! ledger. Workers share no mutable state with each other; results flow
//! back over a channel and only the scheduling thread touches the
//! ledger.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::CancelFlag;
use crate::Result;
use crate::StatusSink;
use crate::SweepConfig;
use crate::SweepError;
use crate::analyzer;
use crate::analyzer::ArchiveProfile;
use crate::extractor;
use crate::extractor::ExtractionJob;
use crate::extractor::ExtractionResult;
use crate::ledger::ProgressLedger;

/// How long the result loop waits before re-checking cancellation.
const RESULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Counts for one scheduler run.
///
/// `processed` counts every archive for which an outcome was determined,
/// success or failure. Archives skipped via the ledger, or never
/// dispatched because of cancellation, are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Archives extracted and deleted successfully.
    pub succeeded: usize,
    /// Archives for which an outcome was determined.
    pub processed: usize,
}

/// Runs the batch over `archives`.
///
/// Applies the hybrid strategy: one archive per pool worker, with bulky
/// archives additionally parallelized internally. Falls back to
/// sequential processing when pooling is disabled, when fewer than two
/// archives remain, or when the pool itself cannot be created.
///
/// Cancellation is observed before each dispatch (sequential) and
/// before each wait for further results (pooled); jobs already running
/// are allowed to finish in the background but their results are not
/// collected.
///
/// The ledger is flushed every `flush_interval` results and once more
/// before returning.
pub fn run(
    archives: &[PathBuf],
    ledger: &mut ProgressLedger,
    cancel: &CancelFlag,
    status: &dyn StatusSink,
    config: &SweepConfig,
) -> BatchSummary {
    let remaining: Vec<PathBuf> = archives
        .iter()
        .filter(|path| {
            let skip = ledger.is_processed(path);
            if skip {
                debug!(archive = %path.display(), "skipping already processed archive");
            }
            !skip
        })
        .cloned()
        .collect();

    if remaining.is_empty() {
        info!("all archives already processed");
        return BatchSummary::default();
    }

    status.status("Analyzing archives for extraction strategy...");
    let profiles = analyzer::analyze(&remaining);

    let summary = if !config.parallel || profiles.len() < 2 {
        run_sequential(&profiles, ledger, cancel, status, config)
    } else {
        match run_pooled(&profiles, ledger, cancel, status, config) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(%err, "falling back to sequential extraction");
                status.status("Worker pool unavailable, extracting sequentially...");
                run_sequential(&profiles, ledger, cancel, status, config)
            }
        }
    };

    info!(
        succeeded = summary.succeeded,
        processed = summary.processed,
        "batch finished"
    );
    status.status(&format!(
        "Successfully extracted {}/{} archives",
        summary.succeeded, summary.processed
    ));
    summary
}

/// One-at-a-time processing in discovery order.
fn run_sequential(
    profiles: &[ArchiveProfile],
    ledger: &mut ProgressLedger,
    cancel: &CancelFlag,
    status: &dyn StatusSink,
    config: &SweepConfig,
) -> BatchSummary {
    let total = profiles.len();
    let flush_every = config.flush_interval.max(1);
    let mut summary = BatchSummary::default();

    info!(total, "extracting archives sequentially");
    for (position, profile) in profiles.iter().enumerate() {
        if cancel.is_cancelled() {
            info!("cancellation requested, stopping sequential extraction");
            break;
        }

        status.status(&format!(
            "Processing {}/{}: {}",
            position + 1,
            total,
            display_name(&profile.path)
        ));

        let job = ExtractionJob {
            archive: profile.path.clone(),
            internal_streams: 1,
        };
        record_result(&extractor::extract(&job), &mut summary, ledger);

        if summary.processed % flush_every == 0 {
            flush_quietly(ledger);
        }
    }

    flush_quietly(ledger);
    summary
}

/// Hybrid pooled processing: bulky archives are dispatched first with
/// their inner stream budget, everything else single-streamed.
fn run_pooled(
    profiles: &[ArchiveProfile],
    ledger: &mut ProgressLedger,
    cancel: &CancelFlag,
    status: &dyn StatusSink,
    config: &SweepConfig,
) -> Result<BatchSummary> {
    let total = profiles.len();
    let workers = config.worker_count().min(total);
    let flush_every = config.flush_interval.max(1);

    let mut bulky = Vec::new();
    let mut simple = Vec::new();
    for profile in profiles {
        let job = ExtractionJob::from_profile(profile, config);
        if job.internal_streams > 1 {
            bulky.push(job);
        } else {
            simple.push(job);
        }
    }

    info!(
        workers,
        bulky = bulky.len(),
        simple = simple.len(),
        inner_streams = config.inner_streams,
        "starting hybrid extraction"
    );
    status.status(&format!(
        "Extracting {total} archives ({} bulky) with {workers} workers...",
        bulky.len()
    ));

    let queue: Arc<Mutex<VecDeque<ExtractionJob>>> =
        Arc::new(Mutex::new(bulky.into_iter().chain(simple).collect()));
    let shutdown = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<ExtractionResult>();

    for worker in 0..workers {
        let queue = Arc::clone(&queue);
        let results = tx.clone();
        let cancel = cancel.clone();
        let shutdown = Arc::clone(&shutdown);
        let worker_shutdown = Arc::clone(&shutdown);

        let spawned = thread::Builder::new()
            .name(format!("zipsweep-worker-{worker}"))
            .spawn(move || worker_loop(&queue, &results, &cancel, &worker_shutdown));

        if let Err(err) = spawned {
            // Tell any workers that did start to stand down before the
            // sequential fallback takes over the queue's items.
            shutdown.store(true, Ordering::Relaxed);
            return Err(SweepError::PoolCreation {
                reason: err.to_string(),
            });
        }
    }
    drop(tx);

    let mut summary = BatchSummary::default();
    while summary.processed < total {
        if cancel.is_cancelled() {
            info!("cancellation requested, not waiting for outstanding jobs");
            break;
        }

        match rx.recv_timeout(RESULT_POLL_INTERVAL) {
            Ok(result) => {
                record_result(&result, &mut summary, ledger);
                status.status(&format!(
                    "Processed {}/{} archives ({} extracted)",
                    summary.processed, total, summary.succeeded
                ));
                if summary.processed % flush_every == 0 {
                    flush_quietly(ledger);
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    flush_quietly(ledger);
    Ok(summary)
}

/// Pulls jobs off the shared queue until it drains or the run stops.
fn worker_loop(
    queue: &Mutex<VecDeque<ExtractionJob>>,
    results: &mpsc::Sender<ExtractionResult>,
    cancel: &CancelFlag,
    shutdown: &AtomicBool,
) {
    loop {
        if cancel.is_cancelled() || shutdown.load(Ordering::Relaxed) {
            break;
        }

        let job = {
            let Ok(mut queue) = queue.lock() else { break };
            queue.pop_front()
        };
        let Some(job) = job else { break };

        let result = extractor::extract(&job);
        if results.send(result).is_err() {
            // The scheduler stopped collecting; finish quietly.
            break;
        }
    }
}

/// Reconciles one result into the counts and the ledger.
fn record_result(
    result: &ExtractionResult,
    summary: &mut BatchSummary,
    ledger: &mut ProgressLedger,
) {
    summary.processed += 1;
    if result.is_success() {
        summary.succeeded += 1;
        ledger.mark_processed(&result.archive);
    } else if let Some(err) = result.failure() {
        warn!(
            archive = %result.archive.display(),
            %err,
            "extraction job failed"
        );
    }
}

fn flush_quietly(ledger: &mut ProgressLedger) {
    if let Err(err) = ledger.flush() {
        warn!(%err, "failed to persist progress ledger");
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
}
