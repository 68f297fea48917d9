//! Sweep configuration.

use std::num::NonZeroUsize;
use std::thread;

/// Upper bound on the default worker count.
const MAX_DEFAULT_WORKERS: usize = 8;

/// Configuration for a sweep run.
///
/// Controls the two levels of parallelism (outer worker pool, inner
/// streams per bulky archive) and the thresholds used to classify
/// archives.
///
/// # Examples
///
/// ```
/// use zipsweep_core::SweepConfig;
///
/// // Defaults: pooling enabled, 4 inner streams per bulky archive
/// let config = SweepConfig::default();
///
/// // Force one-at-a-time processing
/// let sequential = SweepConfig {
///     parallel: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Process multiple archives concurrently through a worker pool.
    pub parallel: bool,

    /// Worker pool size. `None` selects `min(available parallelism, 8)`.
    pub max_workers: Option<usize>,

    /// Concurrent extraction streams per bulky archive.
    pub inner_streams: usize,

    /// Minimum entry count for an archive to classify as bulky.
    pub bulky_min_entries: usize,

    /// Minimum on-disk size in bytes for an archive to classify as bulky.
    pub bulky_min_bytes: u64,

    /// Number of results between ledger flushes.
    pub flush_interval: usize,
}

impl Default for SweepConfig {
    /// Creates a `SweepConfig` with the standard settings.
    ///
    /// Default values:
    /// - `parallel`: true
    /// - `max_workers`: `None` (min of CPU count and 8)
    /// - `inner_streams`: 4
    /// - `bulky_min_entries`: 20
    /// - `bulky_min_bytes`: 10 MiB
    /// - `flush_interval`: 5
    fn default() -> Self {
        Self {
            parallel: true,
            max_workers: None,
            inner_streams: 4,
            bulky_min_entries: 20,
            bulky_min_bytes: 10 * 1024 * 1024,
            flush_interval: 5,
        }
    }
}

impl SweepConfig {
    /// Resolves the effective worker pool size.
    ///
    /// Small archives gain nothing from internal parallelism, and a pool
    /// larger than the machine only adds scheduling overhead, so the
    /// unconfigured default is capped at `min(available parallelism, 8)`.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.max_workers
            .unwrap_or_else(|| {
                thread::available_parallelism()
                    .map_or(1, NonZeroUsize::get)
                    .min(MAX_DEFAULT_WORKERS)
            })
            .max(1)
    }
}
