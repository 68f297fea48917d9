//! Persisted progress ledger for idempotent skip-checks.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

use crate::Result;

/// On-disk shape of the ledger.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    processed_files: Vec<String>,
    last_updated: DateTime<Utc>,
}

/// Content-addressed record of archives that have been fully extracted.
///
/// Each archive is keyed by a stable digest of its path string, not its
/// content: moving or renaming an un-extracted archive makes it a new
/// item, and re-running against an already-deleted archive is a no-op.
///
/// Mutations accumulate in a pending buffer; [`flush`](Self::flush)
/// persists the full set in one write. The ledger is not internally
/// synchronized; the scheduler is its single writer and serializes all
/// access.
///
/// A missing or corrupt persisted file is never fatal: the ledger
/// initializes empty and the run proceeds.
#[derive(Debug)]
pub struct ProgressLedger {
    path: PathBuf,
    processed: HashSet<String>,
    pending: Vec<String>,
}

impl ProgressLedger {
    /// Loads the ledger from `path`, or starts empty if the file is
    /// missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let processed = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<LedgerFile>(&contents) {
                Ok(file) => {
                    debug!(
                        path = %path.display(),
                        entries = file.processed_files.len(),
                        "loaded progress ledger"
                    );
                    file.processed_files.into_iter().collect()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        %err,
                        "progress ledger is unreadable, starting empty"
                    );
                    HashSet::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashSet::new(),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "failed to read progress ledger, starting empty"
                );
                HashSet::new()
            }
        };

        Self {
            path,
            processed,
            pending: Vec::new(),
        }
    }

    /// Returns `true` if `archive` was already fully extracted.
    #[must_use]
    pub fn is_processed(&self, archive: &Path) -> bool {
        self.processed.contains(&identity_hash(archive))
    }

    /// Records `archive` as fully extracted.
    ///
    /// The mark is buffered in memory; nothing is persisted until the
    /// next [`flush`](Self::flush).
    pub fn mark_processed(&mut self, archive: &Path) {
        let hash = identity_hash(archive);
        if self.processed.insert(hash.clone()) {
            self.pending.push(hash);
        }
    }

    /// Persists the full set if any marks are pending.
    ///
    /// Batching bounds crash loss to one batch of already-completed
    /// work, which is safe to re-examine: the extracted archives no
    /// longer exist on disk, so a rescan simply does not find them.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut processed_files: Vec<String> = self.processed.iter().cloned().collect();
        processed_files.sort_unstable();

        let file = LedgerFile {
            processed_files,
            last_updated: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;
        fs::write(&self.path, json)?;

        debug!(
            path = %self.path.display(),
            flushed = self.pending.len(),
            total = self.processed.len(),
            "flushed progress ledger"
        );
        self.pending.clear();
        Ok(())
    }

    /// Empties the ledger and deletes the persisted file.
    ///
    /// Used for a full reset, never mid-run.
    pub fn clear(&mut self) -> Result<()> {
        self.processed.clear();
        self.pending.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Number of archives recorded as processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    /// Returns `true` if no archives are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }

    /// Location of the persisted ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Stable digest of an archive's path string.
fn identity_hash(path: &Path) -> String {
    format!("{:x}", Sha256::digest(path.to_string_lossy().as_bytes()))
}
