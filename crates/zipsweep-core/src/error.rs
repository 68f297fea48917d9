//! Error types for sweep operations.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `SweepError`.
pub type Result<T> = std::result::Result<T, SweepError>;

/// Errors that can occur while sweeping and extracting archives.
#[derive(Error, Debug)]
pub enum SweepError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Archive container is unreadable or corrupt.
    #[error("unreadable archive {path}: {reason}")]
    BadArchive {
        /// Path of the offending archive.
        path: PathBuf,
        /// Underlying parse or format error.
        reason: String,
    },

    /// Filesystem access was refused.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// Path that could not be accessed.
        path: PathBuf,
    },

    /// Archive entry resolves outside the extraction directory.
    #[error("path traversal detected in entry: {entry}")]
    PathTraversal {
        /// The entry name that attempted traversal.
        entry: PathBuf,
    },

    /// The worker pool could not be brought up.
    #[error("worker pool unavailable: {reason}")]
    PoolCreation {
        /// Why pool creation failed.
        reason: String,
    },

    /// Scan root does not exist.
    #[error("directory does not exist: {path}")]
    RootNotFound {
        /// The configured scan root.
        path: PathBuf,
    },

    /// Scan root exists but is not a directory.
    #[error("path is not a directory: {path}")]
    NotADirectory {
        /// The configured scan root.
        path: PathBuf,
    },
}

impl SweepError {
    /// Returns `true` if this error is scoped to a single archive.
    ///
    /// Per-item errors are aggregated into the batch counts and never
    /// abort the run. Everything else is systemic: either the scan root
    /// is unusable (whole-run abort) or the worker pool could not start
    /// (recovered by sequential fallback).
    #[must_use]
    pub const fn is_per_item(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::BadArchive { .. }
                | Self::PermissionDenied { .. }
                | Self::PathTraversal { .. }
        )
    }

    /// Maps an I/O error to the sweep taxonomy, keeping the offending path.
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }

    /// Maps a zip-level error to the sweep taxonomy.
    pub(crate) fn from_zip(path: &Path, err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => Self::from_io(path, io_err),
            other => Self::BadArchive {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}
