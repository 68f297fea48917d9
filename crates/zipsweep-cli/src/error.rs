//! Error conversion utilities for CLI.
//!
//! Converts zipsweep-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use zipsweep_core::SweepError;

/// Converts `SweepError` to a user-friendly anyhow error with context.
pub fn convert_sweep_error(err: SweepError, root: &Path) -> anyhow::Error {
    match err {
        SweepError::RootNotFound { path } => {
            anyhow!(
                "Directory does not exist: {}\n\
                 HINT: Check the path or create the directory before sweeping.",
                path.display()
            )
        }
        SweepError::NotADirectory { path } => {
            anyhow!(
                "Path is not a directory: {}\n\
                 HINT: zipsweep scans a directory tree; pass the folder containing your archives.",
                path.display()
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error sweeping '{}'", root.display())),
    }
}

/// Adds context to a sweep result.
pub fn add_sweep_context<T>(
    result: Result<T, SweepError>,
    root: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_sweep_error(e, root))
}
