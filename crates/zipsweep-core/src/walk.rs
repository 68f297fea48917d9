//! Recursive discovery of candidate archives.

use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::WalkDir;

use crate::Result;
use crate::SweepError;

/// Recursively collects every `.zip` file under `root`.
///
/// The extension match is case-insensitive and symlinks are not
/// followed. Unreadable subtrees are logged and skipped. Results are
/// sorted so discovery order is stable across runs.
///
/// # Errors
///
/// A missing root returns `SweepError::RootNotFound` and a non-directory
/// root returns `SweepError::NotADirectory`; both abort the whole run
/// before any processing.
pub fn discover_archives(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(SweepError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(SweepError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut archives = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };

        if entry.file_type().is_file() && has_zip_extension(entry.path()) {
            archives.push(entry.into_path());
        }
    }

    archives.sort_unstable();
    debug!(root = %root.display(), found = archives.len(), "discovered archives");
    Ok(archives)
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
