//! Archive inspection and bulky/simple classification.

use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tracing::warn;

use crate::Result;
use crate::SweepConfig;
use crate::SweepError;

/// Metadata profile of a candidate archive.
///
/// Derived from the archive's central directory and filesystem size,
/// recomputed on every run and never persisted.
#[derive(Debug, Clone)]
pub struct ArchiveProfile {
    /// Path of the archive on disk.
    pub path: PathBuf,
    /// Number of non-directory entries.
    pub entry_count: usize,
    /// On-disk size of the archive file in bytes.
    pub size_bytes: u64,
}

impl ArchiveProfile {
    /// Average compressed bytes per entry.
    #[must_use]
    pub fn average_entry_size(&self) -> u64 {
        self.size_bytes / self.entry_count.max(1) as u64
    }

    /// Classifies this archive under the given thresholds.
    ///
    /// An archive is bulky iff it exceeds both the entry-count and the
    /// size threshold. Small archives gain nothing from internal
    /// parallelism (open/seek overhead dominates), while large archives
    /// with many entries benefit from concurrent streaming.
    #[must_use]
    pub fn is_bulky(&self, config: &SweepConfig) -> bool {
        self.entry_count > config.bulky_min_entries && self.size_bytes > config.bulky_min_bytes
    }

    /// Profile used when an archive's metadata cannot be read.
    ///
    /// Classifies as simple; the real error surfaces when extraction is
    /// attempted.
    fn degraded(path: PathBuf) -> Self {
        Self {
            path,
            entry_count: 1,
            size_bytes: 0,
        }
    }
}

/// Profiles each candidate archive by reading its central directory.
///
/// Only metadata is read, never entry content. An archive whose
/// metadata cannot be opened gets a degraded profile rather than
/// failing the batch.
pub fn analyze(paths: &[PathBuf]) -> Vec<ArchiveProfile> {
    paths
        .iter()
        .map(|path| {
            profile(path).unwrap_or_else(|err| {
                warn!(archive = %path.display(), %err, "analysis failed, treating as simple");
                ArchiveProfile::degraded(path.clone())
            })
        })
        .collect()
}

fn profile(path: &Path) -> Result<ArchiveProfile> {
    let file = File::open(path).map_err(|err| SweepError::from_io(path, err))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|err| SweepError::from_zip(path, err))?;

    let mut entry_count = 0;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|err| SweepError::from_zip(path, err))?;
        if !entry.is_dir() {
            entry_count += 1;
        }
    }

    let size_bytes = fs::metadata(path)
        .map_err(|err| SweepError::from_io(path, err))?
        .len();

    Ok(ArchiveProfile {
        path: path.to_path_buf(),
        entry_count,
        size_bytes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_zip;
    use tempfile::TempDir;

    fn profile_with(entry_count: usize, size_bytes: u64) -> ArchiveProfile {
        ArchiveProfile {
            path: PathBuf::from("a.zip"),
            entry_count,
            size_bytes,
        }
    }

    #[test]
    fn test_bulky_requires_both_thresholds() {
        let config = SweepConfig::default();

        // 25 entries, 15 MiB: bulky
        assert!(profile_with(25, 15 * 1024 * 1024).is_bulky(&config));
        // Many entries but small: simple
        assert!(!profile_with(25, 1024).is_bulky(&config));
        // Large but few entries: simple
        assert!(!profile_with(5, 15 * 1024 * 1024).is_bulky(&config));
        // Thresholds are strict
        assert!(!profile_with(20, 15 * 1024 * 1024).is_bulky(&config));
        assert!(!profile_with(25, 10 * 1024 * 1024).is_bulky(&config));
    }

    #[test]
    fn test_average_entry_size() {
        assert_eq!(profile_with(4, 1024).average_entry_size(), 256);
        // Degenerate entry count does not divide by zero
        assert_eq!(profile_with(0, 1024).average_entry_size(), 1024);
    }

    #[test]
    fn test_analyze_counts_file_entries() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("sample.zip");
        write_test_zip(
            &archive,
            &[
                ("one.txt", b"alpha" as &[u8]),
                ("sub/", b""),
                ("sub/two.txt", b"beta"),
                ("sub/three.txt", b"gamma"),
            ],
        );

        let profiles = analyze(&[archive.clone()]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].path, archive);
        // Directory markers are not counted
        assert_eq!(profiles[0].entry_count, 3);
        assert_eq!(profiles[0].size_bytes, fs::metadata(&archive).unwrap().len());
    }

    #[test]
    fn test_analyze_degrades_on_unreadable_archive() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("bogus.zip");
        fs::write(&bogus, b"this is not a zip file").unwrap();

        let profiles = analyze(&[bogus]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].entry_count, 1);
        assert_eq!(profiles[0].size_bytes, 0);
        assert!(!profiles[0].is_bulky(&SweepConfig::default()));
    }

    #[test]
    fn test_analyze_degrades_on_missing_archive() {
        let profiles = analyze(&[PathBuf::from("/no/such/archive.zip")]);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].entry_count, 1);
        assert_eq!(profiles[0].size_bytes, 0);
    }
}
