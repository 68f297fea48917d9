//! Single-archive extraction, optionally with concurrent streams.

use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;
use std::thread;
use tracing::debug;
use tracing::info;

use crate::Result;
use crate::SweepConfig;
use crate::SweepError;
use crate::analyzer::ArchiveProfile;
use crate::sanitize;

/// A unit of extraction work: one archive and its stream budget.
///
/// Created by the scheduler from an [`ArchiveProfile`], consumed exactly
/// once by [`extract`].
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    /// Archive to extract.
    pub archive: PathBuf,
    /// Concurrent streams to use within this archive. `1` means the
    /// entries are written sequentially in stored order.
    pub internal_streams: usize,
}

impl ExtractionJob {
    /// Builds a job from an analysis profile.
    ///
    /// Bulky archives get the configured inner stream count, everything
    /// else extracts single-streamed.
    #[must_use]
    pub fn from_profile(profile: &ArchiveProfile, config: &SweepConfig) -> Self {
        let internal_streams = if profile.is_bulky(config) {
            config.inner_streams.max(1)
        } else {
            1
        };
        Self {
            archive: profile.path.clone(),
            internal_streams,
        }
    }
}

/// Outcome of one extraction job.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Archive the job ran against.
    pub archive: PathBuf,
    /// Entries written to disk, including any written before a failure.
    pub extracted_entries: usize,
    /// Success, or the first error the job hit.
    pub outcome: Result<()>,
}

impl ExtractionResult {
    /// Returns `true` if the archive was fully extracted and deleted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The failure reason, if the job failed.
    #[must_use]
    pub fn failure(&self) -> Option<&SweepError> {
        self.outcome.as_ref().err()
    }
}

/// Extracts one archive to a sibling directory and deletes the source.
///
/// For an archive at `<dir>/<name>.zip` the entries land under
/// `<dir>/<name>/`. Entries are streamed to disk; directory markers are
/// skipped and parent directories created as needed. On success the
/// source archive is deleted; a deletion failure is reported as the
/// job's failure even though extraction itself succeeded, so a fully
/// extracted but undeleted archive is never indistinguishable from
/// unprocessed work.
///
/// A failing entry aborts the job; already-written files stay on disk.
/// Re-running the job overwrites them.
pub fn extract(job: &ExtractionJob) -> ExtractionResult {
    let mut extracted = 0;
    let outcome = run(job, &mut extracted);

    match &outcome {
        Ok(()) => info!(
            archive = %job.archive.display(),
            entries = extracted,
            streams = job.internal_streams,
            "extracted archive"
        ),
        Err(err) => debug!(archive = %job.archive.display(), %err, "extraction failed"),
    }

    ExtractionResult {
        archive: job.archive.clone(),
        extracted_entries: extracted,
        outcome,
    }
}

fn run(job: &ExtractionJob, extracted: &mut usize) -> Result<()> {
    let archive_path = job.archive.as_path();
    let dest = extraction_dir(archive_path)?;
    fs::create_dir_all(&dest).map_err(|err| SweepError::from_io(&dest, err))?;

    let mut archive = open_archive(archive_path)?;
    let entries = file_entry_indices(&mut archive, archive_path)?;

    if job.internal_streams > 1 && entries.len() > 1 {
        extract_concurrent(archive_path, &dest, &entries, job.internal_streams, extracted)?;
    } else {
        for &index in &entries {
            write_entry(&mut archive, archive_path, index, &dest)?;
            *extracted += 1;
        }
    }

    // Release our read handle before unlinking the source.
    drop(archive);
    fs::remove_file(archive_path).map_err(|err| SweepError::from_io(archive_path, err))?;
    debug!(archive = %archive_path.display(), "deleted source archive");
    Ok(())
}

/// Sibling directory an archive extracts into.
fn extraction_dir(archive: &Path) -> Result<PathBuf> {
    archive
        .file_stem()
        .map(|stem| archive.with_file_name(stem))
        .ok_or_else(|| SweepError::BadArchive {
            path: archive.to_path_buf(),
            reason: "archive has no file name".to_string(),
        })
}

fn open_archive(path: &Path) -> Result<zip::ZipArchive<File>> {
    let file = File::open(path).map_err(|err| SweepError::from_io(path, err))?;
    zip::ZipArchive::new(file).map_err(|err| SweepError::from_zip(path, err))
}

/// Indices of the non-directory entries, in stored order.
fn file_entry_indices(archive: &mut zip::ZipArchive<File>, path: &Path) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|err| SweepError::from_zip(path, err))?;
        if !entry.is_dir() {
            indices.push(index);
        }
    }
    Ok(indices)
}

/// Streams one entry to its sanitized target path.
fn write_entry<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    archive_path: &Path,
    index: usize,
    dest: &Path,
) -> Result<()> {
    let mut entry = archive
        .by_index(index)
        .map_err(|err| SweepError::from_zip(archive_path, err))?;
    let name = entry.name().to_string();
    let target = sanitize::entry_target_path(&name, dest)?;

    if let Some(parent) = target.parent() {
        // Concurrent streams may race on shared parents; create_dir_all
        // tolerates a directory that already exists.
        fs::create_dir_all(parent).map_err(|err| SweepError::from_io(parent, err))?;
    }

    let mut out = File::create(&target).map_err(|err| SweepError::from_io(&target, err))?;
    io::copy(&mut entry, &mut out).map_err(|err| SweepError::from_io(&target, err))?;
    Ok(())
}

/// Partitions the entry list round-robin across concurrent streams.
///
/// Each stream opens its own read-only handle on the archive and writes
/// a disjoint set of target files, so no synchronization is needed
/// beyond directory creation.
fn extract_concurrent(
    archive_path: &Path,
    dest: &Path,
    entries: &[usize],
    streams: usize,
    extracted: &mut usize,
) -> Result<()> {
    let lanes = streams.min(entries.len()).max(1);

    let lane_results: Vec<(usize, Result<()>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..lanes)
            .map(|lane| {
                let assigned: Vec<usize> =
                    entries.iter().copied().skip(lane).step_by(lanes).collect();
                scope.spawn(move || extract_lane(archive_path, dest, &assigned))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    (
                        0,
                        Err(SweepError::Io(io::Error::other(
                            "extraction stream panicked",
                        ))),
                    )
                })
            })
            .collect()
    });

    let mut first_error = None;
    for (written, result) in lane_results {
        *extracted += written;
        if first_error.is_none() {
            if let Err(err) = result {
                first_error = Some(err);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

fn extract_lane(archive_path: &Path, dest: &Path, indices: &[usize]) -> (usize, Result<()>) {
    let mut written = 0;
    let result = (|| {
        let mut archive = open_archive(archive_path)?;
        for &index in indices {
            write_entry(&mut archive, archive_path, index, dest)?;
            written += 1;
        }
        Ok(())
    })();
    (written, result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_zip;
    use tempfile::TempDir;

    fn job(archive: &Path, streams: usize) -> ExtractionJob {
        ExtractionJob {
            archive: archive.to_path_buf(),
            internal_streams: streams,
        }
    }

    #[test]
    fn test_simple_extraction() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("photos.zip");
        write_test_zip(
            &archive,
            &[
                ("readme.txt", b"hello" as &[u8]),
                ("album/", b""),
                ("album/a.txt", b"alpha"),
                ("album/b.txt", b"beta"),
            ],
        );

        let result = extract(&job(&archive, 1));

        assert!(result.is_success(), "outcome: {:?}", result.outcome);
        assert_eq!(result.extracted_entries, 3);

        let dest = temp.path().join("photos");
        assert_eq!(fs::read_to_string(dest.join("readme.txt")).unwrap(), "hello");
        assert_eq!(
            fs::read_to_string(dest.join("album/a.txt")).unwrap(),
            "alpha"
        );
        assert_eq!(fs::read_to_string(dest.join("album/b.txt")).unwrap(), "beta");
        assert!(!archive.exists(), "source archive should be deleted");
    }

    #[test]
    fn test_concurrent_extraction() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("big.zip");
        let contents: Vec<(String, Vec<u8>)> = (0..12)
            .map(|i| (format!("part-{i:02}.bin"), vec![i as u8; 256]))
            .collect();
        let entries: Vec<(&str, &[u8])> = contents
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .collect();
        write_test_zip(&archive, &entries);

        let result = extract(&job(&archive, 4));

        assert!(result.is_success(), "outcome: {:?}", result.outcome);
        assert_eq!(result.extracted_entries, 12);

        let dest = temp.path().join("big");
        for (name, data) in &contents {
            assert_eq!(&fs::read(dest.join(name)).unwrap(), data);
        }
        assert!(!archive.exists());
    }

    #[test]
    fn test_traversal_entry_fails_job() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();

        let archive = outside.join("evil.zip");
        write_test_zip(
            &archive,
            &[
                ("fine.txt", b"ok" as &[u8]),
                ("../escape.txt", b"payload"),
            ],
        );

        let result = extract(&job(&archive, 1));

        assert!(matches!(
            result.outcome,
            Err(SweepError::PathTraversal { .. })
        ));
        assert!(
            !outside.join("escape.txt").exists() && !temp.path().join("escape.txt").exists(),
            "no file may be written outside the extraction directory"
        );
        assert!(archive.exists(), "failed job must not delete the source");
    }

    #[test]
    fn test_missing_archive_fails() {
        let result = extract(&job(Path::new("/no/such/thing.zip"), 1));
        assert!(!result.is_success());
        assert_eq!(result.extracted_entries, 0);
    }

    #[test]
    fn test_corrupt_archive_fails_as_bad_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("garbage.zip");
        fs::write(&archive, b"definitely not a central directory").unwrap();

        let result = extract(&job(&archive, 1));
        assert!(matches!(result.outcome, Err(SweepError::BadArchive { .. })));
        assert!(archive.exists());
    }

    #[test]
    fn test_rerun_overwrites_partial_output() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_test_zip(&archive, &[("a.txt", b"fresh" as &[u8])]);

        // Simulate leftovers from an aborted earlier run.
        let dest = temp.path().join("data");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("a.txt"), "stale").unwrap();

        let result = extract(&job(&archive, 1));
        assert!(result.is_success());
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "fresh");
    }

    #[test]
    fn test_job_from_profile_stream_budget() {
        let config = SweepConfig::default();

        let bulky = ArchiveProfile {
            path: PathBuf::from("bulky.zip"),
            entry_count: 25,
            size_bytes: 15 * 1024 * 1024,
        };
        assert_eq!(ExtractionJob::from_profile(&bulky, &config).internal_streams, 4);

        let simple = ArchiveProfile {
            path: PathBuf::from("simple.zip"),
            entry_count: 5,
            size_bytes: 1024,
        };
        assert_eq!(ExtractionJob::from_profile(&simple, &config).internal_streams, 1);
    }

    #[test]
    fn test_extraction_dir_is_sibling() {
        let dir = extraction_dir(Path::new("/data/set/album.zip")).unwrap();
        assert_eq!(dir, Path::new("/data/set/album"));
    }
}
