//! Test utilities for building zip fixtures.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a zip archive at `path` from a list of entries.
///
/// Each entry is a tuple of (name, content). Names ending in `/` become
/// directory markers. Entries are stored uncompressed so the on-disk
/// archive size is predictable in classification tests.
///
/// # Examples
///
/// ```
/// use zipsweep_core::test_utils::write_test_zip;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let archive = temp.path().join("fixture.zip");
/// write_test_zip(&archive, &[("dir/", b""), ("dir/file.txt", b"hello")]);
/// assert!(archive.exists());
/// ```
pub fn write_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap();
}

/// Writes a zip archive with `entry_count` stored entries totalling at
/// least `total_bytes` of content.
///
/// Useful for building archives that classify as bulky.
pub fn write_bulky_zip(path: &Path, entry_count: usize, total_bytes: usize) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644);

    let chunk = total_bytes.div_ceil(entry_count.max(1));
    let data = vec![0x5a_u8; chunk];
    for index in 0..entry_count {
        zip.start_file(format!("chunk-{index:04}.bin"), options)
            .unwrap();
        zip.write_all(&data).unwrap();
    }

    zip.finish().unwrap();
}
