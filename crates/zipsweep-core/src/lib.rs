//! Resumable batch extraction of zip archive trees.
//!
//! `zipsweep-core` recursively discovers zip archives under a directory,
//! extracts each to a sibling folder, deletes the source archive on
//! success, and resumes safely across restarts: a persisted progress
//! ledger records finished work so re-runs skip it. Many archives are
//! processed concurrently through a worker pool, and bulky archives are
//! additionally parallelized internally with multiple extraction
//! streams.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use zipsweep_core::CancelFlag;
//! use zipsweep_core::NoopSink;
//! use zipsweep_core::ProgressLedger;
//! use zipsweep_core::SweepConfig;
//! use zipsweep_core::sweep_directory;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ledger = ProgressLedger::load("zipsweep_progress.json");
//! let summary = sweep_directory(
//!     Path::new("/data/incoming"),
//!     &mut ledger,
//!     &CancelFlag::new(),
//!     &NoopSink,
//!     &SweepConfig::default(),
//! )?;
//! println!("extracted {} of {} archives", summary.succeeded, summary.processed);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod api;
pub mod cancel;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ledger;
pub mod progress;
pub mod sanitize;
pub mod scheduler;
pub mod test_utils;
pub mod walk;

// Re-export main API types
pub use api::sweep_directory;
pub use cancel::CancelFlag;
pub use config::SweepConfig;
pub use error::Result;
pub use error::SweepError;
pub use ledger::ProgressLedger;
pub use progress::NoopSink;
pub use progress::StatusSink;
pub use scheduler::BatchSummary;
