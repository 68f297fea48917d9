//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use zipsweep_core::BatchSummary;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_sweep_summary(&self, summary: &BatchSummary) -> Result<()> {
        #[derive(Serialize)]
        struct SweepOutput {
            archives_extracted: usize,
            archives_processed: usize,
            archives_failed: usize,
        }

        let data = SweepOutput {
            archives_extracted: summary.succeeded,
            archives_processed: summary.processed,
            archives_failed: summary.processed - summary.succeeded,
        };

        let output = JsonOutput::success("sweep", data);
        Self::output(&output)
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            "sweep",
            SuccessData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
