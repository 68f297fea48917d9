//! Live status line for sweep runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;
use zipsweep_core::StatusSink;

/// Spinner-backed status line implementing the core's `StatusSink`.
///
/// The scheduler's milestone messages replace the spinner's message
/// line as they arrive. Cleans up after itself on drop.
pub struct SweepStatus {
    bar: ProgressBar,
}

impl SweepStatus {
    /// Creates the status spinner.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Checks if we should show live status (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Default for SweepStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SweepStatus {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl StatusSink for SweepStatus {
    fn status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_updates_message() {
        let status = SweepStatus::new();
        status.status("Scanning for zip archives...");
        status.status("Processing 1/3: a.zip");
        assert_eq!(status.bar.message(), "Processing 1/3: a.zip");
    }
}
