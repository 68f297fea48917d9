//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use zipsweep_core::BatchSummary;

pub struct HumanFormatter {
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_sweep_summary(&self, summary: &BatchSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} Sweep complete", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line("Sweep complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Archives extracted: {}", summary.succeeded));
        let _ = self
            .term
            .write_line(&format!("  Archives processed: {}", summary.processed));

        let failed = summary.processed - summary.succeeded;
        if failed > 0 {
            self.format_warning(&format!(
                "{failed} archive(s) failed to extract, see log output for details"
            ));
        }

        Ok(())
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
