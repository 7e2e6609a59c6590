//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unpacker_core::ExtractionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    /// Per-entry counts, or a note that the system `unzip` run did not
    /// report any.
    fn detail_lines(report: &ExtractionReport) -> Vec<String> {
        if !report.has_entry_counts() {
            return vec![
                "  Extracted with: system unzip (entry counts not available)".to_string(),
            ];
        }

        let mut lines = vec![
            format!(
                "  Files extracted: {}",
                Self::format_number(report.files_extracted)
            ),
            format!(
                "  Directories: {}",
                Self::format_number(report.directories_created)
            ),
            format!("  Total size: {}", Self::format_size(report.bytes_written)),
        ];
        if report.entries_skipped > 0 {
            lines.push(format!("  Skipped: {}", report.entries_skipped));
        }
        lines
    }

    fn summary_line(archive: &Path, destination: &Path) -> String {
        format!(
            "Successfully extracted {} to {}",
            archive.display(),
            destination.display()
        )
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        archive: &Path,
        destination: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            self.term
                .write_line(&format!("Path: {}", archive.display()))?;
        }

        let summary = Self::summary_line(archive, destination);
        if self.use_colors {
            self.term
                .write_line(&format!("{} {summary}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(&summary)?;
        }

        for line in Self::detail_lines(report) {
            self.term.write_line(&line)?;
        }

        if self.verbose {
            if let Some(format) = report.format {
                self.term.write_line(&format!("  Format: {format}"))?;
            }
            self.term
                .write_line(&format!("  Duration: {:?}", report.duration))?;
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let message = error.to_string();
        let (first, rest) = message
            .split_once('\n')
            .map_or((message.as_str(), None), |(first, rest)| (first, Some(rest)));

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{}", style(first).red().bold()));
        } else {
            let _ = self.err_term.write_line(first);
        }
        if let Some(rest) = rest {
            let _ = self.err_term.write_line(rest);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
