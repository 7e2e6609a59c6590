//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unpacker_core::ExtractionReport;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    archive: String,
    destination: String,
    format: Option<&'static str>,
    /// `null` when the system `unzip` binary did the extraction.
    files_extracted: Option<usize>,
    directories_created: Option<usize>,
    entries_skipped: Option<usize>,
    bytes_written: Option<u64>,
    duration_ms: u128,
    used_system_unzip: bool,
    warnings: Vec<String>,
}

impl ExtractionOutput {
    fn new(archive: &Path, destination: &Path, report: &ExtractionReport) -> Self {
        let counted = report.has_entry_counts();
        Self {
            archive: archive.display().to_string(),
            destination: destination.display().to_string(),
            format: report.format.map(|f| f.name()),
            files_extracted: counted.then_some(report.files_extracted),
            directories_created: counted.then_some(report.directories_created),
            entries_skipped: counted.then_some(report.entries_skipped),
            bytes_written: counted.then_some(report.bytes_written),
            duration_ms: report.duration.as_millis(),
            used_system_unzip: report.used_system_unzip,
            warnings: report.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        archive: &Path,
        destination: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        let data = ExtractionOutput::new(archive, destination, report);
        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("extract", error.to_string());
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
