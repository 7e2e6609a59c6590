//! Extraction operation reporting.

use std::time::Duration;

use crate::formats::ArchiveType;

/// Report of an archive extraction operation.
///
/// Counts are those observed by the in-process extractors. The system
/// `unzip` fallback does not report per-entry results, so when it produced
/// the result `used_system_unzip` is set and the counts stay zero; see
/// [`ExtractionReport::has_entry_counts`].
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Format the archive was dispatched as.
    pub format: Option<ArchiveType>,

    /// Number of files successfully extracted.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Number of entries skipped (links, devices and other non-file kinds).
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Whether the system `unzip` binary produced the final result.
    pub used_system_unzip: bool,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of items materialized on disk.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns false when the counts were not tracked because the system
    /// `unzip` binary did the extraction.
    #[must_use]
    pub const fn has_entry_counts(&self) -> bool {
        !self.used_system_unzip
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_new_is_empty() {
        let report = ExtractionReport::new();
        assert_eq!(report.total_items(), 0);
        assert!(!report.has_warnings());
        assert!(!report.used_system_unzip);
        assert!(report.format.is_none());
        assert!(report.has_entry_counts());
    }

    #[test]
    fn test_fallback_report_has_no_counts() {
        let report = ExtractionReport {
            used_system_unzip: true,
            ..Default::default()
        };
        assert!(!report.has_entry_counts());
    }

    #[test]
    fn test_total_items() {
        let report = ExtractionReport {
            files_extracted: 2,
            directories_created: 1,
            entries_skipped: 4,
            ..Default::default()
        };
        assert_eq!(report.total_items(), 3);
    }

    #[test]
    fn test_add_warning() {
        let mut report = ExtractionReport::new();
        report.add_warning("skipped symlink".to_string());
        assert!(report.has_warnings());
        assert_eq!(report.warnings.len(), 1);
    }
}
