//! Fluent builder over [`extract_archive`](crate::extract_archive).

use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;

/// Builder for configuring archive extraction.
///
/// # Examples
///
/// ```no_run
/// use unpacker_core::ArchiveBuilder;
/// use unpacker_core::ExtractConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = ArchiveBuilder::new()
///     .archive("archive.zip")
///     .output_dir("/tmp/output")
///     .config(ExtractConfig::default().with_password("secret"))
///     .extract()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    archive_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config: Option<ExtractConfig>,
}

impl ArchiveBuilder {
    /// Creates a new `ArchiveBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive file path.
    #[must_use]
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the extraction configuration.
    #[must_use]
    pub fn config(mut self, config: ExtractConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Executes the extraction with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `archive` or `output_dir` was not set, or if
    /// extraction fails.
    pub fn extract(self) -> Result<ExtractionReport> {
        let archive_path = self.archive_path.ok_or_else(|| missing("archive path"))?;
        let output_dir = self.output_dir.ok_or_else(|| missing("output directory"))?;
        let config = self.config.unwrap_or_default();

        crate::api::extract_archive(archive_path, output_dir, &config)
    }
}

fn missing(what: &str) -> ExtractionError {
    ExtractionError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} not set"),
    ))
}
