//! High-level public API for archive extraction.

use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::ExtractionEngine;

/// Extracts an archive to the specified output directory.
///
/// The format is chosen by file extension (`.zip`, `.tar.gz`, `.tgz`,
/// `.rar`, `.7z`). The output directory is created if needed.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `output_dir` - Directory where files will be extracted
/// * `config` - Extraction settings
///
/// # Errors
///
/// Returns an error if:
/// - The archive does not exist
/// - The extension is not supported
/// - The archive is malformed or holds unsafe entry names
/// - A zip archive is encrypted and no password was given
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use unpacker_core::ExtractConfig;
/// use unpacker_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default();
/// let report = extract_archive("archive.tar.gz", "/tmp/output", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    ExtractionEngine::new(config.clone()).extract(archive_path.as_ref(), output_dir.as_ref())
}
