//! Retry policy combining two zip extractors.

use std::path::Path;

use log::info;
use log::warn;

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::types::DestDir;

use super::zip::ZipExtractor;

/// Runs `primary`, and on a recoverable failure runs `fallback` over the
/// whole archive.
///
/// Files written by the failed primary attempt are not removed. Errors that
/// are not [recoverable](crate::ExtractionError::is_recoverable) are returned
/// unchanged, as is any error from the fallback.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unpacker_core::ExtractConfig;
/// use unpacker_core::formats::fallback::FallbackPolicy;
/// use unpacker_core::formats::system_unzip::SystemUnzip;
/// use unpacker_core::formats::zip::{InProcessZip, ZipExtractor};
/// use unpacker_core::types::DestDir;
///
/// let policy = FallbackPolicy::new(InProcessZip, SystemUnzip::new());
/// let dest = DestDir::create("/tmp/output")?;
/// let config = ExtractConfig::default().with_password("secret");
/// let report = policy.extract(Path::new("aes.zip"), &dest, &config)?;
/// assert!(report.used_system_unzip || report.files_extracted > 0);
/// # Ok::<(), unpacker_core::ExtractionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FallbackPolicy<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackPolicy<P, F> {
    /// Combines two extractors.
    #[must_use]
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ZipExtractor, F: ZipExtractor> ZipExtractor for FallbackPolicy<P, F> {
    fn extract(
        &self,
        archive: &Path,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport> {
        match self.primary.extract(archive, dest, config) {
            Err(err) if err.is_recoverable() => {
                warn!("{} failed on {}: {err}", self.primary.name(), archive.display());
                info!("retrying with {}", self.fallback.name());

                let mut report = self.fallback.extract(archive, dest, config)?;
                report.add_warning(format!(
                    "{} failed ({err}), extracted with {}",
                    self.primary.name(),
                    self.fallback.name()
                ));
                Ok(report)
            }
            result => result,
        }
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}
