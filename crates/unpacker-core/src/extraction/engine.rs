//! Core extraction engine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use log::debug;
use log::info;
use log::warn;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::ArchiveFormat;
use crate::formats::ArchiveType;
use crate::formats::FallbackPolicy;
use crate::formats::InProcessZip;
use crate::formats::RarArchive;
use crate::formats::SevenZArchive;
use crate::formats::SystemUnzip;
use crate::formats::TarGzArchive;
use crate::formats::ZipExtractor;
use crate::formats::detect::detect_format;
use crate::formats::zip;
use crate::types::DestDir;

/// Validates inputs, picks the format handler and runs it.
///
/// Zip archives go through a [`ZipExtractor`]; by default that is the
/// in-process decoder with the system `unzip` fallback, or the in-process
/// decoder alone when `allow_system_unzip` is off.
pub struct ExtractionEngine {
    config: ExtractConfig,
    zip: Box<dyn ZipExtractor>,
}

impl ExtractionEngine {
    /// Creates a new extraction engine with the given configuration.
    #[must_use]
    pub fn new(config: ExtractConfig) -> Self {
        let zip: Box<dyn ZipExtractor> = if config.allow_system_unzip {
            Box::new(FallbackPolicy::new(InProcessZip, SystemUnzip::new()))
        } else {
            Box::new(InProcessZip)
        };
        Self { config, zip }
    }

    /// Creates an engine with a custom zip extractor.
    #[must_use]
    pub fn with_zip_extractor(config: ExtractConfig, zip: Box<dyn ZipExtractor>) -> Self {
        Self { config, zip }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts an archive into `output_dir`.
    ///
    /// Checks run in this order and stop at the first failure: the archive
    /// must exist (`NotFound`), its extension must be supported
    /// (`UnsupportedFormat`), and an encrypted zip needs a password
    /// (`PasswordRequired`). Only then is `output_dir` created.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the destination cannot be
    /// created, or the format handler fails.
    pub fn extract(&self, archive_path: &Path, output_dir: &Path) -> Result<ExtractionReport> {
        let start = Instant::now();

        if !archive_path.exists() {
            return Err(ExtractionError::NotFound {
                path: archive_path.to_path_buf(),
            });
        }

        let format = detect_format(archive_path)?;
        debug!("{} detected as {format}", archive_path.display());

        if format == ArchiveType::Zip {
            zip::check_password(archive_path, &self.config)?;
        }

        let dest = DestDir::create(output_dir)?;
        info!(
            "extracting {} into {}",
            archive_path.display(),
            dest.as_path().display()
        );

        let mut report = self.dispatch(format, archive_path, &dest)?;

        if self.config.password.is_some() && format != ArchiveType::Zip {
            let message = format!("password ignored for {format} archive");
            warn!("{message}");
            report.add_warning(message);
        }

        report.format = Some(format);
        report.duration = start.elapsed();
        Ok(report)
    }

    fn dispatch(
        &self,
        format: ArchiveType,
        archive_path: &Path,
        dest: &DestDir,
    ) -> Result<ExtractionReport> {
        match format {
            ArchiveType::TarGz => {
                let file = BufReader::new(File::open(archive_path)?);
                TarGzArchive::new(file).extract(dest, &self.config)
            }
            ArchiveType::Zip => self.zip.extract(archive_path, dest, &self.config),
            ArchiveType::Rar => RarArchive::new(archive_path).extract(dest, &self.config),
            ArchiveType::SevenZ => {
                let file = BufReader::new(File::open(archive_path)?);
                SevenZArchive::new(file)?.extract(dest, &self.config)
            }
        }
    }
}

impl std::fmt::Debug for ExtractionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionEngine")
            .field("config", &self.config)
            .field("zip", &self.zip.name())
            .finish()
    }
}
