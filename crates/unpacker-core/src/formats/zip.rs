//! ZIP archive extraction.
//!
//! Zip extraction goes through the [`ZipExtractor`] trait so the in-process
//! decoder and the system `unzip` binary are interchangeable; see
//! [`FallbackPolicy`](super::fallback::FallbackPolicy) for how they are
//! combined.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use log::debug;
use zip::result::ZipError;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::types::DestDir;

use super::common;

/// Something that can extract a whole zip archive from disk.
pub trait ZipExtractor {
    /// Extracts every entry of the zip archive at `archive` below `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the extraction fails. Entries
    /// written before the failure are left on disk.
    fn extract(
        &self,
        archive: &Path,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport>;

    /// Short name used in logs and warnings.
    fn name(&self) -> &'static str;
}

impl<T: ZipExtractor + ?Sized> ZipExtractor for Box<T> {
    fn extract(
        &self,
        archive: &Path,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport> {
        (**self).extract(archive, dest, config)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Zip extraction with the `zip` crate.
///
/// Handles stored and deflated entries, plain or `ZipCrypto` encrypted.
/// Other compression methods and AES encryption surface as recoverable
/// errors so a fallback can take over.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unpacker_core::ExtractConfig;
/// use unpacker_core::formats::zip::{InProcessZip, ZipExtractor};
/// use unpacker_core::types::DestDir;
///
/// let dest = DestDir::create("/tmp/output")?;
/// let config = ExtractConfig::default().with_password("secret");
/// let report = InProcessZip.extract(Path::new("archive.zip"), &dest, &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), unpacker_core::ExtractionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessZip;

impl InProcessZip {
    /// Extracts a zip archive from any seekable reader.
    ///
    /// Nothing is written until every entry has been opened once: an
    /// encrypted entry without a configured password fails with
    /// `PasswordRequired`, and an entry the decoder cannot open (unsupported
    /// compression method, AES, wrong password) fails with a recoverable
    /// error. A fallback extractor therefore always starts from the
    /// destination as it was before this call.
    ///
    /// # Errors
    ///
    /// - `InvalidArchive` if the central directory cannot be read
    /// - `PasswordRequired` as described above
    /// - `Decryption` or `UnreadableEntry` for entries the decoder cannot
    ///   handle
    /// - `PathTraversal` for unsafe entry names
    /// - `Io` for filesystem failures
    pub fn extract_from<R: Read + Seek>(
        &self,
        source: R,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport> {
        let mut archive = open_archive(source)?;

        if config.password.is_none() && has_encrypted_entries(&mut archive)? {
            return Err(ExtractionError::PasswordRequired);
        }
        check_entries(&mut archive, config)?;

        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();

        for index in 0..archive.len() {
            let (name, encrypted) = entry_info(&mut archive, index)?;

            let opened = match (&config.password, encrypted) {
                (Some(password), true) => archive.by_index_decrypt(index, password.as_bytes()),
                _ => archive.by_index(index),
            };
            let mut file = opened.map_err(|e| entry_error(&name, e))?;
            let path = Path::new(&name);

            if file.is_dir() {
                common::create_directory(path, dest, &mut report)?;
            } else {
                debug!("zip entry {name} (encrypted: {encrypted})");
                let mode = common::file_mode(file.unix_mode(), config);
                common::extract_file(&mut file, path, mode, dest, &mut report, &mut buffer)?;
            }
        }

        Ok(report)
    }
}

/// Fails with `PasswordRequired` if the zip archive at `archive` holds
/// encrypted entries and `config` has no password.
///
/// Only the central directory is read; nothing is written.
///
/// # Errors
///
/// Returns `PasswordRequired`, `InvalidArchive` for an unreadable central
/// directory, or `Io` if the file cannot be opened.
pub fn check_password(archive: &Path, config: &ExtractConfig) -> Result<()> {
    if config.password.is_some() {
        return Ok(());
    }
    let mut archive = open_archive(File::open(archive)?)?;
    if has_encrypted_entries(&mut archive)? {
        return Err(ExtractionError::PasswordRequired);
    }
    Ok(())
}

fn open_archive<R: Read + Seek>(source: R) -> Result<zip::ZipArchive<R>> {
    zip::ZipArchive::new(source).map_err(|e| ExtractionError::InvalidArchive(format!("zip: {e}")))
}

fn entry_info<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    index: usize,
) -> Result<(String, bool)> {
    let raw = archive
        .by_index_raw(index)
        .map_err(|e| ExtractionError::InvalidArchive(format!("zip: {e}")))?;
    Ok((raw.name().to_string(), raw.encrypted()))
}

/// Opens every entry without reading its data.
///
/// Opening sets up decryption and decompression, so unsupported methods and
/// bad passwords show up here rather than halfway through extraction.
fn check_entries<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    config: &ExtractConfig,
) -> Result<()> {
    for index in 0..archive.len() {
        let (name, encrypted) = entry_info(archive, index)?;
        let opened = match (&config.password, encrypted) {
            (Some(password), true) => archive.by_index_decrypt(index, password.as_bytes()),
            _ => archive.by_index(index),
        };
        drop(opened.map_err(|e| entry_error(&name, e))?);
    }
    Ok(())
}

impl ZipExtractor for InProcessZip {
    fn extract(
        &self,
        archive: &Path,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport> {
        let file = File::open(archive)?;
        self.extract_from(file, dest, config)
    }

    fn name(&self) -> &'static str {
        "in-process zip"
    }
}

fn has_encrypted_entries<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> Result<bool> {
    for index in 0..archive.len() {
        let (name, encrypted) = entry_info(archive, index)?;
        if encrypted {
            debug!("zip entry {name} is encrypted");
            return Ok(true);
        }
    }
    Ok(false)
}

/// Maps a failure to open one entry onto the error taxonomy.
fn entry_error(name: &str, err: ZipError) -> ExtractionError {
    match err {
        ZipError::Io(e) => ExtractionError::Io(e),
        ZipError::InvalidPassword { .. } => {
            ExtractionError::Decryption(format!("invalid password for {name}"))
        }
        ZipError::UnsupportedArchive(reason) => {
            let reason = reason.to_string();
            if is_cipher_message(&reason) {
                ExtractionError::Decryption(format!("{name}: {reason}"))
            } else {
                ExtractionError::UnreadableEntry {
                    name: name.to_string(),
                    reason,
                }
            }
        }
        other => ExtractionError::UnreadableEntry {
            name: name.to_string(),
            reason: other.to_string(),
        },
    }
}

fn is_cipher_message(reason: &str) -> bool {
    let lower = reason.to_ascii_lowercase();
    lower.contains("password") || lower.contains("encrypt") || lower.contains("aes")
}
