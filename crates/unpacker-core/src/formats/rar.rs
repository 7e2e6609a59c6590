//! RAR archive extraction through the `unrar` library.
//!
//! Password-protected archives are not supported: the archive is always
//! opened without a password and the library error is reported.
//!
//! The library hands out each entry's contents as one buffer, so a file is
//! held fully in memory before it is written. Peak memory grows with the
//! largest entry rather than staying at the copy buffer size used by the
//! other handlers.

use std::io::Cursor;
use std::path::PathBuf;

use log::debug;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::types::DestDir;

use super::common;
use super::traits::ArchiveFormat;

const S_IFMT: u32 = 0o170_000;
const S_IFREG: u32 = 0o100_000;
const S_IFLNK: u32 = 0o120_000;

/// RAR archive handler.
///
/// The underlying library reads from a file path, so unlike the other
/// handlers this one is not generic over a reader.
#[derive(Debug, Clone)]
pub struct RarArchive {
    path: PathBuf,
}

impl RarArchive {
    /// Creates a handler for the archive at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Derives a file mode from RAR entry attributes.
///
/// Archives created on Unix carry `st_mode`; anything else (DOS attribute
/// bits) gets `None`.
#[must_use]
pub fn rar_mode(file_attr: u32) -> Option<u32> {
    if file_attr & S_IFMT == S_IFREG {
        Some(file_attr & 0o7777)
    } else {
        None
    }
}

fn is_unix_symlink(file_attr: u32) -> bool {
    file_attr & S_IFMT == S_IFLNK
}

impl ArchiveFormat for RarArchive {
    fn extract(&mut self, dest: &DestDir, config: &ExtractConfig) -> Result<ExtractionReport> {
        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();

        let mut archive = unrar::Archive::new(&self.path).open_for_processing()?;
        while let Some(header) = archive.read_header()? {
            let entry = header.entry();
            let name = entry.filename.clone();
            let file_attr = entry.file_attr;
            debug!("rar entry {} (attr {file_attr:#o})", name.display());

            archive = if entry.is_directory() {
                common::create_directory(&name, dest, &mut report)?;
                header.skip()?
            } else if is_unix_symlink(file_attr) {
                common::skip_entry(&name, "symlink", &mut report);
                header.skip()?
            } else {
                let (data, next) = header.read()?;
                let mode = common::file_mode(rar_mode(file_attr), config);
                common::extract_file(
                    &mut Cursor::new(data),
                    &name,
                    mode,
                    dest,
                    &mut report,
                    &mut buffer,
                )?;
                next
            };
        }

        Ok(report)
    }

    fn format_name(&self) -> &'static str {
        "rar"
    }
}

impl From<unrar::error::UnrarError> for ExtractionError {
    fn from(err: unrar::error::UnrarError) -> Self {
        Self::InvalidArchive(format!("rar: {err}"))
    }
}
