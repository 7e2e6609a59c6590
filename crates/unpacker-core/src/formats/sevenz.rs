//! 7z archive format extraction.
//!
//! The archive index is read once up front so every entry is known before
//! anything is written. Encrypted archives are rejected.
//!
//! Unix permissions and symlinks are recovered from the high 16 bits of the
//! Windows attributes, where p7zip and 7-Zip store `st_mode` when the
//! `0x8000` extension flag is set. Symlinks are skipped like in the other
//! formats.
//!
//! # Examples
//!
//! ```no_run
//! use std::fs::File;
//! use unpacker_core::ExtractConfig;
//! use unpacker_core::formats::SevenZArchive;
//! use unpacker_core::formats::traits::ArchiveFormat;
//! use unpacker_core::types::DestDir;
//!
//! # fn main() -> Result<(), unpacker_core::ExtractionError> {
//! let file = File::open("archive.7z")?;
//! let mut archive = SevenZArchive::new(file)?;
//! let dest = DestDir::create("/output")?;
//! let report = archive.extract(&dest, &ExtractConfig::default())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use sevenz_rust2::Archive;
use sevenz_rust2::Password;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::types::DestDir;

use super::common;
use super::traits::ArchiveFormat;

/// Windows attribute flag marking `st_mode` in the high 16 bits.
const UNIX_EXTENSION: u32 = 0x8000;
const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// Cached entry metadata from the initial index read.
#[derive(Debug, Clone)]
struct CachedEntry {
    name: String,
    is_directory: bool,
}

/// 7z archive handler.
#[derive(Debug)]
pub struct SevenZArchive<R: Read + Seek> {
    source: R,
    entries: Vec<CachedEntry>,
}

impl<R: Read + Seek> SevenZArchive<R> {
    /// Opens a 7z archive and reads its index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArchive` if the source is empty, is not a 7z archive,
    /// or is encrypted.
    pub fn new(mut source: R) -> Result<Self> {
        let size = source.seek(SeekFrom::End(0))?;
        if size == 0 {
            return Err(ExtractionError::InvalidArchive(
                "7z: archive is empty".into(),
            ));
        }
        source.rewind()?;

        let archive = Archive::read(&mut source, &Password::empty()).map_err(|e| {
            let message = e.to_string();
            let lower = message.to_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                ExtractionError::InvalidArchive(format!(
                    "7z: encrypted archives are not supported ({message})"
                ))
            } else {
                ExtractionError::InvalidArchive(format!("7z: {message}"))
            }
        })?;

        let entries = archive
            .files
            .iter()
            .map(|e| CachedEntry {
                name: e.name.clone(),
                is_directory: e.is_directory(),
            })
            .collect();

        source.rewind()?;

        Ok(Self { source, entries })
    }

    /// Number of entries in the archive index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in storage order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Returns the Unix `st_mode` stored in an entry's attributes, if any.
fn unix_mode(entry: &sevenz_rust2::ArchiveEntry) -> Option<u32> {
    if entry.has_windows_attributes && entry.windows_attributes & UNIX_EXTENSION != 0 {
        Some(entry.windows_attributes >> 16)
    } else {
        None
    }
}

/// Materializes one entry. Called from the decoder callback.
fn extract_entry(
    entry: &sevenz_rust2::ArchiveEntry,
    reader: &mut dyn Read,
    dest: &DestDir,
    config: &ExtractConfig,
    report: &mut ExtractionReport,
    buffer: &mut CopyBuffer,
) -> Result<()> {
    let path = Path::new(&entry.name);
    let st_mode = unix_mode(entry);

    if entry.is_directory() {
        return common::create_directory(path, dest, report);
    }
    if st_mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
        common::skip_entry(path, "symlink", report);
        return Ok(());
    }

    let mode = common::file_mode(st_mode, config);
    common::extract_file(reader, path, mode, dest, report, buffer)
}

impl<R: Read + Seek> ArchiveFormat for SevenZArchive<R> {
    fn extract(&mut self, dest: &DestDir, config: &ExtractConfig) -> Result<ExtractionReport> {
        debug!(
            "7z archive with {} entries ({} directories)",
            self.entries.len(),
            self.entries.iter().filter(|e| e.is_directory).count()
        );

        let report = RefCell::new(ExtractionReport::new());
        let buffer = RefCell::new(CopyBuffer::new());
        let failure: RefCell<Option<ExtractionError>> = RefCell::new(None);

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            let outcome = extract_entry(
                entry,
                reader,
                dest,
                config,
                &mut report.borrow_mut(),
                &mut buffer.borrow_mut(),
            );
            match outcome {
                Ok(()) => Ok(true),
                Err(err) => {
                    let message = format!("{}: {err}", entry.name);
                    *failure.borrow_mut() = Some(err);
                    Err(sevenz_rust2::Error::Other(message.into()))
                }
            }
        };

        let result = sevenz_rust2::decompress_with_extract_fn(
            &mut self.source,
            dest.as_path(),
            extract_fn,
        );

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        result?;

        Ok(report.into_inner())
    }

    fn format_name(&self) -> &'static str {
        "7z"
    }
}

impl From<sevenz_rust2::Error> for ExtractionError {
    fn from(err: sevenz_rust2::Error) -> Self {
        Self::InvalidArchive(format!("7z: {err}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

    fn load_fixture(name: &str) -> Vec<u8> {
        let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../tests/fixtures")
            .join(name);

        std::fs::read(&fixture_path).unwrap_or_else(|e| {
            panic!(
                "Failed to load fixture {name}. Run tests/fixtures/generate_fixtures.sh first. Error: {e}"
            )
        })
    }

    #[test]
    fn test_empty_source_rejected() {
        let result = SevenZArchive::new(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    }

    #[test]
    fn test_truncated_header_rejected() {
        let result = SevenZArchive::new(Cursor::new(SEVENZ_MAGIC.to_vec()));
        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    }

    #[test]
    fn test_invalid_magic_rejected() {
        let data = vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05];
        let result = SevenZArchive::new(Cursor::new(data));
        assert!(matches!(result, Err(ExtractionError::InvalidArchive(_))));
    }

    #[test]
    fn test_index_read_up_front() {
        let archive = SevenZArchive::new(Cursor::new(load_fixture("sample.7z"))).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(!archive.is_empty());
        let names: Vec<&str> = archive.entry_names().collect();
        assert!(names.contains(&"a.txt"));
        assert!(names.contains(&"sub/b.txt"));
    }

    #[test]
    fn test_extract_fixture() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).unwrap();
        let mut archive = SevenZArchive::new(Cursor::new(load_fixture("sample.7z"))).unwrap();

        let report = archive.extract(&dest, &ExtractConfig::default()).unwrap();

        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.bytes_written, 10);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("a.txt")).unwrap(),
            "hello"
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("sub/b.txt")).unwrap(),
            "world"
        );
        assert!(temp.path().join("sub").is_dir());
    }

    #[test]
    fn test_format_name() {
        let archive = SevenZArchive::new(Cursor::new(load_fixture("sample.7z"))).unwrap();
        assert_eq!(archive.format_name(), "7z");
    }

    #[test]
    fn test_unix_mode_from_attributes() {
        let mut entry = sevenz_rust2::ArchiveEntry::default();
        assert_eq!(unix_mode(&entry), None);

        entry.has_windows_attributes = true;
        entry.windows_attributes = 0x20;
        assert_eq!(unix_mode(&entry), None);

        entry.windows_attributes = (0o100_755 << 16) | UNIX_EXTENSION | 0x20;
        assert_eq!(unix_mode(&entry), Some(0o100_755));
    }
}
