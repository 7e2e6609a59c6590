//! Gzip-compressed tar archive extraction.

use std::io::Read;

use flate2::read::MultiGzDecoder;
use log::debug;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::types::DestDir;

use super::common;
use super::traits::ArchiveFormat;

/// Tar.gz archive handler.
///
/// The gzip layer accepts concatenated members, as produced by `cat a.gz
/// b.gz` or parallel compressors.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use unpacker_core::ExtractConfig;
/// use unpacker_core::formats::TarGzArchive;
/// use unpacker_core::formats::traits::ArchiveFormat;
/// use unpacker_core::types::DestDir;
///
/// let file = File::open("archive.tar.gz")?;
/// let dest = DestDir::create("/tmp/output")?;
/// let report = TarGzArchive::new(file).extract(&dest, &ExtractConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), unpacker_core::ExtractionError>(())
/// ```
#[derive(Debug)]
pub struct TarGzArchive<R: Read> {
    source: R,
}

impl<R: Read> TarGzArchive<R> {
    /// Creates a new tar.gz archive handler over a compressed stream.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self { source }
    }
}

impl<R: Read> ArchiveFormat for TarGzArchive<R> {
    fn extract(&mut self, dest: &DestDir, config: &ExtractConfig) -> Result<ExtractionReport> {
        let mut archive = tar::Archive::new(MultiGzDecoder::new(&mut self.source));
        let mut report = ExtractionReport::new();
        let mut buffer = CopyBuffer::new();

        let entries = archive.entries().map_err(invalid_tar)?;
        for entry in entries {
            let mut entry = entry.map_err(invalid_tar)?;
            let path = entry.path().map_err(invalid_tar)?.into_owned();
            let entry_type = entry.header().entry_type();

            if entry_type.is_dir() {
                common::create_directory(&path, dest, &mut report)?;
            } else if entry_type.is_file() || entry_type.is_contiguous() {
                let mode = entry.header().mode().ok();
                let mode = common::file_mode(mode, config);
                common::extract_file(&mut entry, &path, mode, dest, &mut report, &mut buffer)?;
            } else if entry_type.is_pax_global_extensions() {
                debug!("ignoring pax global header");
            } else {
                common::skip_entry(&path, entry_kind(entry_type), &mut report);
            }
        }

        Ok(report)
    }

    fn format_name(&self) -> &'static str {
        "tar.gz"
    }
}

fn invalid_tar(err: std::io::Error) -> ExtractionError {
    ExtractionError::InvalidArchive(format!("tar.gz: {err}"))
}

fn entry_kind(entry_type: tar::EntryType) -> &'static str {
    if entry_type.is_symlink() {
        "symlink"
    } else if entry_type.is_hard_link() {
        "hard link"
    } else if entry_type.is_character_special() || entry_type.is_block_special() {
        "device"
    } else if entry_type.is_fifo() {
        "fifo"
    } else {
        "unsupported"
    }
}
