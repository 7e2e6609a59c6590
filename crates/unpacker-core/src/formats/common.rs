//! Entry handling shared by all format extractors.
//!
//! Every extractor validates the entry name, then calls
//! [`create_directory`] or [`extract_file`]. Counting and permission
//! handling live here so the formats agree on them.

use std::fs::create_dir_all;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::extraction::writer::write_entry;
use crate::types::DestDir;
use crate::types::EntryPath;

/// Mode used for files whose archive carries no usable permissions.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Strips setuid, setgid and sticky bits from an archived mode.
#[inline]
#[must_use]
pub const fn sanitize_mode(mode: u32) -> u32 {
    mode & 0o777
}

/// Picks the creation mode for a file entry.
#[must_use]
pub fn file_mode(archived: Option<u32>, config: &ExtractConfig) -> u32 {
    match archived {
        Some(mode) if config.preserve_permissions => sanitize_mode(mode),
        _ => DEFAULT_FILE_MODE,
    }
}

/// Creates the directory for a directory entry, along with missing
/// ancestors. Existing directories are fine.
///
/// # Errors
///
/// Returns an error if the name is unsafe or the directory cannot be
/// created.
pub fn create_directory(name: &Path, dest: &DestDir, report: &mut ExtractionReport) -> Result<()> {
    let entry = EntryPath::validate(name)?;
    let dir_path = dest.join(&entry);
    debug!("creating directory {}", dir_path.display());

    create_dir_all(&dir_path)?;
    report.directories_created += 1;

    Ok(())
}

/// Writes a file entry below `dest`, creating its parent directory first.
///
/// # Errors
///
/// Returns an error if the name is unsafe or empty, or if writing fails.
pub fn extract_file<R: Read + ?Sized>(
    reader: &mut R,
    name: &Path,
    mode: u32,
    dest: &DestDir,
    report: &mut ExtractionReport,
    buffer: &mut CopyBuffer,
) -> Result<()> {
    let entry = EntryPath::validate(name)?;
    if entry.is_root() {
        return Err(ExtractionError::InvalidArchive(format!(
            "file entry has an empty name: {}",
            name.display()
        )));
    }

    let output_path = dest.join(&entry);
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    debug!("extracting {} (mode {mode:o})", output_path.display());
    let written = write_entry(reader, &output_path, mode, buffer)?;

    report.files_extracted += 1;
    report.bytes_written = report.bytes_written.saturating_add(written);

    Ok(())
}

/// Records an entry that was not materialized.
pub fn skip_entry(name: &Path, kind: &str, report: &mut ExtractionReport) {
    let message = format!("skipped {kind} entry: {}", name.display());
    log::warn!("{message}");
    report.entries_skipped += 1;
    report.add_warning(message);
}
