//! Common traits for archive format handlers.

use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::types::DestDir;

/// Trait for archive format handlers.
pub trait ArchiveFormat {
    /// Extracts every entry of the archive below `dest`.
    ///
    /// Entries are processed in storage order. The first failing entry
    /// aborts the remaining ones; entries already written stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be decoded, an entry name is
    /// unsafe, or writing to the destination fails.
    fn extract(&mut self, dest: &DestDir, config: &ExtractConfig) -> Result<ExtractionReport>;

    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;
}
