//! Materializes a single file entry on disk.

use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Write buffer size, matching the copy buffer.
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes `reader` to `path`, creating or truncating the file.
///
/// On Unix a newly created file gets `mode` (subject to the process umask).
/// An existing file is truncated and keeps its mode. Parent directories
/// must already exist. The file is flushed and closed on every exit path.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the copy fails.
///
/// # Examples
///
/// ```no_run
/// use std::io::Cursor;
/// use std::path::Path;
/// use unpacker_core::copy::CopyBuffer;
/// use unpacker_core::extraction::writer::write_entry;
///
/// let mut buffer = CopyBuffer::new();
/// let written = write_entry(
///     &mut Cursor::new(b"hello"),
///     Path::new("/tmp/out/a.txt"),
///     0o644,
///     &mut buffer,
/// )?;
/// assert_eq!(written, 5);
/// # Ok::<(), unpacker_core::ExtractionError>(())
/// ```
pub fn write_entry<R: Read + ?Sized>(
    reader: &mut R,
    path: &Path,
    mode: u32,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let file = options.open(path)?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    let written = copy_with_buffer(reader, &mut writer, buffer)?;
    writer.flush()?;

    Ok(written)
}
