//! Archive format detection by file extension.

use std::fmt;
use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveType {
    /// Gzip-compressed tar archive (`.tar.gz`, `.tgz`).
    TarGz,
    /// ZIP archive.
    Zip,
    /// RAR archive.
    Rar,
    /// 7z archive.
    SevenZ,
}

impl ArchiveType {
    /// Maps a classified extension onto a format.
    ///
    /// Matching is case-sensitive: `.ZIP` is not a zip archive here.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".tar.gz" | ".tgz" => Some(Self::TarGz),
            ".zip" => Some(Self::Zip),
            ".rar" => Some(Self::Rar),
            ".7z" => Some(Self::SevenZ),
            _ => None,
        }
    }

    /// Short format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZ => "7z",
        }
    }

    /// Name of the extraction operation, as used in error prefixes
    /// (`Error during unzip:`).
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::TarGz => "untar",
            Self::Zip => "unzip",
            Self::Rar => "unrar",
            Self::SevenZ => "un7z",
        }
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the extension of `path` as used for format dispatch.
///
/// The extension is the file name from its last `.` to the end, with the
/// dot. A name ending in `.tar.gz` yields `.tar.gz`. A name without a dot
/// yields the empty string.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unpacker_core::formats::detect::detect_extension;
///
/// assert_eq!(detect_extension(Path::new("backup.tar.gz")), ".tar.gz");
/// assert_eq!(detect_extension(Path::new("notes.txt.gz")), ".gz");
/// assert_eq!(detect_extension(Path::new("dir.v2/archive.ZIP")), ".ZIP");
/// assert_eq!(detect_extension(Path::new("README")), "");
/// ```
#[must_use]
pub fn detect_extension(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();

    let Some(dot) = name.rfind('.') else {
        return String::new();
    };
    let extension = &name[dot..];

    if extension == ".gz" && name.ends_with(".tar.gz") {
        return ".tar.gz".to_string();
    }
    extension.to_string()
}

/// Detects the archive type from a file path.
///
/// # Errors
///
/// Returns `UnsupportedFormat` carrying the classified extension if it is
/// not one of `.tar.gz`, `.tgz`, `.zip`, `.rar` or `.7z`.
pub fn detect_format(path: &Path) -> Result<ArchiveType> {
    let extension = detect_extension(path);
    ArchiveType::from_extension(&extension)
        .ok_or(ExtractionError::UnsupportedFormat { extension })
}
