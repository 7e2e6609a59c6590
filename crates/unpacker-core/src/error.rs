//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur during archive extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive file does not exist.
    #[error("no such file: {path}")]
    NotFound {
        /// The missing archive path.
        path: PathBuf,
    },

    /// Archive extension is not one of the recognized formats.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The extension as classified, e.g. `.gz` or `.xyz`.
        extension: String,
    },

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry name resolves outside the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// The zip archive holds encrypted entries and no password was given.
    #[error("archive is encrypted, no password provided")]
    PasswordRequired,

    /// An encrypted entry could not be decrypted.
    ///
    /// Either the password is wrong or the cipher is not supported by the
    /// in-process decoder.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// An entry exists but the in-process decoder cannot read it.
    #[error("cannot read entry {name}: {reason}")]
    UnreadableEntry {
        /// Entry name as stored in the archive.
        name: String,
        /// Decoder message.
        reason: String,
    },

    /// The system `unzip` binary is not on `PATH`.
    #[error("system unzip utility not found")]
    FallbackUnavailable,

    /// The system `unzip` binary ran and exited unsuccessfully.
    #[error("system unzip failed: {status}\n{output}")]
    FallbackFailed {
        /// Exit status description.
        status: String,
        /// Combined stdout and stderr of the subprocess.
        output: String,
    },
}

impl ExtractionError {
    /// Returns `true` if the in-process zip attempt may be retried with the
    /// system `unzip` binary.
    ///
    /// Recoverable errors are filesystem failures, decryption failures and
    /// entries the in-process decoder cannot read. Missing passwords,
    /// malformed archives and unsafe entry names are final.
    ///
    /// # Examples
    ///
    /// ```
    /// use unpacker_core::ExtractionError;
    ///
    /// let err = ExtractionError::Decryption("invalid password".to_string());
    /// assert!(err.is_recoverable());
    ///
    /// let err = ExtractionError::PasswordRequired;
    /// assert!(!err.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Decryption(_) | Self::UnreadableEntry { .. }
        )
    }

    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the archive contents or the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use unpacker_core::ExtractionError;
    ///
    /// let err = ExtractionError::UnsupportedFormat {
    ///     extension: ".xyz".to_string(),
    /// };
    /// assert!(err.is_input_error());
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".to_string());
    /// assert!(!err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::UnsupportedFormat { .. } | Self::PasswordRequired
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use unpacker_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// let err = ExtractionError::PasswordRequired;
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::Decryption(msg) => Some(msg),
            Self::UnreadableEntry { reason, .. } => Some(reason),
            Self::FallbackFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}
