//! Error conversion utilities for CLI.
//!
//! Converts unpacker-core's typed errors (thiserror) into user-facing
//! errors (anyhow) prefixed with the failing operation and, where there is
//! something the user can do, a hint.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unpacker_core::ExtractionError;
use unpacker_core::formats::detect::detect_format;

const SUPPORTED_FORMATS: &str = ".zip, .tar.gz, .tgz, .rar, .7z";

/// "Error during unzip:" and friends, or plain "Error:" when the extension
/// is not recognized.
fn operation_prefix(archive: &Path) -> String {
    detect_format(archive).map_or_else(
        |_| "Error:".to_string(),
        |format| format!("Error during {}:", format.operation()),
    )
}

/// Converts `ExtractionError` to a user-facing anyhow error.
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    let prefix = operation_prefix(archive);
    match err {
        ExtractionError::NotFound { path } => {
            anyhow!("No such file: {}", path.display())
        }
        ExtractionError::UnsupportedFormat { extension } => {
            let shown = if extension.is_empty() {
                "(none)".to_string()
            } else {
                extension
            };
            anyhow!(
                "Unsupported file format: {shown}\n\
                 HINT: Supported formats: {SUPPORTED_FORMATS}"
            )
        }
        ExtractionError::PasswordRequired => {
            anyhow!(
                "{prefix} '{}' is encrypted and no password was provided\n\
                 HINT: Pass the password with -p <PASSWORD>.",
                archive.display()
            )
        }
        ExtractionError::Decryption(reason) => {
            anyhow!(
                "{prefix} decryption failed: {reason}\n\
                 HINT: Check the password given with -p."
            )
        }
        ExtractionError::FallbackUnavailable => {
            anyhow!(
                "{prefix} the built-in decoder could not read '{}' and the system unzip utility was not found\n\
                 HINT: Install unzip (Info-ZIP) or check the password.",
                archive.display()
            )
        }
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "{prefix} archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "{prefix} invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display()
            )
        }
        other => anyhow!("{prefix} {other}"),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_operation_prefix() {
        assert_eq!(operation_prefix(Path::new("a.zip")), "Error during unzip:");
        assert_eq!(operation_prefix(Path::new("a.tar.gz")), "Error during untar:");
        assert_eq!(operation_prefix(Path::new("a.tgz")), "Error during untar:");
        assert_eq!(operation_prefix(Path::new("a.rar")), "Error during unrar:");
        assert_eq!(operation_prefix(Path::new("a.7z")), "Error during un7z:");
        assert_eq!(operation_prefix(Path::new("a.gz")), "Error:");
    }

    #[test]
    fn test_convert_not_found() {
        let err = ExtractionError::NotFound {
            path: PathBuf::from("missing.zip"),
        };
        let msg = convert_extraction_error(err, Path::new("missing.zip")).to_string();
        assert_eq!(msg, "No such file: missing.zip");
    }

    #[test]
    fn test_convert_unsupported_format() {
        let err = ExtractionError::UnsupportedFormat {
            extension: ".gz".into(),
        };
        let msg = convert_extraction_error(err, Path::new("notes.gz")).to_string();
        assert!(msg.starts_with("Unsupported file format: .gz"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_password_required() {
        let err = ExtractionError::PasswordRequired;
        let msg = convert_extraction_error(err, Path::new("secret.zip")).to_string();
        assert!(msg.starts_with("Error during unzip:"));
        assert!(msg.contains("-p <PASSWORD>"));
    }

    #[test]
    fn test_convert_path_traversal_error() {
        let err = ExtractionError::PathTraversal {
            path: PathBuf::from("../../../etc/passwd"),
        };
        let msg = convert_extraction_error(err, Path::new("malicious.tar.gz")).to_string();
        assert!(msg.starts_with("Error during untar:"));
        assert!(msg.contains("path traversal"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ExtractionError::Io(io_err);
        let msg = convert_extraction_error(err, Path::new("archive.7z")).to_string();
        assert!(msg.starts_with("Error during un7z:"));
        assert!(msg.contains("I/O error"));
    }
}
