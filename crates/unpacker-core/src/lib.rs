//! Archive extraction library for zip, tar.gz, rar and 7z.
//!
//! `unpacker-core` picks a decoder by file extension and writes the
//! archive's entries below a destination directory. Entry names that would
//! land outside the destination are rejected. Zip archives the in-process
//! decoder cannot read (unsupported compression, AES) are handed to the
//! system `unzip` binary when it is available.
//!
//! # Examples
//!
//! ```no_run
//! use unpacker_core::ExtractConfig;
//! use unpacker_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default().with_password("secret");
//! let report = extract_archive("archive.zip", "/output/dir", &config)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use api::extract_archive;
pub use archive::ArchiveBuilder;
pub use config::ExtractConfig;
pub use config::Password;
pub use error::ExtractionError;
pub use error::Result;
pub use formats::ArchiveType;
pub use report::ExtractionReport;

pub use types::DestDir;
pub use types::EntryPath;
