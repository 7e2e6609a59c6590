//! Archive format implementations.

pub mod common;
pub mod detect;
pub mod fallback;
pub mod rar;
pub mod sevenz;
pub mod system_unzip;
pub mod tar;
pub mod traits;
pub mod zip;

pub use detect::ArchiveType;
pub use fallback::FallbackPolicy;
pub use rar::RarArchive;
pub use sevenz::SevenZArchive;
pub use system_unzip::SystemUnzip;
pub use tar::TarGzArchive;
pub use traits::ArchiveFormat;
pub use zip::InProcessZip;
pub use zip::ZipExtractor;
