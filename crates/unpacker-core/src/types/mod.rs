//! Path types used while materializing entries.
//!
//! Both types are validated on construction: a `DestDir` always names an
//! existing directory and an `EntryPath` always stays inside it.

pub mod dest_dir;
pub mod entry_path;

pub use dest_dir::DestDir;
pub use entry_path::EntryPath;
