//! Validated relative path of an archive entry.

use crate::ExtractionError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// An entry name normalized into a path that stays inside the destination.
///
/// `.` components are dropped and `..` components are resolved lexically.
/// Names that are absolute, or whose `..` components climb above the
/// destination root, are rejected. `a/../b` is accepted and becomes `b`.
///
/// There is no `From<PathBuf>`; [`EntryPath::validate`] is the only
/// constructor.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unpacker_core::types::EntryPath;
///
/// let entry = EntryPath::validate(Path::new("./sub/../b.txt"))?;
/// assert_eq!(entry.as_path(), Path::new("b.txt"));
///
/// assert!(EntryPath::validate(Path::new("../etc/passwd")).is_err());
/// assert!(EntryPath::validate(Path::new("/etc/passwd")).is_err());
/// # Ok::<(), unpacker_core::ExtractionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    /// Normalizes an entry name.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::PathTraversal` for absolute names and names that
    ///   resolve above the destination root
    /// - `ExtractionError::InvalidArchive` for names containing null bytes
    pub fn validate(name: &Path) -> Result<Self> {
        if has_null_bytes(name) {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry name contains null bytes: {}",
                name.display()
            )));
        }

        let mut normalized = PathBuf::new();
        for component in name.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(ExtractionError::PathTraversal {
                            path: name.to_path_buf(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ExtractionError::PathTraversal {
                        path: name.to_path_buf(),
                    });
                }
            }
        }

        Ok(Self(normalized))
    }

    /// Returns `true` if the name normalized to the destination root itself
    /// (e.g. `./`).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns the normalized relative path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_relative_path() {
        let entry = EntryPath::validate(Path::new("foo/bar/baz.txt")).unwrap();
        assert_eq!(entry.as_path(), Path::new("foo/bar/baz.txt"));
        assert!(!entry.is_root());
    }

    #[test]
    fn test_current_dir_components_dropped() {
        let entry = EntryPath::validate(Path::new("./foo/./bar.txt")).unwrap();
        assert_eq!(entry.as_path(), Path::new("foo/bar.txt"));
    }

    #[test]
    fn test_directory_name_with_trailing_slash() {
        let entry = EntryPath::validate(Path::new("sub/")).unwrap();
        assert_eq!(entry.as_path(), Path::new("sub"));
    }

    #[test]
    fn test_inner_parent_dir_resolved() {
        let entry = EntryPath::validate(Path::new("a/b/../c.txt")).unwrap();
        assert_eq!(entry.as_path(), Path::new("a/c.txt"));
    }

    #[test]
    fn test_root_entry() {
        let entry = EntryPath::validate(Path::new("./")).unwrap();
        assert!(entry.is_root());
    }

    #[test]
    fn test_traversal_rejected() {
        for name in ["../etc/passwd", "foo/../../etc/passwd", "a/b/../../../x"] {
            assert!(
                matches!(
                    EntryPath::validate(Path::new(name)),
                    Err(ExtractionError::PathTraversal { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_absolute_rejected() {
        assert!(matches!(
            EntryPath::validate(Path::new("/etc/passwd")),
            Err(ExtractionError::PathTraversal { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_null_byte_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = Path::new(OsStr::from_bytes(b"file\0.txt"));
        assert!(matches!(
            EntryPath::validate(name),
            Err(ExtractionError::InvalidArchive(_))
        ));
    }
}
