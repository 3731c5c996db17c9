//! Path traversal validation.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Resolves `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root, as the OS would resolve it.
///
/// # Examples
///
/// ```
/// use btxz_core::security::path::normalize_lexically;
/// use std::path::Path;
///
/// assert_eq!(
///     normalize_lexically(Path::new("/out/a/../b/./c")),
///     Path::new("/out/b/c")
/// );
/// assert_eq!(
///     normalize_lexically(Path::new("/out/../../outside.txt")),
///     Path::new("/outside.txt")
/// );
/// ```
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }

    normalized
}
