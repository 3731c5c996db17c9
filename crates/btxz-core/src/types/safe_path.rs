//! Validated safe path type for archive extraction.

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use super::DestDir;
use crate::security::path::normalize_lexically;

/// Why an entry path was refused.
///
/// These are never surfaced as errors: the entry is skipped and its name
/// recorded in the extraction report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathViolation {
    /// The entry name contains a NUL byte.
    #[error("path contains null bytes")]
    NullByte,

    /// The entry name is absolute.
    #[error("absolute path")]
    Absolute,

    /// `..` components climb out of the destination.
    #[error("path escapes the destination directory")]
    EscapesRoot,

    /// An existing ancestor is a symlink leading outside the destination.
    #[error("symlinked parent leads outside the destination directory")]
    SymlinkEscape,

    /// An existing ancestor could not be resolved (e.g. a dangling symlink).
    #[error("path could not be resolved safely")]
    Unresolvable,
}

/// An entry path proven to stay inside a [`DestDir`].
///
/// Holds the normalized path relative to the destination. Can only be
/// built through [`SafePath::validate`]; there is no `From<PathBuf>`.
///
/// # Examples
///
/// ```no_run
/// use btxz_core::types::DestDir;
/// use btxz_core::types::SafePath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/out")?;
///
/// assert!(SafePath::validate(Path::new("docs/a.txt"), &dest).is_ok());
/// assert!(SafePath::validate(Path::new("../../outside.txt"), &dest).is_err());
/// assert!(SafePath::validate(Path::new("/etc/passwd"), &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Resolves `entry` against `dest` and checks containment.
    ///
    /// 1. Reject NUL bytes and absolute names.
    /// 2. Join to the destination and resolve `.`/`..` lexically.
    /// 3. Require the result to lie under the destination, comparing whole
    ///    components so `/out` does not contain `/outside`.
    /// 4. Canonicalize the nearest existing ancestor (or the target itself)
    ///    and require that to lie under the destination too.
    ///
    /// # Errors
    ///
    /// Returns the [`PathViolation`] that caused the refusal.
    pub fn validate(entry: &Path, dest: &DestDir) -> Result<Self, PathViolation> {
        if has_null_bytes(entry) {
            return Err(PathViolation::NullByte);
        }
        if entry.has_root() || entry.is_absolute() {
            return Err(PathViolation::Absolute);
        }

        let root = dest.as_path();
        let target = normalize_lexically(&root.join(entry));
        if !target.starts_with(root) {
            return Err(PathViolation::EscapesRoot);
        }

        check_existing_ancestor(&target, root)?;

        let relative = target
            .strip_prefix(root)
            .map_err(|_| PathViolation::EscapesRoot)?
            .to_path_buf();

        Ok(Self(relative))
    }

    /// Returns the normalized path relative to the destination.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if the entry resolves to the destination itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

fn check_existing_ancestor(target: &Path, root: &Path) -> Result<(), PathViolation> {
    let mut probe = Some(target);

    while let Some(path) = probe {
        match std::fs::symlink_metadata(path) {
            Ok(_) => {
                let canonical = path
                    .canonicalize()
                    .map_err(|_| PathViolation::Unresolvable)?;
                if canonical.starts_with(root) {
                    return Ok(());
                }
                return Err(PathViolation::SymlinkEscape);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => probe = path.parent(),
            Err(_) => return Err(PathViolation::Unresolvable),
        }
    }

    Ok(())
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
