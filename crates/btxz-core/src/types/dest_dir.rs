//! Canonical destination directory type.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// The canonical root an archive is extracted into.
///
/// Constructed once per extraction: the directory is created if missing and
/// canonicalized, so every containment check compares against a path with
/// no symlinks and no `.`/`..` components.
///
/// # Examples
///
/// ```no_run
/// use btxz_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/extraction")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory if needed and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns a `Resource` error if the path exists but is not a
    /// directory, cannot be created, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if path.exists() && !path.is_dir() {
            return Err(ArchiveError::io(
                format!("path is not a directory: {}", path.display()),
                std::io::Error::from(std::io::ErrorKind::InvalidInput),
            ));
        }

        std::fs::create_dir_all(&path).map_err(|e| {
            ArchiveError::io(
                format!("cannot create output directory {}", path.display()),
                e,
            )
        })?;

        let canonical = path.canonicalize().map_err(|e| {
            ArchiveError::io(format!("failed to canonicalize {}", path.display()), e)
        })?;

        Ok(Self(canonical))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a `SafePath` to this destination directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }
}
