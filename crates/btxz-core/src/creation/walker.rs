//! Input tree walking.
//!
//! A directory input contributes everything beneath it, named relative to
//! that directory; the directory itself is not an entry. A file input
//! contributes one entry named by its file name. Traversal order is sorted
//! by file name so the same tree always packs identically.

use std::fs::Metadata;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::ArchiveError;
use crate::Result;
use crate::creation::config::CreationConfig;

/// Walks one directory input, applying the hidden-file and symlink rules of
/// a `CreationConfig`.
///
/// # Examples
///
/// ```no_run
/// use btxz_core::CreationConfig;
/// use btxz_core::creation::walker::FilteredWalker;
/// use std::path::Path;
///
/// let config = CreationConfig::default();
/// let walker = FilteredWalker::new(Path::new("./project"), &config);
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("Would add: {}", entry.archive_path.display());
/// }
/// # Ok::<(), btxz_core::ArchiveError>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    config: &'a CreationConfig,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a new filtered walker for the given root directory.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a CreationConfig) -> Self {
        Self { root, config }
    }

    /// Returns an iterator over entries under the root, excluding the root.
    ///
    /// Hidden directories are pruned as a whole when `include_hidden` is
    /// off. Symlinks are reported as [`EntryType::Symlink`] unless
    /// `follow_symlinks` is on, in which case their targets are walked.
    pub fn walk(&self) -> impl Iterator<Item = Result<FilteredEntry>> + '_ {
        let include_hidden = self.config.include_hidden;

        WalkDir::new(self.root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| include_hidden || !is_hidden(e.path()))
            .map(move |entry| {
                let entry = entry.map_err(|e| {
                    ArchiveError::io(
                        format!("failed while walking {}", self.root.display()),
                        e.into(),
                    )
                })?;
                self.build_filtered_entry(&entry)
            })
    }

    fn build_filtered_entry(&self, entry: &walkdir::DirEntry) -> Result<FilteredEntry> {
        let path = entry.path().to_path_buf();
        let archive_path = path
            .strip_prefix(self.root)
            .map_err(|_| {
                ArchiveError::io(
                    format!("{} is outside {}", path.display(), self.root.display()),
                    std::io::Error::other("walk escaped its root"),
                )
            })?
            .to_path_buf();

        let entry_type = if entry.file_type().is_symlink() {
            EntryType::Symlink
        } else if entry.file_type().is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };

        let metadata = entry.metadata().map_err(|e| {
            ArchiveError::io(
                format!("cannot read metadata for {}", path.display()),
                e.into(),
            )
        })?;

        Ok(FilteredEntry::new(path, archive_path, entry_type, &metadata))
    }
}

/// A walked entry with its archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Relative path stored in the archive.
    pub archive_path: PathBuf,

    /// Type of entry.
    pub entry_type: EntryType,

    /// Permission bits (`0o7777` mask).
    pub mode: u32,

    /// Size in bytes (0 for directories).
    pub size: u64,
}

impl FilteredEntry {
    fn new(path: PathBuf, archive_path: PathBuf, entry_type: EntryType, metadata: &Metadata) -> Self {
        let size = if entry_type == EntryType::File {
            metadata.len()
        } else {
            0
        };
        Self {
            path,
            archive_path,
            mode: permission_bits(metadata),
            entry_type,
            size,
        }
    }
}

/// Type of walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link that was not followed.
    Symlink,
}

/// Collects entries from every input in order.
///
/// # Errors
///
/// Returns `SourceNotFound` if an input does not exist, or a `Resource`
/// error if traversal or metadata reads fail.
pub fn collect_entries<P: AsRef<Path>>(
    inputs: &[P],
    config: &CreationConfig,
) -> Result<Vec<FilteredEntry>> {
    let mut entries = Vec::new();

    for input in inputs {
        let path = input.as_ref();

        let link_metadata = std::fs::symlink_metadata(path).map_err(|_| {
            ArchiveError::SourceNotFound {
                path: path.to_path_buf(),
            }
        })?;

        let metadata = if link_metadata.is_symlink() && config.follow_symlinks {
            std::fs::metadata(path).map_err(|_| ArchiveError::SourceNotFound {
                path: path.to_path_buf(),
            })?
        } else {
            link_metadata
        };

        if metadata.is_dir() {
            let walker = FilteredWalker::new(path, config);
            for entry in walker.walk() {
                entries.push(entry?);
            }
            continue;
        }

        if !config.include_hidden && is_hidden(path) {
            tracing::debug!(path = %path.display(), "skipping hidden input");
            continue;
        }

        let name = path.file_name().ok_or_else(|| {
            ArchiveError::io(
                format!("cannot determine file name for {}", path.display()),
                std::io::Error::from(std::io::ErrorKind::InvalidInput),
            )
        })?;

        let entry_type = if metadata.is_symlink() {
            EntryType::Symlink
        } else {
            EntryType::File
        };

        entries.push(FilteredEntry::new(
            path.to_path_buf(),
            PathBuf::from(name),
            entry_type,
            &metadata,
        ));
    }

    Ok(entries)
}

/// Checks if the final path component starts with '.'.
#[must_use]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    }
}
