//! Archive manifest types.

use crate::types::EntryType;

/// Contents of an archive, in container order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Format version of the archive.
    pub version: u16,

    /// Entries in the order they appear in the container.
    pub entries: Vec<ManifestEntry>,
}

impl ArchiveManifest {
    /// Creates an empty manifest for `version`.
    #[must_use]
    pub fn new(version: u16) -> Self {
        Self {
            version,
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Number of entries of any type.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Number of regular file entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.count(EntryType::File)
    }

    /// Number of directory entries.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.count(EntryType::Directory)
    }

    /// Sum of all entry sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    fn count(&self, kind: EntryType) -> usize {
        self.entries.iter().filter(|e| e.entry_type == kind).count()
    }
}

/// One container entry as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Entry name without a trailing `/`. Unsafe names are listed as-is.
    pub path: String,

    /// Stored size in bytes.
    pub size: u64,

    /// Stored permission bits.
    pub mode: u32,

    /// Entry type.
    pub entry_type: EntryType,
}

impl ManifestEntry {
    /// `ls -l` style mode string, e.g. `drwxr-xr-x`.
    #[must_use]
    pub fn mode_string(&self) -> String {
        const BITS: [(u32, char); 9] = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];

        let mut out = String::with_capacity(10);
        out.push(self.entry_type.mode_char());
        for (bit, ch) in BITS {
            out.push(if self.mode & bit == 0 { '-' } else { ch });
        }
        out
    }
}
