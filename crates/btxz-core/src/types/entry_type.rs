//! Container entry type enumeration.

use std::fmt;

/// Type of entry in a container, as far as extraction cares.
///
/// Everything that is neither a regular file nor a directory (symlinks,
/// hardlinks, devices, FIFOs) is `Other`: listed, counted, never written.
///
/// # Examples
///
/// ```
/// use btxz_core::types::EntryType;
///
/// assert_eq!(EntryType::from(tar::EntryType::Regular), EntryType::File);
/// assert_eq!(EntryType::from(tar::EntryType::Symlink), EntryType::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Any other tar entry type.
    Other,
}

impl EntryType {
    /// Lowercase name used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other => "other",
        }
    }

    /// Leading character of an `ls -l` style mode string.
    #[must_use]
    pub const fn mode_char(self) -> char {
        match self {
            Self::File => '-',
            Self::Directory => 'd',
            Self::Other => '?',
        }
    }
}

impl From<tar::EntryType> for EntryType {
    fn from(kind: tar::EntryType) -> Self {
        match kind {
            tar::EntryType::Regular | tar::EntryType::Continuous => Self::File,
            tar::EntryType::Directory => Self::Directory,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_char() {
        assert_eq!(EntryType::File.mode_char(), '-');
        assert_eq!(EntryType::Directory.mode_char(), 'd');
        assert_eq!(EntryType::Other.mode_char(), '?');
    }

    #[test]
    fn test_from_tar_types() {
        assert_eq!(EntryType::from(tar::EntryType::Regular), EntryType::File);
        assert_eq!(EntryType::from(tar::EntryType::Continuous), EntryType::File);
        assert_eq!(
            EntryType::from(tar::EntryType::Directory),
            EntryType::Directory
        );
        for other in [
            tar::EntryType::Symlink,
            tar::EntryType::Link,
            tar::EntryType::Char,
            tar::EntryType::Block,
            tar::EntryType::Fifo,
        ] {
            assert_eq!(EntryType::from(other), EntryType::Other, "{other:?}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(EntryType::File.to_string(), "file");
        assert_eq!(EntryType::Directory.to_string(), "directory");
        assert_eq!(EntryType::Other.to_string(), "other");
    }
}
