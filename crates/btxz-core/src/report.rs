//! Extraction operation reporting.

use std::time::Duration;

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Format version of the extracted archive.
    pub version: u16,

    /// Number of files successfully extracted.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Entries of other types (links, devices) that were not written.
    pub entries_ignored: usize,

    /// Names of entries refused by the path guard, in archive order.
    pub skipped: Vec<String>,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// One line per ignored entry, in archive order.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Records an entry refused by the path guard.
    pub fn add_skipped(&mut self, name: impl Into<String>) {
        self.skipped.push(name.into());
    }

    /// Returns whether any entries were skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
