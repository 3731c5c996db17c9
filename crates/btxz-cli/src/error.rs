//! Error conversion utilities for CLI.
//!
//! Converts btxz-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use btxz_core::ArchiveError;
use std::path::Path;

/// The one message shown for any authentication failure.
pub const ACCESS_DENIED: &str = "Access denied: incorrect password or corrupted archive";

/// Converts `ArchiveError` to a user-facing anyhow error with context.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::DecryptionFailed => anyhow!(ACCESS_DENIED),
        ArchiveError::NotRecognized => {
            anyhow!(
                "'{}' is not a btxz archive\n\
                 HINT: The file signature does not match; check the path.",
                archive.display()
            )
        }
        ArchiveError::HeaderTruncated { expected, actual } => {
            anyhow!(
                "Archive '{}' is truncated: header needs {expected} bytes, file has {actual}\n\
                 HINT: The file may be incomplete; copy it again.",
                archive.display()
            )
        }
        ArchiveError::UnsupportedVersion { version } => {
            anyhow!(
                "Unsupported archive version {version} in '{}'\n\
                 HINT: The archive was written by a newer release; upgrade btxz.",
                archive.display()
            )
        }
        ArchiveError::IntegrityCheckUnsupported { version } => {
            anyhow!(
                "Integrity test is not available for version {version} archives\n\
                 HINT: 'btxz extract' and 'btxz list' still read them."
            )
        }
        ArchiveError::CorruptStream(reason) => {
            anyhow!(
                "Archive '{}' is damaged after decryption: {reason}",
                archive.display()
            )
        }
        ArchiveError::SourceNotFound { path } => {
            anyhow!("Source not found: {}", path.display())
        }
        ArchiveError::EmptyPassword => {
            anyhow!("Password must not be empty")
        }
        ArchiveError::InvalidProfile(name) => {
            anyhow!(
                "Unknown level '{name}'\n\
                 HINT: Use low, default or max (aliases: fast, best)."
            )
        }
        other => anyhow::Error::from(other)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to an archive operation result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
