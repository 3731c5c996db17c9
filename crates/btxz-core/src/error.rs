//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while creating or reading an archive.
///
/// Path-safety violations are not errors: escaping entries are skipped and
/// reported through [`ExtractionReport::skipped`](crate::ExtractionReport).
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O operation failed during a named stage of the pipeline.
    #[error("{context}: {source}")]
    Resource {
        /// What was being done when the error occurred.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The leading signature is not `BTXZ`.
    #[error("not a recognized archive")]
    NotRecognized,

    /// The input ended before the header was complete.
    #[error("header truncated: expected {expected} bytes, got {actual}")]
    HeaderTruncated {
        /// Bytes required by the header layout.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The version field names no known codec.
    #[error("unsupported archive version: v{version}")]
    UnsupportedVersion {
        /// The version read from the header.
        version: u16,
    },

    /// `test` was requested on a legacy archive.
    #[error("integrity check not supported for this version (v{version})")]
    IntegrityCheckUnsupported {
        /// The legacy version.
        version: u16,
    },

    /// Wrong password or tampered ciphertext.
    ///
    /// Deliberately carries no detail.
    #[error("decryption failed: incorrect password or tampered archive")]
    DecryptionFailed,

    /// The AEAD primitive refused to seal the payload.
    #[error("encryption failed")]
    EncryptionFailed,

    /// Key derivation parameters are degenerate or out of range.
    #[error("invalid key derivation parameters: {reason}")]
    InvalidKdfParams {
        /// Which parameter was rejected.
        reason: String,
    },

    /// The decrypted container stream could not be decoded.
    #[error("data corruption detected: {0}")]
    CorruptStream(String),

    /// `create` was called with no inputs.
    #[error("no input files or folders specified")]
    NoInputs,

    /// `create` was called with an empty password.
    #[error("a password is required")]
    EmptyPassword,

    /// Profile name is not one of `low`, `default`, `max`.
    #[error("invalid profile '{0}': use low, default, or max")]
    InvalidProfile(String),

    /// An input path does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },
}

impl ArchiveError {
    /// Wraps an I/O error with the stage that produced it.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Resource {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` for signature, truncation, and version errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use btxz_core::ArchiveError;
    ///
    /// assert!(ArchiveError::NotRecognized.is_format_error());
    /// assert!(ArchiveError::UnsupportedVersion { version: 9 }.is_format_error());
    /// assert!(!ArchiveError::DecryptionFailed.is_format_error());
    /// ```
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::NotRecognized | Self::HeaderTruncated { .. } | Self::UnsupportedVersion { .. }
        )
    }

    /// Returns `true` if the archive could not be authenticated.
    ///
    /// Wrong passwords and tampered payloads are indistinguishable here.
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed)
    }

    /// Returns `true` if the error was caused by invalid caller input
    /// rather than by the archive or the filesystem.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::NoInputs
                | Self::EmptyPassword
                | Self::InvalidProfile(_)
                | Self::SourceNotFound { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use btxz_core::ArchiveError;
    ///
    /// let err = ArchiveError::CorruptStream("bad xz block".to_string());
    /// assert_eq!(err.context(), Some("bad xz block"));
    ///
    /// assert_eq!(ArchiveError::DecryptionFailed.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Resource { context, .. } => Some(context),
            Self::CorruptStream(msg) => Some(msg),
            Self::InvalidKdfParams { reason } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ArchiveError::NotRecognized.to_string(),
            "not a recognized archive"
        );
        assert_eq!(
            ArchiveError::UnsupportedVersion { version: 7 }.to_string(),
            "unsupported archive version: v7"
        );
    }

    #[test]
    fn test_decryption_failed_is_generic() {
        let msg = ArchiveError::DecryptionFailed.to_string();
        assert!(msg.contains("decryption failed"));
        assert!(msg.contains("incorrect password or tampered"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchiveError = io_err.into();
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_resource_error_keeps_source() {
        use std::error::Error;

        let err = ArchiveError::io(
            "could not create archive file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("could not create archive file"));
        assert!(err.source().is_some());
        assert_eq!(err.context(), Some("could not create archive file"));
    }

    #[test]
    fn test_classification() {
        assert!(ArchiveError::HeaderTruncated {
            expected: 56,
            actual: 3
        }
        .is_format_error());
        assert!(ArchiveError::DecryptionFailed.is_authentication_failure());
        assert!(!ArchiveError::NotRecognized.is_authentication_failure());
        assert!(ArchiveError::EmptyPassword.is_usage_error());
        assert!(!ArchiveError::CorruptStream("x".into()).is_usage_error());
    }
}
