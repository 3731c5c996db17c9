//! Archive format versions and dispatch.
//!
//! [`Codec::parse`] peeks the signature and version, then decodes the
//! matching header. v3 is read/write; v1 and v2 are read-only.

pub mod compression;
pub mod detect;
pub mod header;
pub mod legacy;
pub mod traits;

pub use header::HeaderV3;
pub use legacy::HeaderV1;
pub use legacy::HeaderV2;
pub use traits::FormatCodec;

use crate::ArchiveError;
use crate::Result;

/// Version written by `create`.
pub const CURRENT_VERSION: u16 = header::VERSION_V3;

/// Longest header of any known version.
pub const MAX_HEADER_LEN: usize = header::HEADER_V3_LEN;

/// A parsed header, one variant per known format version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codec {
    /// AES-256-GCM over tar.xz.
    V1(HeaderV1),
    /// AES-256-GCM over tar.zst.
    V2(HeaderV2),
    /// XChaCha20-Poly1305 over tar.xz.
    V3(HeaderV3),
}

impl Codec {
    /// Identifies the version and decodes its header.
    ///
    /// The signature is checked before anything else, so a foreign file
    /// never reaches key derivation.
    ///
    /// # Errors
    ///
    /// `NotRecognized`, `HeaderTruncated`, or `UnsupportedVersion`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let version = detect::peek_version(bytes)?;
        let codec = match version {
            legacy::VERSION_V1 => Self::V1(HeaderV1::decode(bytes)?),
            legacy::VERSION_V2 => Self::V2(HeaderV2::decode(bytes)?),
            header::VERSION_V3 => Self::V3(HeaderV3::decode(bytes)?),
            other => return Err(ArchiveError::UnsupportedVersion { version: other }),
        };
        tracing::debug!(version, "archive header parsed");
        Ok(codec)
    }

    /// The version-specific codec behind this header.
    #[must_use]
    pub fn codec(&self) -> &dyn FormatCodec {
        match self {
            Self::V1(h) => h,
            Self::V2(h) => h,
            Self::V3(h) => h,
        }
    }

    /// Fails with `IntegrityCheckUnsupported` unless the version supports
    /// `test`.
    pub fn require_integrity_test(&self) -> Result<()> {
        let codec = self.codec();
        if codec.supports_integrity_test() {
            Ok(())
        } else {
            Err(ArchiveError::IntegrityCheckUnsupported {
                version: codec.version(),
            })
        }
    }
}
