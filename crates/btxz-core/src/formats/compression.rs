//! Compression codecs wrapped around the tar container.
//!
//! # Supported Codecs
//!
//! - **Xz** (LZMA2): written by v3, read for v1 and v3
//! - **Zstd**: read-only, for v2 archives

use std::io::Read;

use crate::ArchiveError;
use crate::Result;

/// Compression codec applied to the tar stream before encryption.
///
/// # Examples
///
/// ```
/// use btxz_core::formats::compression::CompressionCodec;
///
/// assert_eq!(CompressionCodec::Xz.name(), "xz");
/// assert_eq!(CompressionCodec::Zstd.name(), "zstd");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Xz compression (LZMA2 algorithm).
    Xz,

    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wraps `compressed` in a streaming decoder for this codec.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStream` if the decoder cannot be initialized.
    pub fn decoder<'a>(self, compressed: &'a [u8]) -> Result<Box<dyn Read + 'a>> {
        match self {
            Self::Xz => Ok(Box::new(xz2::read::XzDecoder::new(compressed))),
            Self::Zstd => zstd::stream::read::Decoder::new(compressed)
                .map(|d| Box::new(d) as Box<dyn Read + 'a>)
                .map_err(|e| {
                    ArchiveError::CorruptStream(format!("failed to create zstd reader: {e}"))
                }),
        }
    }
}
