//! Opened archives: header dispatch and payload decryption.
//!
//! Every read operation goes through the same steps: read the file, parse
//! and dispatch the header, derive the key, authenticate the whole payload,
//! then hand the decompressor a plaintext that is known to be genuine.

use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::ArchiveError;
use crate::Result;
use crate::formats::Codec;
use crate::formats::FormatCodec;
use crate::formats::compression::CompressionCodec;

/// An archive file whose header has been parsed.
pub struct Archive {
    path: PathBuf,
    codec: Codec,
    bytes: Vec<u8>,
}

impl Archive {
    /// Reads the archive and dispatches its header.
    ///
    /// # Errors
    ///
    /// Returns a `Resource` error if the file cannot be read, or a format
    /// error from header parsing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|e| {
            ArchiveError::io(format!("could not open archive {}", path.display()), e)
        })?;
        let codec = Codec::parse(&bytes)?;
        Ok(Self { path, codec, bytes })
    }

    /// Returns the path to the archive file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the dispatched header.
    #[must_use]
    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Format version of this archive.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.codec.codec().version()
    }

    /// The ciphertext following the header.
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        let start = self.codec.codec().header_len().min(self.bytes.len());
        &self.bytes[start..]
    }

    /// Derives the key and authenticates the payload.
    ///
    /// # Errors
    ///
    /// `DecryptionFailed` for a wrong password, any modification of the
    /// payload, or header costs outside the accepted range.
    pub fn decrypt(&self, password: &SecretString) -> Result<OpenedArchive> {
        let codec = self.codec.codec();
        let plaintext = codec.open_payload(password, self.ciphertext())?;

        tracing::debug!(
            version = codec.version(),
            compressed = plaintext.len(),
            "payload authenticated"
        );

        Ok(OpenedArchive {
            version: codec.version(),
            compression: codec.compression(),
            plaintext,
        })
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("codec", &self.codec)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An authenticated, still-compressed container.
pub struct OpenedArchive {
    version: u16,
    compression: CompressionCodec,
    plaintext: Zeroizing<Vec<u8>>,
}

impl OpenedArchive {
    /// Format version the payload came from.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Compression codec of the container.
    #[must_use]
    pub fn compression(&self) -> CompressionCodec {
        self.compression
    }

    /// Size of the compressed container in bytes.
    #[must_use]
    pub fn compressed_len(&self) -> usize {
        self.plaintext.len()
    }

    /// Streaming decompressor over the container.
    pub fn decompressed(&self) -> Result<Box<dyn Read + '_>> {
        self.compression.decoder(&self.plaintext)
    }

    /// Tar reader over the decompressed container.
    pub fn container(&self) -> Result<tar::Archive<Box<dyn Read + '_>>> {
        Ok(tar::Archive::new(self.decompressed()?))
    }
}

impl std::fmt::Debug for OpenedArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedArchive")
            .field("version", &self.version)
            .field("compression", &self.compression)
            .field("compressed_len", &self.plaintext.len())
            .finish_non_exhaustive()
    }
}

/// Maps an I/O failure while decoding the container to `CorruptStream`.
pub(crate) fn corrupt_stream(e: &std::io::Error) -> ArchiveError {
    ArchiveError::CorruptStream(format!("error reading container stream: {e}"))
}

/// The entry name exactly as stored, without a trailing `/`.
pub(crate) fn entry_name<R: Read>(entry: &tar::Entry<'_, R>) -> String {
    let raw = entry.path_bytes();
    let name = String::from_utf8_lossy(&raw);
    let trimmed = name.trim_end_matches('/');
    if trimmed.is_empty() {
        name.into_owned()
    } else {
        trimmed.to_string()
    }
}
