//! v3 header codec.
//!
//! Layout (little-endian):
//!
//! | offset | size | field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | signature `BTXZ`              |
//! | 4      | 2    | version = 3                   |
//! | 6      | 1    | profile tag                   |
//! | 7      | 16   | salt                          |
//! | 23     | 4    | Argon2 time cost              |
//! | 27     | 4    | Argon2 memory cost (KiB)      |
//! | 31     | 1    | Argon2 parallelism            |
//! | 32     | 24   | XChaCha20-Poly1305 nonce      |
//!
//! The ciphertext follows immediately and runs to end of file.

use std::io::Read;
use std::io::Write;

use super::compression::CompressionCodec;
use super::detect::SIGNATURE;
use super::detect::check_signature;
use super::traits::FormatCodec;
use crate::ArchiveError;
use crate::Result;
use crate::crypto::Cipher;
use crate::crypto::KdfParams;
use crate::crypto::SALT_SIZE;
use crate::crypto::XNONCE_SIZE;

/// Version number written by this codec.
pub const VERSION_V3: u16 = 3;

/// Encoded size of a v3 header.
pub const HEADER_V3_LEN: usize = 4 + 2 + 1 + SALT_SIZE + 4 + 4 + 1 + XNONCE_SIZE;

/// Parsed v3 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV3 {
    /// Informational profile tag (1=low, 2=default, 3=max).
    pub profile_tag: u8,
    /// Per-archive random salt.
    pub salt: [u8; SALT_SIZE],
    /// Argon2id cost the key was derived with.
    pub kdf: KdfParams,
    /// Per-archive random nonce.
    pub nonce: [u8; XNONCE_SIZE],
}

impl HeaderV3 {
    /// Serializes the header to its fixed 56-byte form.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_V3_LEN] {
        let mut buf = [0u8; HEADER_V3_LEN];
        let mut at = 0;
        let mut put = |bytes: &[u8]| {
            buf[at..at + bytes.len()].copy_from_slice(bytes);
            at += bytes.len();
        };

        put(&SIGNATURE);
        put(&VERSION_V3.to_le_bytes());
        put(&[self.profile_tag]);
        put(&self.salt);
        put(&self.kdf.time_cost.to_le_bytes());
        put(&self.kdf.memory_cost_kib.to_le_bytes());
        put(&[self.kdf.parallelism]);
        put(&self.nonce);

        buf
    }

    /// Writes the encoded header to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer
            .write_all(&self.encode())
            .map_err(|e| ArchiveError::io("failed to write archive header", e))
    }

    /// Parses a v3 header from the start of `bytes`.
    ///
    /// Trailing bytes (the ciphertext) are ignored. No sanity checks are
    /// applied to the cost parameters here; key derivation rejects
    /// degenerate values.
    ///
    /// # Errors
    ///
    /// `NotRecognized` on a signature mismatch, `HeaderTruncated` if fewer
    /// than [`HEADER_V3_LEN`] bytes are present, and `UnsupportedVersion`
    /// if the version field is not 3.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        check_signature(bytes)?;
        if bytes.len() < HEADER_V3_LEN {
            return Err(ArchiveError::HeaderTruncated {
                expected: HEADER_V3_LEN,
                actual: bytes.len(),
            });
        }

        let mut cursor = &bytes[SIGNATURE.len()..HEADER_V3_LEN];

        let version = u16::from_le_bytes(read_array(&mut cursor)?);
        if version != VERSION_V3 {
            return Err(ArchiveError::UnsupportedVersion { version });
        }

        let [profile_tag] = read_array(&mut cursor)?;
        let salt = read_array(&mut cursor)?;
        let time_cost = u32::from_le_bytes(read_array(&mut cursor)?);
        let memory_cost_kib = u32::from_le_bytes(read_array(&mut cursor)?);
        let [parallelism] = read_array(&mut cursor)?;
        let nonce = read_array(&mut cursor)?;

        Ok(Self {
            profile_tag,
            salt,
            kdf: KdfParams::new(time_cost, memory_cost_kib, parallelism),
            nonce,
        })
    }
}

/// Reads a fixed-size field from a length-checked header slice.
pub(crate) fn read_array<const N: usize>(cursor: &mut &[u8]) -> Result<[u8; N]> {
    let mut field = [0u8; N];
    cursor.read_exact(&mut field)?;
    Ok(field)
}

impl FormatCodec for HeaderV3 {
    fn version(&self) -> u16 {
        VERSION_V3
    }

    fn header_len(&self) -> usize {
        HEADER_V3_LEN
    }

    fn cipher(&self) -> Cipher {
        Cipher::XChaCha20Poly1305
    }

    fn compression(&self) -> CompressionCodec {
        CompressionCodec::Xz
    }

    fn kdf_params(&self) -> KdfParams {
        self.kdf
    }

    fn salt(&self) -> &[u8] {
        &self.salt
    }

    fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    fn profile_tag(&self) -> Option<u8> {
        Some(self.profile_tag)
    }

    fn supports_integrity_test(&self) -> bool {
        true
    }
}
