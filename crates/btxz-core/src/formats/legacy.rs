//! Read-only codecs for v1 and v2 archives.
//!
//! Both legacy versions seal with AES-256-GCM and a 12-byte nonce. v1 has no
//! profile tag and compresses with xz; v2 adds the tag and switched to zstd.
//! New archives are never written in these layouts.

use super::compression::CompressionCodec;
use super::detect::SIGNATURE;
use super::detect::check_signature;
use super::header::read_array;
use super::traits::FormatCodec;
use crate::ArchiveError;
use crate::Result;
use crate::crypto::Cipher;
use crate::crypto::GCM_NONCE_SIZE;
use crate::crypto::KdfParams;
use crate::crypto::SALT_SIZE;

/// v1 version number.
pub const VERSION_V1: u16 = 1;

/// v2 version number.
pub const VERSION_V2: u16 = 2;

/// Encoded size of a v1 header.
pub const HEADER_V1_LEN: usize = 4 + 2 + SALT_SIZE + 4 + 4 + 1 + GCM_NONCE_SIZE;

/// Encoded size of a v2 header.
pub const HEADER_V2_LEN: usize = HEADER_V1_LEN + 1;

/// Parsed v1 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV1 {
    /// Per-archive salt.
    pub salt: [u8; SALT_SIZE],
    /// Argon2id cost.
    pub kdf: KdfParams,
    /// AES-GCM nonce.
    pub nonce: [u8; GCM_NONCE_SIZE],
}

/// Parsed v2 header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderV2 {
    /// Informational compression level tag.
    pub profile_tag: u8,
    /// Per-archive salt.
    pub salt: [u8; SALT_SIZE],
    /// Argon2id cost.
    pub kdf: KdfParams,
    /// AES-GCM nonce.
    pub nonce: [u8; GCM_NONCE_SIZE],
}

fn prepare(bytes: &[u8], expected_len: usize, expected_version: u16) -> Result<&[u8]> {
    check_signature(bytes)?;
    if bytes.len() < expected_len {
        return Err(ArchiveError::HeaderTruncated {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    let mut cursor = &bytes[SIGNATURE.len()..expected_len];
    let version = u16::from_le_bytes(read_array(&mut cursor)?);
    if version != expected_version {
        return Err(ArchiveError::UnsupportedVersion { version });
    }
    Ok(cursor)
}

fn read_kdf(cursor: &mut &[u8]) -> Result<KdfParams> {
    let time_cost = u32::from_le_bytes(read_array(cursor)?);
    let memory_cost_kib = u32::from_le_bytes(read_array(cursor)?);
    let [parallelism] = read_array(cursor)?;
    Ok(KdfParams::new(time_cost, memory_cost_kib, parallelism))
}

impl HeaderV1 {
    /// Parses a v1 header from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = prepare(bytes, HEADER_V1_LEN, VERSION_V1)?;
        let salt = read_array(&mut cursor)?;
        let kdf = read_kdf(&mut cursor)?;
        let nonce = read_array(&mut cursor)?;
        Ok(Self { salt, kdf, nonce })
    }

    #[cfg(test)]
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_V1_LEN);
        buf.extend_from_slice(&SIGNATURE);
        buf.extend_from_slice(&VERSION_V1.to_le_bytes());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.kdf.time_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.memory_cost_kib.to_le_bytes());
        buf.push(self.kdf.parallelism);
        buf.extend_from_slice(&self.nonce);
        buf
    }
}

impl HeaderV2 {
    /// Parses a v2 header from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = prepare(bytes, HEADER_V2_LEN, VERSION_V2)?;
        let [profile_tag] = read_array(&mut cursor)?;
        let salt = read_array(&mut cursor)?;
        let kdf = read_kdf(&mut cursor)?;
        let nonce = read_array(&mut cursor)?;
        Ok(Self {
            profile_tag,
            salt,
            kdf,
            nonce,
        })
    }

    #[cfg(test)]
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_V2_LEN);
        buf.extend_from_slice(&SIGNATURE);
        buf.extend_from_slice(&VERSION_V2.to_le_bytes());
        buf.push(self.profile_tag);
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.kdf.time_cost.to_le_bytes());
        buf.extend_from_slice(&self.kdf.memory_cost_kib.to_le_bytes());
        buf.push(self.kdf.parallelism);
        buf.extend_from_slice(&self.nonce);
        buf
    }
}

impl FormatCodec for HeaderV1 {
    fn version(&self) -> u16 {
        VERSION_V1
    }

    fn header_len(&self) -> usize {
        HEADER_V1_LEN
    }

    fn cipher(&self) -> Cipher {
        Cipher::Aes256Gcm
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
        None
    }

    fn supports_integrity_test(&self) -> bool {
        false
    }
}

impl FormatCodec for HeaderV2 {
    fn version(&self) -> u16 {
        VERSION_V2
    }

    fn header_len(&self) -> usize {
        HEADER_V2_LEN
    }

    fn cipher(&self) -> Cipher {
        Cipher::Aes256Gcm
    }

    fn compression(&self) -> CompressionCodec {
        CompressionCodec::Zstd
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
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn v1() -> HeaderV1 {
        HeaderV1 {
            salt: [1; SALT_SIZE],
            kdf: KdfParams::new(1, 64, 1),
            nonce: [2; GCM_NONCE_SIZE],
        }
    }

    #[test]
    fn test_header_lengths() {
        assert_eq!(HEADER_V1_LEN, 43);
        assert_eq!(HEADER_V2_LEN, 44);
    }

    #[test]
    fn test_v1_roundtrip() {
        let bytes = v1().encode();
        assert_eq!(bytes.len(), HEADER_V1_LEN);
        assert_eq!(HeaderV1::decode(&bytes).unwrap(), v1());
    }

    #[test]
    fn test_v2_roundtrip() {
        let header = HeaderV2 {
            profile_tag: 3,
            salt: [9; SALT_SIZE],
            kdf: KdfParams::new(2, 128, 2),
            nonce: [8; GCM_NONCE_SIZE],
        };
        let bytes = header.encode();
        assert_eq!(bytes[6], 3);
        assert_eq!(HeaderV2::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn test_v1_decoder_rejects_v2_bytes() {
        let header = HeaderV2 {
            profile_tag: 1,
            salt: [0; SALT_SIZE],
            kdf: KdfParams::new(1, 64, 1),
            nonce: [0; GCM_NONCE_SIZE],
        };
        assert!(matches!(
            HeaderV1::decode(&header.encode()),
            Err(ArchiveError::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn test_v1_truncated() {
        let bytes = v1().encode();
        assert!(matches!(
            HeaderV1::decode(&bytes[..20]),
            Err(ArchiveError::HeaderTruncated {
                expected: 43,
                actual: 20
            })
        ));
    }

    #[test]
    fn test_legacy_codecs_refuse_integrity_test() {
        assert!(!v1().supports_integrity_test());
        assert_eq!(v1().cipher(), Cipher::Aes256Gcm);
        assert_eq!(v1().compression(), CompressionCodec::Xz);
    }
}
