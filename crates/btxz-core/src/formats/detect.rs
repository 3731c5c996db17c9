//! Archive signature and version detection.

use crate::ArchiveError;
use crate::Result;

/// Four-byte signature at the start of every archive.
pub const SIGNATURE: [u8; 4] = *b"BTXZ";

/// Bytes needed to identify an archive: signature plus the u16 version.
pub const PREFIX_LEN: usize = SIGNATURE.len() + 2;

/// Checks the signature against whatever prefix of `bytes` is available.
///
/// A short input that still agrees with the signature is truncated, not
/// foreign, so it yields `HeaderTruncated` from the caller's length check
/// instead of `NotRecognized` here.
pub(crate) fn check_signature(bytes: &[u8]) -> Result<()> {
    let n = bytes.len().min(SIGNATURE.len());
    if bytes[..n] == SIGNATURE[..n] {
        Ok(())
    } else {
        Err(ArchiveError::NotRecognized)
    }
}

/// Reads the format version from the archive prefix.
///
/// Only the first [`PREFIX_LEN`] bytes are inspected. The signature is
/// verified before the version is interpreted.
///
/// # Errors
///
/// Returns `NotRecognized` if the signature does not match, and
/// `HeaderTruncated` if fewer than [`PREFIX_LEN`] bytes are available.
///
/// # Examples
///
/// ```
/// use btxz_core::formats::detect::peek_version;
///
/// assert_eq!(peek_version(b"BTXZ\x03\x00").unwrap(), 3);
/// assert!(peek_version(b"PK\x03\x04\x00\x00").is_err());
/// ```
pub fn peek_version(bytes: &[u8]) -> Result<u16> {
    check_signature(bytes)?;
    if bytes.len() < PREFIX_LEN {
        return Err(ArchiveError::HeaderTruncated {
            expected: PREFIX_LEN,
            actual: bytes.len(),
        });
    }
    Ok(u16::from_le_bytes([bytes[4], bytes[5]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_each_version() {
        for version in [1u16, 2, 3, 4, 0xFFFF] {
            let mut prefix = SIGNATURE.to_vec();
            prefix.extend_from_slice(&version.to_le_bytes());
            assert!(matches!(peek_version(&prefix), Ok(v) if v == version));
        }
    }

    #[test]
    fn test_version_is_little_endian() {
        assert!(matches!(peek_version(b"BTXZ\x00\x03"), Ok(0x0300)));
    }

    #[test]
    fn test_foreign_signature() {
        assert!(matches!(
            peek_version(b"\x37\x7A\xBC\xAF\x27\x1C"),
            Err(ArchiveError::NotRecognized)
        ));
        assert!(matches!(
            peek_version(b"XY"),
            Err(ArchiveError::NotRecognized)
        ));
    }

    #[test]
    fn test_truncated_prefix() {
        assert!(matches!(
            peek_version(b"BTX"),
            Err(ArchiveError::HeaderTruncated {
                expected: 6,
                actual: 3
            })
        ));
        assert!(matches!(
            peek_version(b""),
            Err(ArchiveError::HeaderTruncated { actual: 0, .. })
        ));
    }
}
