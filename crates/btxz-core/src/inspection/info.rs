//! Header inspection without a password.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ArchiveError;
use crate::Profile;
use crate::Result;
use crate::crypto::KdfParams;
use crate::formats::Codec;
use crate::formats::MAX_HEADER_LEN;

/// Public parameters recorded in an archive header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    /// Format version.
    pub version: u16,

    /// Profile tag byte, if the layout stores one.
    pub profile_tag: Option<u8>,

    /// Profile the tag names, if it is a known one.
    pub profile: Option<Profile>,

    /// Key derivation cost.
    pub kdf: KdfParams,

    /// AEAD algorithm name.
    pub cipher: &'static str,

    /// Nonce length of the AEAD.
    pub nonce_len: usize,

    /// Compression codec name.
    pub compression: &'static str,

    /// Encoded header length.
    pub header_len: usize,
}

/// Reads and describes the header of `path`.
///
/// Only the first bytes of the file are read. No key is derived.
///
/// # Errors
///
/// `Resource` if the file cannot be read, or a format error.
pub fn inspect_archive<P: AsRef<Path>>(path: P) -> Result<ArchiveInfo> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| ArchiveError::io(format!("could not open archive {}", path.display()), e))?;

    let mut head = Vec::with_capacity(MAX_HEADER_LEN);
    file.take(MAX_HEADER_LEN as u64)
        .read_to_end(&mut head)
        .map_err(|e| ArchiveError::io(format!("could not read archive {}", path.display()), e))?;

    let parsed = Codec::parse(&head)?;
    let codec = parsed.codec();
    let profile_tag = codec.profile_tag();

    Ok(ArchiveInfo {
        version: codec.version(),
        profile_tag,
        profile: profile_tag.and_then(Profile::from_tag),
        kdf: codec.kdf_params(),
        cipher: codec.cipher().name(),
        nonce_len: codec.cipher().nonce_len(),
        compression: codec.compression().name(),
        header_len: codec.header_len(),
    })
}
