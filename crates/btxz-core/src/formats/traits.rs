//! Common trait for per-version archive codecs.

use secrecy::SecretString;
use zeroize::Zeroizing;

use super::compression::CompressionCodec;
use crate::ArchiveError;
use crate::Result;
use crate::crypto::Cipher;
use crate::crypto::KdfParams;
use crate::crypto::derive_key;

/// What a parsed header knows about its archive.
///
/// Each format version implements this on its header type. Adding a version
/// means adding a header type and one arm in [`Codec`](super::Codec).
pub trait FormatCodec {
    /// Format version number.
    fn version(&self) -> u16;

    /// Encoded header length; the ciphertext starts here.
    fn header_len(&self) -> usize;

    /// AEAD algorithm sealing the payload.
    fn cipher(&self) -> Cipher;

    /// Compression codec applied to the tar stream.
    fn compression(&self) -> CompressionCodec;

    /// Key derivation cost recorded in the header.
    fn kdf_params(&self) -> KdfParams;

    /// Per-archive salt.
    fn salt(&self) -> &[u8];

    /// Per-archive nonce.
    fn nonce(&self) -> &[u8];

    /// Informational profile tag, if the layout has one.
    fn profile_tag(&self) -> Option<u8>;

    /// Whether `test` is allowed on this version.
    fn supports_integrity_test(&self) -> bool;

    /// Derives the key and authenticates the payload.
    ///
    /// # Errors
    ///
    /// `DecryptionFailed` for a wrong password, tampered ciphertext, or
    /// header costs outside the accepted range. Stored costs are untrusted
    /// input, so their rejection carries no detail beyond the debug log.
    fn open_payload(
        &self,
        password: &SecretString,
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let key = derive_key(password, self.salt(), &self.kdf_params()).map_err(|e| {
            tracing::debug!(error = %e, "header key derivation parameters rejected");
            ArchiveError::DecryptionFailed
        })?;
        self.cipher().open(&key, self.nonce(), ciphertext)
    }
}
