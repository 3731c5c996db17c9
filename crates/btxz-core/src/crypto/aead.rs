//! Whole-payload AEAD seal/open.

use aes_gcm::Aes256Gcm;
use chacha20poly1305::XChaCha20Poly1305;
use chacha20poly1305::XNonce;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::aead::KeyInit;
use zeroize::Zeroizing;

use super::DerivedKey;
use super::GCM_NONCE_SIZE;
use super::XNONCE_SIZE;
use crate::ArchiveError;
use crate::Result;

/// AEAD algorithm used by a format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    /// XChaCha20-Poly1305 with a 24-byte nonce (v3).
    XChaCha20Poly1305,
    /// AES-256-GCM with a 12-byte nonce (v1, v2).
    Aes256Gcm,
}

impl Cipher {
    /// Nonce length in bytes.
    #[must_use]
    pub const fn nonce_len(self) -> usize {
        match self {
            Self::XChaCha20Poly1305 => XNONCE_SIZE,
            Self::Aes256Gcm => GCM_NONCE_SIZE,
        }
    }

    /// Human-readable algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::XChaCha20Poly1305 => "XChaCha20-Poly1305",
            Self::Aes256Gcm => "AES-256-GCM",
        }
    }

    /// Encrypts `plaintext`, returning ciphertext with the tag appended.
    ///
    /// # Errors
    ///
    /// Returns `EncryptionFailed` if the nonce has the wrong length or the
    /// primitive refuses the input.
    pub fn seal(self, key: &DerivedKey, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != self.nonce_len() {
            return Err(ArchiveError::EncryptionFailed);
        }

        let sealed = match self {
            Self::XChaCha20Poly1305 => {
                XChaCha20Poly1305::new(key.as_bytes().into())
                    .encrypt(XNonce::from_slice(nonce), plaintext)
            }
            Self::Aes256Gcm => Aes256Gcm::new(key.as_bytes().into())
                .encrypt(aes_gcm::Nonce::from_slice(nonce), plaintext),
        };

        sealed.map_err(|_| ArchiveError::EncryptionFailed)
    }

    /// Decrypts and authenticates `ciphertext`.
    ///
    /// Nothing is returned unless the tag verifies. Every failure, whether
    /// a wrong key, a flipped bit, or a truncated payload, yields the same
    /// `DecryptionFailed`.
    pub fn open(
        self,
        key: &DerivedKey,
        nonce: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        if nonce.len() != self.nonce_len() {
            tracing::debug!(
                cipher = self.name(),
                nonce_len = nonce.len(),
                "nonce length mismatch"
            );
            return Err(ArchiveError::DecryptionFailed);
        }

        let opened = match self {
            Self::XChaCha20Poly1305 => {
                XChaCha20Poly1305::new(key.as_bytes().into())
                    .decrypt(XNonce::from_slice(nonce), ciphertext)
            }
            Self::Aes256Gcm => Aes256Gcm::new(key.as_bytes().into())
                .decrypt(aes_gcm::Nonce::from_slice(nonce), ciphertext),
        };

        match opened {
            Ok(plaintext) => Ok(Zeroizing::new(plaintext)),
            Err(e) => {
                tracing::debug!(
                    cipher = self.name(),
                    ciphertext_len = ciphertext.len(),
                    error = %e,
                    "payload authentication failed"
                );
                Err(ArchiveError::DecryptionFailed)
            }
        }
    }
}
