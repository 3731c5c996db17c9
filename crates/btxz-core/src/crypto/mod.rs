//! Password-based key derivation and the AEAD envelope.
//!
//! Every archive derives a fresh key from `(password, salt, KdfParams)` and
//! seals the whole compressed container as a single ciphertext. Keys live
//! only for the duration of one operation.

mod aead;
mod kdf;

pub use aead::Cipher;
pub use kdf::DerivedKey;
pub use kdf::KdfParams;
pub use kdf::MAX_MEMORY_COST_KIB;
pub use kdf::MAX_TIME_COST;
pub use kdf::derive_key;

use rand::RngCore;

/// Size of a derived key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Size of the per-archive salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Size of the authentication tag appended by both ciphers.
pub const TAG_SIZE: usize = 16;

/// XChaCha20-Poly1305 nonce size.
pub const XNONCE_SIZE: usize = 24;

/// AES-256-GCM nonce size, used by legacy archives.
pub const GCM_NONCE_SIZE: usize = 12;

/// Fills a fixed-size array from the operating system CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}
