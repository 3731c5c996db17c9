//! Fixture builders shared by unit tests.
//!
//! # Panics
//!
//! Everything here panics on I/O errors; it is only compiled for tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::Profile;
use crate::creation::seal_container;
use crate::crypto::Cipher;
use crate::crypto::KdfParams;
use crate::crypto::derive_key;
use crate::crypto::random_bytes;
use crate::formats::HeaderV1;
use crate::formats::HeaderV2;

/// Smallest cost Argon2 accepts; keeps unit tests fast.
pub const FAST_KDF: KdfParams = KdfParams::new(1, 64, 1);

pub fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

/// Builds tar streams with names written verbatim into the header.
///
/// `tar::Builder::append_data` refuses `..` and absolute names, which is
/// exactly what hostile fixtures need, so names bypass it here.
pub struct TarBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarBuilder {
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    pub fn file(self, name: &str, data: &[u8], mode: u32) -> Self {
        self.entry(name, tar::EntryType::Regular, data, mode, None)
    }

    pub fn directory(self, name: &str, mode: u32) -> Self {
        self.entry(name, tar::EntryType::Directory, &[], mode, None)
    }

    pub fn symlink(self, name: &str, target: &str) -> Self {
        self.entry(name, tar::EntryType::Symlink, &[], 0o777, Some(target))
    }

    pub fn finish(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    fn entry(
        mut self,
        name: &str,
        kind: tar::EntryType,
        data: &[u8],
        mode: u32,
        link: Option<&str>,
    ) -> Self {
        let mut header = tar::Header::new_gnu();
        write_field(&mut header.as_old_mut().name, name);
        if let Some(link) = link {
            write_field(&mut header.as_old_mut().linkname, link);
        }
        header.set_entry_type(kind);
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_mtime(0);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }
}

fn write_field(field: &mut [u8; 100], value: &str) {
    let bytes = value.as_bytes();
    assert!(bytes.len() < field.len(), "fixture name too long: {value}");
    field.fill(0);
    field[..bytes.len()].copy_from_slice(bytes);
}

pub fn xz_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Seals `payload` as a v3 archive tagged `low` and writes it into `dir`.
pub fn write_v3_archive(dir: &Path, payload: &[u8], pw: &str, kdf: &KdfParams) -> PathBuf {
    let bytes = seal_container(payload, &password(pw), Profile::Low, kdf).unwrap();
    let path = dir.join("archive.btxz");
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Writes a v1 archive (AES-256-GCM over tar.xz) holding `tar`.
pub fn write_legacy_v1_archive(dir: &Path, tar: &[u8], pw: &str, kdf: &KdfParams) -> PathBuf {
    let header = HeaderV1 {
        salt: random_bytes(),
        kdf: *kdf,
        nonce: random_bytes(),
    };
    let key = derive_key(&password(pw), &header.salt, kdf).unwrap();
    let ciphertext = Cipher::Aes256Gcm
        .seal(&key, &header.nonce, &xz_compress(tar))
        .unwrap();

    let mut bytes = header.encode();
    bytes.extend_from_slice(&ciphertext);
    let path = dir.join("legacy-v1.btxz");
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Writes a v2 archive (AES-256-GCM over tar.zst) holding `tar`.
pub fn write_legacy_v2_archive(dir: &Path, tar: &[u8], pw: &str, kdf: &KdfParams) -> PathBuf {
    let header = HeaderV2 {
        profile_tag: Profile::Default.tag(),
        salt: random_bytes(),
        kdf: *kdf,
        nonce: random_bytes(),
    };
    let compressed = zstd::encode_all(tar, 3).unwrap();
    let key = derive_key(&password(pw), &header.salt, kdf).unwrap();
    let ciphertext = Cipher::Aes256Gcm
        .seal(&key, &header.nonce, &compressed)
        .unwrap();

    let mut bytes = header.encode();
    bytes.extend_from_slice(&ciphertext);
    let path = dir.join("legacy-v2.btxz");
    std::fs::write(&path, bytes).unwrap();
    path
}
