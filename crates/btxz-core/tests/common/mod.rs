//! Fixture helpers shared by integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use btxz_core::KdfParams;
use btxz_core::Profile;
use btxz_core::seal_container;
use secrecy::SecretString;

pub const FAST_KDF: KdfParams = KdfParams::new(1, 64, 1);

pub fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

pub enum Raw<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
    Symlink(&'a str, &'a str),
}

/// Tar stream with names copied verbatim into the header fields, so
/// hostile names survive `tar::Builder`'s own checks.
pub fn raw_tar(entries: &[Raw<'_>]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for entry in entries {
        let (name, kind, data, link): (&str, _, &[u8], Option<&str>) = match *entry {
            Raw::File(name, data) => (name, tar::EntryType::Regular, data, None),
            Raw::Dir(name) => (name, tar::EntryType::Directory, &[], None),
            Raw::Symlink(name, target) => (name, tar::EntryType::Symlink, &[], Some(target)),
        };

        let mut header = tar::Header::new_gnu();
        header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
        if let Some(link) = link {
            header.as_old_mut().linkname[..link.len()].copy_from_slice(link.as_bytes());
        }
        header.set_entry_type(kind);
        header.set_size(data.len() as u64);
        header.set_mode(if kind == tar::EntryType::Directory { 0o755 } else { 0o644 });
        header.set_cksum();
        builder.append(&header, data).unwrap();
    }
    builder.into_inner().unwrap()
}

pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Seals a tar stream into a v3 archive at `dir/name`.
pub fn write_sealed(dir: &Path, name: &str, tar: &[u8], pw: &str) -> PathBuf {
    let bytes = seal_container(&xz(tar), &password(pw), Profile::Low, &FAST_KDF).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
