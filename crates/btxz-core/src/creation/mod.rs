//! Archive creation.
//!
//! `create` = walk inputs → pack tar.xz → seal with a fresh key → prepend
//! the header → write the file once.

pub mod compression;
pub mod config;
pub mod report;
pub mod tar;
pub mod walker;

pub use config::CreationConfig;
pub use report::CreationReport;
pub use walker::EntryType;
pub use walker::FilteredEntry;
pub use walker::FilteredWalker;

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use secrecy::ExposeSecret;
use secrecy::SecretString;
use tempfile::NamedTempFile;

use crate::ArchiveError;
use crate::Profile;
use crate::Result;
use crate::crypto::Cipher;
use crate::crypto::KdfParams;
use crate::crypto::derive_key;
use crate::crypto::random_bytes;
use crate::formats::HeaderV3;

/// Creates a v3 archive at `output` from `inputs`.
///
/// The archive is written to a temporary file in the destination directory
/// and renamed into place, so a failed run never leaves a partial archive.
///
/// # Errors
///
/// - `NoInputs` if `inputs` is empty
/// - `EmptyPassword` if `password` is empty
/// - `SourceNotFound` if an input does not exist
/// - `InvalidKdfParams` for a degenerate `kdf_override`
/// - `Resource` for filesystem failures
///
/// # Examples
///
/// ```no_run
/// use btxz_core::CreationConfig;
/// use btxz_core::Profile;
/// use btxz_core::create_archive;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("correct horse".to_string());
/// let config = CreationConfig::default().with_profile(Profile::Low);
/// let report = create_archive("backup.btxz", &["docs/", "notes.txt"], &password, &config)?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), btxz_core::ArchiveError>(())
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    inputs: &[Q],
    password: &SecretString,
    config: &CreationConfig,
) -> Result<CreationReport> {
    let start = Instant::now();
    let output = output.as_ref();

    if inputs.is_empty() {
        return Err(ArchiveError::NoInputs);
    }
    if password.expose_secret().is_empty() {
        return Err(ArchiveError::EmptyPassword);
    }
    config.validate()?;

    let mut report = CreationReport {
        profile: config.profile,
        ..CreationReport::default()
    };

    let entries = walker::collect_entries(inputs, config)?;
    let compressed = tar::pack_container(&entries, config, &mut report)?;
    let archive = seal_container(&compressed, password, config.profile, &config.kdf_params())?;

    write_atomically(output, &archive)?;

    report.archive_size = archive.len() as u64;
    report.duration = start.elapsed();

    tracing::debug!(
        output = %output.display(),
        files = report.files_added,
        directories = report.directories_added,
        size = report.archive_size,
        "archive created"
    );

    Ok(report)
}

/// Seals an already-compressed container into complete v3 archive bytes.
///
/// A fresh salt and nonce are drawn from the OS CSPRNG on every call, so
/// sealing the same payload twice never yields the same bytes.
///
/// # Errors
///
/// `InvalidKdfParams` for degenerate `kdf`, `EncryptionFailed` if the
/// cipher refuses the payload.
pub fn seal_container(
    compressed: &[u8],
    password: &SecretString,
    profile: Profile,
    kdf: &KdfParams,
) -> Result<Vec<u8>> {
    let header = HeaderV3 {
        profile_tag: profile.tag(),
        salt: random_bytes(),
        kdf: *kdf,
        nonce: random_bytes(),
    };

    let key = derive_key(password, &header.salt, &header.kdf)?;
    let ciphertext = Cipher::XChaCha20Poly1305.seal(&key, &header.nonce, compressed)?;

    let mut archive = Vec::with_capacity(header.encode().len() + ciphertext.len());
    header.write_to(&mut archive)?;
    archive.extend_from_slice(&ciphertext);
    Ok(archive)
}

fn write_atomically(output: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let create_error = |e: std::io::Error| ArchiveError::io("could not create archive file", e);

    let mut temp = NamedTempFile::new_in(parent).map_err(create_error)?;
    temp.write_all(bytes)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| ArchiveError::io("failed to write encrypted payload", e))?;
    temp.persist(output)
        .map_err(|e| create_error(e.error))?;

    Ok(())
}
