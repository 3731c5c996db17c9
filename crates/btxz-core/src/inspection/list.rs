//! Archive listing.

use std::path::Path;

use secrecy::SecretString;

use crate::Archive;
use crate::Result;
use crate::archive::corrupt_stream;
use crate::archive::entry_name;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::manifest::ManifestEntry;
use crate::types::EntryType;

/// Lists archive contents without writing anything to disk.
///
/// Names are reported exactly as stored, including names extraction would
/// refuse, so a listing shows what an archive attempts.
///
/// # Errors
///
/// Format errors, `DecryptionFailed`, or `CorruptStream`.
///
/// # Examples
///
/// ```no_run
/// use btxz_core::list_archive;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("correct horse".to_string());
/// let manifest = list_archive("backup.btxz", &password)?;
/// for entry in &manifest.entries {
///     println!("{} {:>10} {}", entry.mode_string(), entry.size, entry.path);
/// }
/// # Ok::<(), btxz_core::ArchiveError>(())
/// ```
pub fn list_archive<P: AsRef<Path>>(archive: P, password: &SecretString) -> Result<ArchiveManifest> {
    let archive = Archive::open(archive)?;
    let opened = archive.decrypt(password)?;
    let mut container = opened.container()?;

    let mut manifest = ArchiveManifest::new(opened.version());
    for entry in container.entries().map_err(|e| corrupt_stream(&e))? {
        let entry = entry.map_err(|e| corrupt_stream(&e))?;
        let header = entry.header();

        manifest.add_entry(ManifestEntry {
            path: entry_name(&entry),
            size: entry.size(),
            mode: header.mode().unwrap_or(0),
            entry_type: EntryType::from(header.entry_type()),
        });
    }

    tracing::debug!(
        archive = %archive.path().display(),
        entries = manifest.total_entries(),
        "archive listed"
    );

    Ok(manifest)
}
