//! Archive extraction.

pub mod engine;

pub use engine::ExtractionEngine;

use std::path::Path;
use std::time::Instant;

use secrecy::SecretString;

use crate::Archive;
use crate::ExtractionReport;
use crate::Result;
use crate::types::DestDir;

/// Decrypts `archive` and writes its contents under `output_dir`.
///
/// The payload is authenticated in full before the destination is touched:
/// a wrong password or a tampered file leaves the filesystem unchanged.
/// Entries whose names would land outside `output_dir` are skipped and
/// listed in [`ExtractionReport::skipped`].
///
/// # Errors
///
/// - a format error if the header is not a supported archive
/// - `DecryptionFailed` for a wrong password or modified payload
/// - `CorruptStream` if the authenticated container cannot be decoded
/// - `Resource` for filesystem failures
///
/// # Examples
///
/// ```no_run
/// use btxz_core::extract_archive;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("correct horse".to_string());
/// let report = extract_archive("backup.btxz", "restore/", &password)?;
/// for name in &report.skipped {
///     eprintln!("skipped {name}");
/// }
/// # Ok::<(), btxz_core::ArchiveError>(())
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    output_dir: Q,
    password: &SecretString,
) -> Result<ExtractionReport> {
    let start = Instant::now();

    let archive = Archive::open(archive)?;
    let opened = archive.decrypt(password)?;

    let dest = DestDir::new(output_dir.as_ref())?;
    let mut container = opened.container()?;
    let mut report = ExtractionEngine::new(dest).run(&mut container)?;

    report.version = opened.version();
    report.duration = start.elapsed();

    tracing::debug!(
        archive = %archive.path().display(),
        version = report.version,
        files = report.files_extracted,
        directories = report.directories_created,
        skipped = report.skipped.len(),
        "archive extracted"
    );

    Ok(report)
}
