//! Integrity test without extraction.

use std::io::Read;
use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use secrecy::SecretString;

use crate::Archive;
use crate::Result;
use crate::archive::corrupt_stream;
use crate::io::CountingReader;

/// Outcome of a successful integrity test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Format version of the archive.
    pub version: u16,

    /// Number of container entries read.
    pub entries: usize,

    /// Size of the encrypted payload, tag included.
    pub payload_bytes: u64,

    /// Size of the authenticated, still-compressed container.
    pub compressed_bytes: u64,

    /// Size of the decompressed tar stream.
    pub decompressed_bytes: u64,

    /// Duration of the test.
    pub duration: Duration,
}

/// Authenticates the payload and decodes the whole container.
///
/// Every entry body is read and the compressed stream is drained to its
/// end, so stream checksums are verified as well as the AEAD tag.
///
/// # Errors
///
/// - `IntegrityCheckUnsupported` for v1 and v2 archives, before any key
///   derivation
/// - `DecryptionFailed` for a wrong password or tampered payload
/// - `CorruptStream` if the container does not decode cleanly
///
/// # Examples
///
/// ```no_run
/// use btxz_core::test_archive;
/// use secrecy::SecretString;
///
/// let password = SecretString::from("correct horse".to_string());
/// let report = test_archive("backup.btxz", &password)?;
/// println!("{} entries OK", report.entries);
/// # Ok::<(), btxz_core::ArchiveError>(())
/// ```
pub fn test_archive<P: AsRef<Path>>(
    archive: P,
    password: &SecretString,
) -> Result<VerificationReport> {
    let start = Instant::now();

    let archive = Archive::open(archive)?;
    archive.codec().require_integrity_test()?;
    let opened = archive.decrypt(password)?;

    let mut stream = CountingReader::new(opened.decompressed()?);
    let mut entries = 0usize;
    {
        let mut container = tar::Archive::new(&mut stream);
        for entry in container.entries().map_err(|e| corrupt_stream(&e))? {
            let mut entry = entry.map_err(|e| corrupt_stream(&e))?;
            std::io::copy(&mut entry, &mut std::io::sink()).map_err(|e| corrupt_stream(&e))?;
            entries += 1;
        }
    }
    drain(&mut stream)?;

    let report = VerificationReport {
        version: opened.version(),
        entries,
        payload_bytes: archive.ciphertext().len() as u64,
        compressed_bytes: opened.compressed_len() as u64,
        decompressed_bytes: stream.total_bytes(),
        duration: start.elapsed(),
    };

    tracing::debug!(
        archive = %archive.path().display(),
        entries = report.entries,
        decompressed = report.decompressed_bytes,
        "integrity test passed"
    );

    Ok(report)
}

fn drain<R: Read>(reader: &mut R) -> Result<()> {
    std::io::copy(reader, &mut std::io::sink())
        .map(|_| ())
        .map_err(|e| corrupt_stream(&e))
}
