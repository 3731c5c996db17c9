//! Container packing: walked entries → tar stream → xz.
//!
//! The whole compressed container is buffered in memory so it can be
//! sealed as a single AEAD ciphertext.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tar::Builder;
use tar::Header;

use crate::ArchiveError;
use crate::Result;
use crate::creation::compression::xz_encoder;
use crate::creation::config::CreationConfig;
use crate::creation::report::CreationReport;
use crate::creation::walker::EntryType;
use crate::creation::walker::FilteredEntry;

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;

/// Packs `entries` into an xz-compressed tar stream using the profile in
/// `config`, returning the compressed bytes.
///
/// Entries are written in the given order. Unfollowed symlinks are skipped
/// and recorded as warnings in `report`.
///
/// # Errors
///
/// Returns a `Resource` error if an input cannot be read or the stream
/// cannot be written, and `CorruptStream` if the encoder cannot be built.
pub fn pack_container(
    entries: &[FilteredEntry],
    config: &CreationConfig,
    report: &mut CreationReport,
) -> Result<Vec<u8>> {
    let encoder = xz_encoder(Vec::new(), &config.profile.params())?;
    let mut builder = Builder::new(encoder);

    for entry in entries {
        match entry.entry_type {
            EntryType::File => add_file_to_tar(&mut builder, entry, config, report)?,
            EntryType::Directory => add_directory_to_tar(&mut builder, entry, config, report)?,
            EntryType::Symlink => {
                tracing::warn!(path = %entry.path.display(), "skipping symlink");
                report.entries_skipped += 1;
                report.add_warning(format!(
                    "skipped symlink {} (use follow_symlinks to store its target)",
                    entry.archive_path.display()
                ));
            }
        }
    }

    builder.finish().map_err(stream_error)?;
    let mut encoder = builder.into_inner().map_err(stream_error)?;
    encoder.flush().map_err(stream_error)?;
    let compressed = encoder.finish().map_err(stream_error)?;

    report.bytes_compressed = compressed.len() as u64;
    tracing::debug!(
        entries = entries.len(),
        compressed = compressed.len(),
        "container packed"
    );

    Ok(compressed)
}

fn stream_error(e: std::io::Error) -> ArchiveError {
    ArchiveError::io("failed to write container stream", e)
}

fn add_file_to_tar<W: Write>(
    builder: &mut Builder<W>,
    entry: &FilteredEntry,
    config: &CreationConfig,
    report: &mut CreationReport,
) -> Result<()> {
    let read_error = |e: std::io::Error| ArchiveError::io(format!("cannot read {}", entry.path.display()), e);

    let mut file = File::open(&entry.path).map_err(read_error)?;
    let metadata = file.metadata().map_err(read_error)?;
    let size = metadata.len();

    let mut header = Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(size);
    set_permissions(&mut header, entry.mode, DEFAULT_FILE_MODE, config);
    set_mtime(&mut header, &metadata);

    append(builder, &mut header, &entry.archive_path, &mut file)?;

    report.files_added += 1;
    report.bytes_read += size;

    Ok(())
}

fn add_directory_to_tar<W: Write>(
    builder: &mut Builder<W>,
    entry: &FilteredEntry,
    config: &CreationConfig,
    report: &mut CreationReport,
) -> Result<()> {
    let mut header = Header::new_gnu();
    header.set_entry_type(tar::EntryType::Directory);
    header.set_size(0);
    set_permissions(&mut header, entry.mode, DEFAULT_DIR_MODE, config);
    if let Ok(metadata) = std::fs::metadata(&entry.path) {
        set_mtime(&mut header, &metadata);
    }

    append(builder, &mut header, &entry.archive_path, std::io::empty())?;

    report.directories_added += 1;

    Ok(())
}

fn append<W: Write, R: std::io::Read>(
    builder: &mut Builder<W>,
    header: &mut Header,
    archive_path: &Path,
    data: R,
) -> Result<()> {
    builder.append_data(header, archive_path, data).map_err(|e| {
        ArchiveError::io(
            format!("failed to add {} to container", archive_path.display()),
            e,
        )
    })
}

fn set_permissions(header: &mut Header, mode: u32, fallback: u32, config: &CreationConfig) {
    if config.preserve_permissions {
        header.set_mode(mode);
    } else {
        header.set_mode(fallback);
    }
}

fn set_mtime(header: &mut Header, metadata: &std::fs::Metadata) {
    if let Ok(modified) = metadata.modified()
        && let Ok(since_epoch) = modified.duration_since(std::time::UNIX_EPOCH)
    {
        header.set_mtime(since_epoch.as_secs());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::creation::walker::collect_entries;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn unpack(compressed: &[u8]) -> Vec<(String, tar::EntryType, u32, Vec<u8>)> {
        let decoder = xz2::read::XzDecoder::new(compressed);
        let mut archive = tar::Archive::new(decoder);
        archive
            .entries()
            .unwrap()
            .map(|e| {
                let mut e = e.unwrap();
                let path = e.path().unwrap().to_string_lossy().into_owned();
                let kind = e.header().entry_type();
                let mode = e.header().mode().unwrap();
                let mut data = Vec::new();
                e.read_to_end(&mut data).unwrap();
                (path, kind, mode, data)
            })
            .collect()
    }

    #[test]
    fn test_pack_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.txt"), "0123456789").unwrap();
        fs::create_dir(root.join("b")).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&[root], &config).unwrap();
        let mut report = CreationReport::new();
        let compressed = pack_container(&entries, &config, &mut report).unwrap();

        let unpacked = unpack(&compressed);
        assert_eq!(unpacked.len(), 2);
        assert_eq!(unpacked[0].0, "a.txt");
        assert_eq!(unpacked[0].1, tar::EntryType::Regular);
        assert_eq!(unpacked[0].3, b"0123456789");
        assert_eq!(unpacked[1].0.trim_end_matches('/'), "b");
        assert_eq!(unpacked[1].1, tar::EntryType::Directory);

        assert_eq!(report.files_added, 1);
        assert_eq!(report.directories_added, 1);
        assert_eq!(report.bytes_read, 10);
        assert_eq!(report.bytes_compressed, compressed.len() as u64);
    }

    #[test]
    fn test_pack_without_permissions_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        let config = CreationConfig::default().with_preserve_permissions(false);
        let entries = collect_entries(&[&file], &config).unwrap();
        let compressed = pack_container(&entries, &config, &mut CreationReport::new()).unwrap();

        assert_eq!(unpack(&compressed)[0].2, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_pack_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("run.sh");
        fs::write(&file, "#!/bin/sh").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&[&file], &config).unwrap();
        let compressed = pack_container(&entries, &config, &mut CreationReport::new()).unwrap();

        assert_eq!(unpack(&compressed)[0].2, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_pack_skips_unfollowed_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt")).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&[root], &config).unwrap();
        let mut report = CreationReport::new();
        let compressed = pack_container(&entries, &config, &mut report).unwrap();

        let names: Vec<_> = unpack(&compressed).into_iter().map(|e| e.0).collect();
        assert_eq!(names, vec!["real.txt"]);
        assert_eq!(report.entries_skipped, 1);
        assert!(report.warnings[0].contains("link.txt"));
    }

    #[test]
    fn test_pack_empty_input_is_valid_stream() {
        let config = CreationConfig::default();
        let compressed = pack_container(&[], &config, &mut CreationReport::new()).unwrap();
        assert!(unpack(&compressed).is_empty());
    }
}
