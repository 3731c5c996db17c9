//! Entry-by-entry extraction of a decrypted container.

use std::cmp::Reverse;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::ExtractionReport;
use crate::Result;
use crate::archive::corrupt_stream;
use crate::archive::entry_name;
use crate::security::sanitize_permissions;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::SafePath;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes the entries of a tar container under a destination directory.
///
/// Entries whose names fail the path guard are skipped and recorded. Only
/// regular files and directories are written; every other type is counted
/// as ignored. Directory permissions are applied after all entries,
/// deepest first, so a read-only directory cannot block writes into it.
pub struct ExtractionEngine {
    dest: DestDir,
    report: ExtractionReport,
    deferred_dirs: Vec<(PathBuf, u32)>,
    buffer: Vec<u8>,
}

impl ExtractionEngine {
    /// Creates an engine writing into `dest`.
    #[must_use]
    pub fn new(dest: DestDir) -> Self {
        Self {
            dest,
            report: ExtractionReport::new(),
            deferred_dirs: Vec::new(),
            buffer: vec![0; COPY_BUFFER_SIZE],
        }
    }

    /// Extracts every entry of `container` in archive order.
    ///
    /// # Errors
    ///
    /// `CorruptStream` if the container cannot be decoded, `Resource` if
    /// the filesystem refuses a write. Guard refusals are not errors.
    pub fn run<R: Read>(mut self, container: &mut tar::Archive<R>) -> Result<ExtractionReport> {
        for entry in container.entries().map_err(|e| corrupt_stream(&e))? {
            let mut entry = entry.map_err(|e| corrupt_stream(&e))?;
            self.extract_entry(&mut entry)?;
        }

        self.apply_deferred_permissions()?;
        Ok(self.report)
    }

    fn extract_entry<R: Read>(&mut self, entry: &mut tar::Entry<'_, R>) -> Result<()> {
        let kind = EntryType::from(entry.header().entry_type());
        let name = entry_name(entry);

        if kind == EntryType::Other {
            let label = ignored_label(entry.header().entry_type());
            tracing::debug!(entry = %name, kind = label, "ignoring entry");
            self.report.entries_ignored += 1;
            self.report.add_warning(format!("ignored {label} {name}"));
            return Ok(());
        }

        let raw_path = entry.path().map_err(|e| corrupt_stream(&e))?.into_owned();
        let safe = match SafePath::validate(&raw_path, &self.dest) {
            Ok(safe) => safe,
            Err(violation) => {
                tracing::warn!(entry = %name, reason = %violation, "skipping unsafe entry");
                self.report.add_skipped(name);
                return Ok(());
            }
        };

        let mode = sanitize_permissions(entry.header().mode().unwrap_or(0o644));

        match kind {
            EntryType::Directory => self.create_directory(&safe, mode),
            EntryType::File if safe.is_root() => {
                tracing::warn!(entry = %name, "skipping file entry naming the destination");
                self.report.add_skipped(name);
                Ok(())
            }
            EntryType::File => self.extract_file(entry, &safe, mode),
            EntryType::Other => Ok(()),
        }
    }

    fn create_directory(&mut self, safe: &SafePath, mode: u32) -> Result<()> {
        if safe.is_root() {
            return Ok(());
        }

        let target = self.dest.join(safe);
        std::fs::create_dir_all(&target).map_err(|e| {
            ArchiveError::io(format!("failed to create directory {}", target.display()), e)
        })?;

        self.report.directories_created += 1;
        self.deferred_dirs.push((target, mode));
        Ok(())
    }

    fn extract_file<R: Read>(
        &mut self,
        entry: &mut tar::Entry<'_, R>,
        safe: &SafePath,
        mode: u32,
    ) -> Result<()> {
        let target = self.dest.join(safe);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ArchiveError::io(format!("failed to create directory {}", parent.display()), e)
            })?;
        }

        let file = File::create(&target).map_err(|e| {
            ArchiveError::io(format!("failed to create file {}", target.display()), e)
        })?;
        let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);
        let written = copy_entry(entry, &mut writer, &mut self.buffer, &target)?;
        writer
            .flush()
            .map_err(|e| ArchiveError::io(format!("failed to write {}", target.display()), e))?;
        drop(writer);

        set_mode(&target, mode)?;

        tracing::trace!(path = %target.display(), bytes = written, "file extracted");
        self.report.files_extracted += 1;
        self.report.bytes_written += written;
        Ok(())
    }

    /// Deepest paths first: a parent losing its search bit must not block
    /// the chmod of anything below it.
    fn apply_deferred_permissions(&mut self) -> Result<()> {
        self.deferred_dirs.sort_by_key(|(dir, _)| Reverse(dir.components().count()));
        for (dir, mode) in self.deferred_dirs.drain(..) {
            set_mode(&dir, mode)?;
        }
        Ok(())
    }
}

fn ignored_label(kind: tar::EntryType) -> &'static str {
    match kind {
        tar::EntryType::Symlink => "symlink",
        tar::EntryType::Link => "hardlink",
        tar::EntryType::Char | tar::EntryType::Block => "device",
        tar::EntryType::Fifo => "fifo",
        _ => "entry",
    }
}

/// Copies an entry body, keeping read failures (container corruption)
/// apart from write failures (filesystem).
fn copy_entry<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
    target: &Path,
) -> Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(corrupt_stream(&e)),
        };
        writer
            .write_all(&buffer[..n])
            .map_err(|e| ArchiveError::io(format!("failed to write {}", target.display()), e))?;
        total += n as u64;
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
        ArchiveError::io(format!("failed to set permissions on {}", path.display()), e)
    })
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    if mode & 0o200 == 0 && path.is_file() {
        let mut perms = std::fs::metadata(path)
            .map_err(|e| ArchiveError::io(format!("failed to stat {}", path.display()), e))?
            .permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(path, perms).map_err(|e| {
            ArchiveError::io(format!("failed to set permissions on {}", path.display()), e)
        })?;
    }
    Ok(())
}
