//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use btxz_core::ArchiveInfo;
use btxz_core::ArchiveManifest;
use btxz_core::CreationReport;
use btxz_core::ExtractionReport;
use btxz_core::VerificationReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            output_path: String,
            level: &'static str,
            files_added: usize,
            directories_added: usize,
            bytes_read: u64,
            bytes_compressed: u64,
            archive_size: u64,
            compression_ratio: f64,
            entries_skipped: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = CreationOutput {
            output_path: output_path.display().to_string(),
            level: report.profile.as_str(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_read: report.bytes_read,
            bytes_compressed: report.bytes_compressed,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            entries_skipped: report.entries_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("create", data))
    }

    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput<'a> {
            output_dir: String,
            version: u16,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            entries_ignored: usize,
            skipped: &'a [String],
            warnings: &'a [String],
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            output_dir: output_dir.display().to_string(),
            version: report.version,
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            entries_ignored: report.entries_ignored,
            skipped: &report.skipped,
            warnings: &report.warnings,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_manifest(
        &self,
        manifest: &ArchiveManifest,
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct EntryOutput<'a> {
            path: &'a str,
            size: u64,
            mode: String,
            entry_type: &'static str,
        }

        #[derive(Serialize)]
        struct ManifestOutput<'a> {
            version: u16,
            total_entries: usize,
            total_size: u64,
            entries: Vec<EntryOutput<'a>>,
        }

        let data = ManifestOutput {
            version: manifest.version,
            total_entries: manifest.total_entries(),
            total_size: manifest.total_size(),
            entries: manifest
                .entries
                .iter()
                .map(|e| EntryOutput {
                    path: &e.path,
                    size: e.size,
                    mode: format!("{:04o}", e.mode),
                    entry_type: e.entry_type.as_str(),
                })
                .collect(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_verification_result(
        &self,
        archive: &Path,
        report: &VerificationReport,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct VerificationOutput {
            archive: String,
            version: u16,
            entries: usize,
            payload_bytes: u64,
            compressed_bytes: u64,
            decompressed_bytes: u64,
            duration_ms: u128,
        }

        let data = VerificationOutput {
            archive: archive.display().to_string(),
            version: report.version,
            entries: report.entries,
            payload_bytes: report.payload_bytes,
            compressed_bytes: report.compressed_bytes,
            decompressed_bytes: report.decompressed_bytes,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("test", data))
    }

    fn format_info(&self, archive: &Path, info: &ArchiveInfo) -> Result<()> {
        #[derive(Serialize)]
        struct InfoOutput {
            archive: String,
            version: u16,
            profile_tag: Option<u8>,
            profile: Option<&'static str>,
            cipher: &'static str,
            nonce_len: usize,
            compression: &'static str,
            time_cost: u32,
            memory_cost_kib: u32,
            parallelism: u8,
            header_len: usize,
        }

        let data = InfoOutput {
            archive: archive.display().to_string(),
            version: info.version,
            profile_tag: info.profile_tag,
            profile: info.profile.map(|p| p.as_str()),
            cipher: info.cipher,
            nonce_len: info.nonce_len,
            compression: info.compression,
            time_cost: info.kdf.time_cost,
            memory_cost_kib: info.kdf.memory_cost_kib,
            parallelism: info.kdf.parallelism,
            header_len: info.header_len,
        };

        Self::output(&JsonOutput::success("info", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
