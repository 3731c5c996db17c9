//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use btxz_core::ArchiveInfo;
use btxz_core::ArchiveManifest;
use btxz_core::CreationReport;
use btxz_core::ExtractionReport;
use btxz_core::VerificationReport;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn success(&self, text: &str) {
        if self.use_colors {
            self.line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            self.line(text);
        }
    }

    fn section(&self, title: &str) {
        self.line("");
        if self.use_colors {
            self.line(&format!("{}", style(title).yellow().bold()));
        } else {
            self.line(title);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.success(&format!("Archive created: {}", output_path.display()));
        self.line("");
        self.line(&format!("  Level:            {}", report.profile));
        self.line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        self.line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_read)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));
        if report.bytes_read > 0 {
            self.line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }
        if report.entries_skipped > 0 {
            self.line(&format!("  Entries skipped:  {}", report.entries_skipped));
        }
        if self.verbose {
            self.line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            self.section("Warnings:");
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.success(&format!("Extracted to {}", output_dir.display()));
        self.line(&format!("  Files extracted: {}", report.files_extracted));
        self.line(&format!("  Directories: {}", report.directories_created));
        self.line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));
        if report.entries_ignored > 0 {
            self.line(&format!("  Ignored entries: {}", report.entries_ignored));
        }

        if self.verbose {
            self.line(&format!("  Format version: {}", report.version));
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        if report.has_skipped() {
            self.section("Skipped (unsafe paths):");
            for name in &report.skipped {
                self.line(&format!("  - {name}"));
            }
        }

        if report.has_warnings() {
            self.section("Warnings:");
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_manifest(
        &self,
        manifest: &ArchiveManifest,
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in &manifest.entries {
                self.line(&entry.path);
            }
            return Ok(());
        }

        for entry in &manifest.entries {
            let size = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            self.line(&format!(
                "{} {:>10}  {}",
                entry.mode_string(),
                size,
                entry.path
            ));
        }

        self.line("");
        self.line(&format!(
            "Total: {} entries, {}",
            Self::format_number(manifest.total_entries()),
            Self::format_size(manifest.total_size())
        ));

        Ok(())
    }

    fn format_verification_result(
        &self,
        archive: &Path,
        report: &VerificationReport,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.success(&format!(
            "{}: OK ({} entries, {} decompressed)",
            archive.display(),
            Self::format_number(report.entries),
            Self::format_size(report.decompressed_bytes)
        ));

        if self.verbose {
            self.line(&format!(
                "  Payload: {}",
                Self::format_size(report.payload_bytes)
            ));
            self.line(&format!(
                "  Compressed: {}",
                Self::format_size(report.compressed_bytes)
            ));
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_info(&self, archive: &Path, info: &ArchiveInfo) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let profile = match (info.profile, info.profile_tag) {
            (Some(profile), Some(tag)) => format!("{profile} (tag {tag})"),
            (None, Some(tag)) => format!("unknown (tag {tag})"),
            _ => "not recorded".to_string(),
        };

        self.line(&format!("Archive:      {}", archive.display()));
        self.line(&format!("Version:      {}", info.version));
        self.line(&format!("Profile:      {profile}"));
        self.line(&format!(
            "Cipher:       {} ({}-byte nonce)",
            info.cipher, info.nonce_len
        ));
        self.line(&format!("Compression:  {}", info.compression));
        self.line(&format!(
            "KDF:          Argon2id t={} m={} KiB p={}",
            info.kdf.time_cost, info.kdf.memory_cost_kib, info.kdf.parallelism
        ));
        if self.verbose {
            self.line(&format!("Header:       {} bytes", info.header_len));
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("WARNING: {message}"));
        }
    }
}
