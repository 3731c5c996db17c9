//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::password;
use crate::progress::Spinner;
use anyhow::Context;
use anyhow::Result;
use btxz_core::extract_archive;
use std::env;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let password = password::resolve(&args.password, false)?;

    let report = {
        let _spinner = Spinner::start("Decrypting", show_progress);
        add_archive_context(
            extract_archive(&args.archive, &output_dir, &password),
            &args.archive,
        )?
    };

    if report.has_skipped() {
        formatter.format_warning(&format!(
            "{} entries were not extracted because their paths leave the output directory",
            report.skipped.len()
        ));
    }

    formatter.format_extraction_result(&output_dir, &report)
}
