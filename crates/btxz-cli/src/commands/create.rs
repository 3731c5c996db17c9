//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::password;
use crate::progress::Spinner;
use anyhow::Result;
use anyhow::bail;
use btxz_core::CreationConfig;
use btxz_core::create_archive;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite.",
            args.output.display()
        );
    }

    let password = password::resolve(&args.password, true)?;

    let config = CreationConfig::default()
        .with_profile(args.level)
        .with_follow_symlinks(args.follow_symlinks)
        .with_include_hidden(!args.no_hidden)
        .with_preserve_permissions(!args.no_permissions);

    tracing::debug!(level = %args.level, sources = args.sources.len(), "creating archive");

    let report = {
        let _spinner = Spinner::start("Encrypting", show_progress);
        add_archive_context(
            create_archive(&args.output, args.sources.as_slice(), &password, &config),
            &args.output,
        )?
    };

    formatter.format_creation_result(&args.output, &report)
}
