//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::password;
use crate::progress::Spinner;
use anyhow::Result;
use btxz_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let password = password::resolve(&args.password, false)?;

    let manifest = {
        let _spinner = Spinner::start("Decrypting", show_progress);
        add_archive_context(list_archive(&args.archive, &password), &args.archive)?
    };

    formatter.format_manifest(&manifest, args.long, args.human_readable)
}
