//! btxz CLI - create, extract and inspect password-encrypted archives.

mod cli;
mod commands;
mod error;
mod output;
mod password;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.no_style);
    if cli.no_style {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.no_style && progress::should_show(cli.quiet, cli.json);

    match &cli.command {
        cli::Commands::Create(args) => commands::create::execute(args, &*formatter, show_progress),
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, show_progress)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter, show_progress),
        cli::Commands::Test(args) => commands::test::execute(args, &*formatter, show_progress),
        cli::Commands::Info(args) => commands::info::execute(args, &*formatter),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: bool, no_style: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("BTXZ_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_style)
        .init();
}
