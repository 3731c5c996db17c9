//! CLI argument parsing using clap.

use btxz_core::Profile;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "btxz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable all styling and colors
    #[arg(long, global = true)]
    pub no_style: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new encrypted archive
    Create(CreateArgs),
    /// Decrypt and extract archive contents
    Extract(ExtractArgs),
    /// List archive contents without extraction
    List(ListArgs),
    /// Verify archive integrity without extraction
    Test(TestArgs),
    /// Show header parameters (no password needed)
    Info(InfoArgs),
}

#[derive(clap::Args)]
pub struct PasswordArgs {
    /// Archive password (prompted for when omitted)
    #[arg(short, long, env = "BTXZ_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Output archive file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Source files or directories to archive
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Cost profile: low (fast), default, max (best)
    #[arg(short = 'l', long, default_value = "default", value_parser = parse_profile)]
    pub level: Profile,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    pub no_hidden: bool,

    /// Store fixed 0644/0755 modes instead of the source permissions
    #[arg(long)]
    pub no_permissions: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed file information
    #[arg(long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(clap::Args)]
pub struct TestArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

fn parse_profile(s: &str) -> Result<Profile, String> {
    s.parse::<Profile>().map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_profile_aliases() {
        assert_eq!(parse_profile("low").unwrap(), Profile::Low);
        assert_eq!(parse_profile("FAST").unwrap(), Profile::Low);
        assert_eq!(parse_profile("default").unwrap(), Profile::Default);
        assert_eq!(parse_profile("best").unwrap(), Profile::Max);
        assert!(parse_profile("ultra").is_err());
    }

    #[test]
    fn test_create_defaults() {
        let cli = Cli::try_parse_from(["btxz", "create", "out.btxz", "src/"]).unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.level, Profile::Default);
        assert!(!args.no_hidden);
        assert!(!args.force);
        assert!(!cli.no_style);
    }

    #[test]
    fn test_no_style_is_global() {
        let cli = Cli::try_parse_from(["btxz", "info", "a.btxz", "--no-style"]).unwrap();
        assert!(cli.no_style);
    }

    #[test]
    fn test_create_requires_source() {
        assert!(Cli::try_parse_from(["btxz", "create", "out.btxz"]).is_err());
    }
}
