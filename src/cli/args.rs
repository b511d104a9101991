//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Installer for the Until Then Brazilian Portuguese translation.
#[derive(Debug, Parser)]
#[command(name = "ut-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides setup.yml next to the executable)
    #[arg(short, long, global = true, env = "UT_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output, including every patcher line
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write the log here instead of setup.log next to the executable
    #[arg(long, global = true, value_name = "PATH", env = "UT_SETUP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Steam install to search instead of the detected ones (repeatable)
    #[arg(long = "steam-root", global = true, value_name = "DIR")]
    pub steam_roots: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the translation (default if no command specified)
    Install(InstallArgs),

    /// Find the game package and print where it is
    Locate(LocateArgs),

    /// Extract the bundled translation files
    Extract(ExtractArgs),

    /// Check whether a newer installer has been released
    CheckUpdate(CheckUpdateArgs),

    /// Put the newest backup back over the game package
    Restore(RestoreArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Game package to patch (skips detection)
    #[arg(long, value_name = "PATH", env = "UT_SETUP_PCK")]
    pub pck: Option<PathBuf>,

    /// Replace the package without keeping a backup
    #[arg(long)]
    pub no_backup: bool,

    /// Do not look for a newer installer
    #[arg(long, env = "UT_SETUP_SKIP_VERSION_CHECK")]
    pub skip_version_check: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Translation archive to install
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Patcher executable to run
    #[arg(long, value_name = "PATH")]
    pub patcher: Option<PathBuf>,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `extract` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExtractArgs {
    /// New or empty directory to extract into
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Translation archive to extract
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,
}

/// Arguments for the `check-update` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckUpdateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `restore` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RestoreArgs {
    /// Game package to restore (skips detection)
    #[arg(long, value_name = "PATH", env = "UT_SETUP_PCK")]
    pub pck: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_means_install() {
        let cli = Cli::try_parse_from(["ut-setup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn install_flags() {
        let cli = Cli::try_parse_from([
            "ut-setup",
            "install",
            "--pck",
            "/games/UntilThen.pck",
            "--no-backup",
            "--non-interactive",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Install(args)) => {
                assert_eq!(args.pck, Some(PathBuf::from("/games/UntilThen.pck")));
                assert!(args.no_backup);
                assert!(args.non_interactive);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn steam_root_is_repeatable_and_global() {
        let cli = Cli::try_parse_from([
            "ut-setup",
            "locate",
            "--steam-root",
            "/a",
            "--steam-root",
            "/b",
        ])
        .unwrap();
        assert_eq!(
            cli.steam_roots,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ut-setup", "-q", "-v"]).is_err());
    }

    #[test]
    fn extract_requires_destination() {
        assert!(Cli::try_parse_from(["ut-setup", "extract"]).is_err());
    }
}
