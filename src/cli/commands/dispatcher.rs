//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for what every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, InstallArgs};
use crate::config::{executable_dir, load_settings, validate, LoadedConfig};
use crate::error::Result;
use crate::game::find_steam_roots;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Global options every command can use.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// `--config`, if given
    pub config_path: Option<PathBuf>,
    /// Where `setup.yml` is looked up otherwise
    pub search_dir: PathBuf,
    /// `--steam-root` values
    pub steam_roots: Vec<PathBuf>,
    /// Log file of this run
    pub log_path: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: None,
            search_dir: search_dir.into(),
            steam_roots: Vec::new(),
            log_path: None,
        }
    }

    /// Context from parsed global flags.
    pub fn from_cli(cli: &Cli, log_path: Option<PathBuf>) -> Self {
        Self {
            config_path: cli.config.clone(),
            search_dir: executable_dir(),
            steam_roots: cli.steam_roots.clone(),
            log_path,
        }
    }

    /// Load and validate the configuration.
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let loaded = load_settings(self.config_path.as_deref(), &self.search_dir)?;
        validate(&loaded.settings)?;
        Ok(loaded)
    }

    /// Steam installs to search: the explicit ones, or the detected ones.
    pub fn steam_roots(&self) -> Vec<PathBuf> {
        if self.steam_roots.is_empty() {
            find_steam_roots()
        } else {
            self.steam_roots.clone()
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher sharing `context` with every command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let cmd = super::install::InstallCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Locate(args)) => {
                let cmd = super::locate::LocateCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Extract(args)) => {
                let cmd = super::extract::ExtractCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::CheckUpdate(args)) => {
                let cmd =
                    super::check_update::CheckUpdateCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Restore(args)) => {
                let cmd = super::restore::RestoreCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to install with default args
                let cmd =
                    super::install::InstallCommand::new(&self.context, InstallArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

/// Where the configuration came from, for logs.
pub(crate) fn describe_config(config: &LoadedConfig) -> String {
    match &config.source {
        Some(path) => path.display().to_string(),
        None => format!("defaults ({})", config.base_dir.display()),
    }
}
