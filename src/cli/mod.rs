//! Command-line interface for ut-setup.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//!
//! [`report_error`] is how every command failure reaches the user.

pub mod args;
pub mod commands;

pub use args::{
    CheckUpdateArgs, Cli, Commands, CompletionsArgs, ExtractArgs, InstallArgs, LocateArgs,
    RestoreArgs,
};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::error::SetupError;
use crate::ui::UserInterface;

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Show a failed command to the user, pointing at the log file.
///
/// A cancelled run is not an error and is shown as a warning.
pub fn report_error(ui: &mut dyn UserInterface, err: &SetupError, log_path: Option<&Path>) {
    tracing::error!("{}", err);
    if matches!(err, SetupError::Cancelled) {
        ui.warning(&err.to_string());
        return;
    }
    ui.error(&format!("Error: {}", err));
    if let Some(path) = log_path {
        ui.show_hint(&format!("See {} for details", path.display()));
    }
}
