//! Check-update command implementation.
//!
//! The `ut-setup check-update` command runs the version check on its own.
//! It never prompts: the outcome is printed and reflected in the exit code
//! (1 when a newer installer exists).

use crate::cli::args::CheckUpdateArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::updates::{ReleaseCheck, VersionCheck, VersionChecker};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check-update command implementation.
pub struct CheckUpdateCommand {
    context: CommandContext,
    args: CheckUpdateArgs,
}

impl CheckUpdateCommand {
    /// Create a new check-update command.
    pub fn new(context: &CommandContext, args: CheckUpdateArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for CheckUpdateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let checker = VersionChecker::from_settings(&config.settings);
        let check = checker.check();

        if self.args.json {
            let json = serde_json::to_string_pretty(&check)
                .map_err(|e| anyhow::anyhow!("Failed to serialize result: {}", e))?;
            println!("{}", json);
        } else {
            report(ui, &check);
        }

        Ok(match check {
            VersionCheck::UpdateAvailable { .. } => CommandResult::failure(1),
            _ => CommandResult::success(),
        })
    }
}

fn report(ui: &mut dyn UserInterface, check: &VersionCheck) {
    match check {
        VersionCheck::UpToDate { current, .. } => {
            ui.success(&format!("Installer {} is up to date", current));
        }
        VersionCheck::UpdateAvailable {
            current,
            latest,
            url,
        } => {
            ui.warning(&format!(
                "A newer installer is available: {} -> {}",
                current, latest
            ));
            if let Some(url) = url {
                ui.message(&format!("Download from: {}", url));
            }
        }
        VersionCheck::Offline => ui.warning("No internet connection; nothing was checked"),
        VersionCheck::Failed { reason } => {
            ui.warning(&format!("Could not check for updates: {}", reason));
        }
    }
}
