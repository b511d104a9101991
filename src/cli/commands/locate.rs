//! Locate command implementation.
//!
//! The `ut-setup locate` command runs quick find and reports the result.

use crate::cli::args::LocateArgs;
use crate::error::Result;
use crate::game::{quick_find, GameError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The locate command implementation.
pub struct LocateCommand {
    context: CommandContext,
    args: LocateArgs,
}

impl LocateCommand {
    /// Create a new locate command.
    pub fn new(context: &CommandContext, args: LocateArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for LocateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let roots = self.context.steam_roots();
        tracing::debug!("Searching {} Steam root(s)", roots.len());

        let target = quick_find(&roots, &config.settings.layout()).ok_or(GameError::NotFound)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&target)
                .map_err(|e| anyhow::anyhow!("Failed to serialize result: {}", e))?;
            println!("{}", json);
        } else {
            ui.success(&format!("Found the {}", target.edition));
            ui.message(&target.pck_path.display().to_string());
        }
        Ok(CommandResult::success())
    }
}
