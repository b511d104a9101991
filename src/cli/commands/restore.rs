//! Restore command implementation.
//!
//! The `ut-setup restore` command undoes an installation by moving the
//! newest backup back over the package.

use crate::cli::args::RestoreArgs;
use crate::error::Result;
use crate::game::{quick_find, validate_target, GameError};
use crate::patch::restore_backup;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The restore command implementation.
pub struct RestoreCommand {
    context: CommandContext,
    args: RestoreArgs,
}

impl RestoreCommand {
    /// Create a new restore command.
    pub fn new(context: &CommandContext, args: RestoreArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for RestoreCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        let layout = config.settings.layout();

        let target = match &self.args.pck {
            Some(pck) => validate_target(pck, &layout)?,
            None => {
                quick_find(&self.context.steam_roots(), &layout).ok_or(GameError::NotFound)?
            }
        };

        let backup = restore_backup(&target.pck_path)?;
        ui.success(&format!(
            "Restored the original {} from {}",
            layout.pck_name,
            backup.display()
        ));
        Ok(CommandResult::success())
    }
}
