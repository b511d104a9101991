//! Extract command implementation.
//!
//! The `ut-setup extract <DEST>` command unpacks the translation archive
//! without touching the game.

use crate::bundle::ArchiveSource;
use crate::cli::args::ExtractArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::wizard::extract_with_progress;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The extract command implementation.
pub struct ExtractCommand {
    context: CommandContext,
    args: ExtractArgs,
}

impl ExtractCommand {
    /// Create a new extract command.
    pub fn new(context: &CommandContext, args: ExtractArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }
}

impl Command for ExtractCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let archive = match &self.args.archive {
            Some(archive) => archive.clone(),
            None => self.context.load_config()?.archive_path(),
        };

        let dir = extract_with_progress(ui, ArchiveSource::Path(archive), &self.args.dest)?;
        ui.success(&format!("Translation files are in {}", dir.display()));
        Ok(CommandResult::success())
    }
}
