//! Install command implementation.
//!
//! The `ut-setup install` command runs the wizard. It is also what runs
//! when no command is given.

use tracing::{debug, info};

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::patch::PatcherCommand;
use crate::ui::UserInterface;
use crate::updates::VersionChecker;
use crate::wizard::{SetupState, Wizard, WizardOptions};

use super::dispatcher::{describe_config, Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    context: CommandContext,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(context: &CommandContext, args: InstallArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    fn wizard_options(&self, config: &crate::config::LoadedConfig) -> WizardOptions {
        let mut options = WizardOptions::from_config(config);
        options.pck = self.args.pck.clone();
        options.backup = options.backup && !self.args.no_backup;
        options.skip_version_check = self.args.skip_version_check;
        options.steam_roots = self.context.steam_roots();
        options.log_path = self.context.log_path.clone();
        if let Some(archive) = &self.args.archive {
            options.archive = archive.clone();
        }
        if let Some(patcher) = &self.args.patcher {
            options.patcher = PatcherCommand::new(patcher, config.settings.patcher_args.clone());
        }
        options
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.load_config()?;
        debug!("Configuration: {}", describe_config(&config));

        let options = self.wizard_options(&config);
        info!(
            "Archive {}, patcher {}",
            options.archive.display(),
            options.patcher.program.display()
        );

        let checker = Box::new(VersionChecker::from_settings(&config.settings));
        let state = SetupState::new(config.settings.installer_version.clone())?;

        let result = Wizard::new(ui, options, checker, state).run()?;
        info!(
            "Installed into {} ({})",
            result.pck_path.display(),
            result.edition
        );
        Ok(CommandResult::success())
    }
}
