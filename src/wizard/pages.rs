//! Page bodies.

use std::path::Path;

use tracing::info;

use super::{PageOutcome, Wizard};
use crate::bundle::ArchiveSource;
use crate::error::Result;
use crate::game::{quick_find, validate_target, GameError, GameTarget};
use crate::patch::PatchJob;
use crate::ui::{Prompt, PromptType};
use crate::updates::{verify_version, VersionGate};

use super::install::{extract_with_progress, patch_with_log};

impl Wizard<'_> {
    pub(super) fn welcome(&mut self) -> Result<PageOutcome> {
        self.ui.show_header("Until Then: Brazilian Portuguese translation");
        self.ui.message(&format!(
            "This wizard applies the translation to {}.",
            self.options.layout.pck_name
        ));
        if self.options.backup {
            self.ui
                .message("A backup of the original file is kept next to it.");
        }

        let start = self
            .ui
            .prompt(&Prompt::confirm("start", "Start the installation?", true))?
            .as_bool();
        Ok(if start {
            PageOutcome::Next
        } else {
            PageOutcome::Exit
        })
    }

    pub(super) fn verify(&mut self) -> Result<PageOutcome> {
        if self.options.skip_version_check {
            self.ui.message("Skipping the version check");
            info!("Version check skipped");
            self.state.version_verified = true;
            return Ok(PageOutcome::Next);
        }

        match verify_version(&mut *self.ui, self.checker.as_ref())? {
            VersionGate::Proceed => {
                self.state.version_verified = true;
                Ok(PageOutcome::Next)
            }
            VersionGate::Exit => Ok(PageOutcome::Exit),
        }
    }

    pub(super) fn locate(&mut self) -> Result<PageOutcome> {
        if let Some(pck) = self.options.pck.clone() {
            let target = validate_target(&pck, &self.options.layout)?;
            self.accept(&target);
            return Ok(PageOutcome::Next);
        }

        let mut spinner = self.ui.start_spinner("Looking for Until Then in Steam...");
        match quick_find(&self.options.steam_roots, &self.options.layout) {
            Some(target) => {
                spinner.finish_success(&format!(
                    "Found the {} at {}",
                    target.edition,
                    target.pck_path.display()
                ));
                let use_it = self
                    .ui
                    .prompt(&Prompt::confirm(
                        "use_detected",
                        "Install the translation there?",
                        true,
                    ))?
                    .as_bool();
                if use_it {
                    self.accept(&target);
                    return Ok(PageOutcome::Next);
                }
            }
            None => spinner.finish_error("Could not find the game automatically"),
        }

        self.ask_for_path()
    }

    /// Ask for the package path until a valid one is given.
    ///
    /// An empty answer goes back in interactive mode; without a terminal
    /// there is nobody to ask again, so it is a not-found error.
    fn ask_for_path(&mut self) -> Result<PageOutcome> {
        let prompt = Prompt {
            key: "pck_path".to_string(),
            question: format!(
                "Path to {} (leave empty to go back)",
                self.options.layout.pck_name
            ),
            prompt_type: PromptType::Input,
            default: Some(String::new()),
        };

        loop {
            let answer = self.ui.prompt(&prompt)?.as_string();
            let answer = answer.trim().trim_matches('"').trim_matches('\'');

            if answer.is_empty() {
                if self.ui.is_interactive() {
                    return Ok(PageOutcome::Back);
                }
                return Err(GameError::NotFound.into());
            }

            match validate_target(Path::new(answer), &self.options.layout) {
                Ok(target) => {
                    self.accept(&target);
                    return Ok(PageOutcome::Next);
                }
                Err(e) if self.ui.is_interactive() => self.ui.error(&e.to_string()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn accept(&mut self, target: &GameTarget) {
        info!(
            "Selected {} ({})",
            target.pck_path.display(),
            target.edition
        );
        self.ui.success(&format!(
            "Using the {} at {}",
            target.edition,
            target.pck_path.display()
        ));
        self.state.select(target);
    }

    pub(super) fn install(&mut self) -> Result<PageOutcome> {
        let pck_path = self.state.pck_path.clone().ok_or(GameError::NotFound)?;

        let assets = extract_with_progress(
            &mut *self.ui,
            ArchiveSource::Path(self.options.archive.clone()),
            &self.state.assets_dir(),
        )?;

        let job = PatchJob {
            pck_path,
            assets_dir: assets,
            command: self.options.patcher.clone(),
            backup: self.options.backup,
        };
        self.outcome = Some(patch_with_log(&mut *self.ui, &job)?);
        Ok(PageOutcome::Next)
    }

    pub(super) fn finish(&mut self) -> Result<PageOutcome> {
        self.ui.success("The translation is installed. Enjoy the game!");

        let backup = self.outcome.as_ref().and_then(|o| o.backup.clone());
        if let Some(backup) = backup {
            self.ui
                .message(&format!("Original package saved as {}", backup.display()));
            self.ui
                .show_hint("Run `ut-setup restore` to put the original back.");
        }
        if let Some(log) = &self.options.log_path {
            self.ui.show_hint(&format!("Log file: {}", log.display()));
        }
        Ok(PageOutcome::Next)
    }
}
