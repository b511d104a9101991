//! Prompts shown around the version check.

use super::version::{ReleaseCheck, VersionCheck};
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

/// Whether the wizard may continue after the version check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGate {
    Proceed,
    Exit,
}

/// Run the version check, asking the user what to do when it doesn't pass.
///
/// While offline the user may retry as often as they like; declining
/// continues without a check. When a newer release exists the user is
/// offered to stop here and download it.
pub fn verify_version(
    ui: &mut dyn UserInterface,
    checker: &dyn ReleaseCheck,
) -> Result<VersionGate> {
    loop {
        let mut spinner = ui.start_spinner("Checking for a newer installer...");
        let result = checker.check();

        match result {
            VersionCheck::UpToDate { current, .. } => {
                spinner.finish_success(&format!("Installer is up to date ({})", current));
                return Ok(VersionGate::Proceed);
            }
            VersionCheck::Offline => {
                spinner.finish_error("No internet connection");
                let retry = ui
                    .prompt(&Prompt::confirm(
                        "retry_connection",
                        "Could not reach the internet. Try again?",
                        false,
                    ))?
                    .as_bool();
                if retry {
                    tracing::info!("Retrying connectivity check");
                    continue;
                }
                ui.warning("Continuing without checking for a newer installer");
                return Ok(VersionGate::Proceed);
            }
            VersionCheck::Failed { reason } => {
                spinner.finish_error("Could not check for a newer installer");
                ui.warning(&reason);
                return Ok(VersionGate::Proceed);
            }
            VersionCheck::UpdateAvailable {
                current,
                latest,
                url,
            } => {
                spinner.finish_success("Version check complete");
                ui.warning(&format!(
                    "A newer installer is available: {} -> {}",
                    current, latest
                ));
                if let Some(url) = url {
                    ui.message(&format!("Download from: {}", url));
                }

                let stop = ui
                    .prompt(&Prompt::confirm(
                        "stop_for_update",
                        "Stop here and download the new version?",
                        true,
                    ))?
                    .as_bool();
                if stop {
                    tracing::info!("User stopped to download {}", latest);
                    return Ok(VersionGate::Exit);
                }
                ui.warning(&format!("Continuing with outdated installer {}", current));
                return Ok(VersionGate::Proceed);
            }
        }
    }
}
