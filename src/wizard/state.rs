//! Per-run wizard state.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::game::{GameEdition, GameTarget};

/// Name of the extracted translation directory inside the work dir.
const ASSETS_DIR_NAME: &str = "translation";

/// State carried from page to page.
///
/// The work directory is deleted when the state is dropped, whether the
/// run finished, failed or was cancelled.
#[derive(Debug)]
pub struct SetupState {
    pub pck_path: Option<PathBuf>,
    pub is_demo: bool,
    pub work_dir: TempDir,
    pub installer_version: String,
    pub version_verified: bool,
}

impl SetupState {
    pub fn new(installer_version: impl Into<String>) -> std::io::Result<Self> {
        let work_dir = tempfile::Builder::new().prefix("ut-setup-").tempdir()?;
        tracing::debug!("Work directory: {}", work_dir.path().display());
        Ok(Self {
            pck_path: None,
            is_demo: false,
            work_dir,
            installer_version: installer_version.into(),
            version_verified: false,
        })
    }

    /// Record the package the translation will be applied to.
    pub fn select(&mut self, target: &GameTarget) {
        self.pck_path = Some(target.pck_path.clone());
        self.is_demo = target.edition.is_demo();
    }

    pub fn edition(&self) -> GameEdition {
        if self.is_demo {
            GameEdition::Demo
        } else {
            GameEdition::Full
        }
    }

    /// Where the translation archive is extracted.
    pub fn assets_dir(&self) -> PathBuf {
        self.work_dir.path().join(ASSETS_DIR_NAME)
    }
}
