//! The installation wizard.
//!
//! Pages run in a fixed order:
//!
//! ```text
//! Welcome -> VerifyVersion -> LocateGame -> Install -> Finish
//! ```
//!
//! Each page returns a [`PageOutcome`]. Going back from a later page skips
//! the version check once it has passed.

pub mod install;
pub mod pages;
pub mod state;

pub use install::{extract_with_progress, patch_with_log};
pub use state::SetupState;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::LoadedConfig;
use crate::error::{Result, SetupError};
use crate::game::{GameEdition, GameLayout};
use crate::patch::{PatchOutcome, PatcherCommand};
use crate::ui::UserInterface;
use crate::updates::ReleaseCheck;

/// Wizard pages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Welcome,
    VerifyVersion,
    LocateGame,
    Install,
    Finish,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Welcome,
        Page::VerifyVersion,
        Page::LocateGame,
        Page::Install,
        Page::Finish,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::VerifyVersion => "Installer version",
            Page::LocateGame => "Locate the game",
            Page::Install => "Install",
            Page::Finish => "Done",
        }
    }
}

/// Where to go after a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Next,
    Back,
    Exit,
}

/// Options for a wizard run.
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// Package chosen up front; skips detection and the path prompt.
    pub pck: Option<PathBuf>,
    pub backup: bool,
    pub skip_version_check: bool,
    /// Steam installs searched by quick find.
    pub steam_roots: Vec<PathBuf>,
    pub archive: PathBuf,
    pub patcher: PatcherCommand,
    pub layout: GameLayout,
    /// Shown on the final page.
    pub log_path: Option<PathBuf>,
}

impl WizardOptions {
    /// Options taken from the loaded configuration.
    pub fn from_config(config: &LoadedConfig) -> Self {
        let settings = &config.settings;
        Self {
            pck: None,
            backup: settings.backup,
            skip_version_check: false,
            steam_roots: Vec::new(),
            archive: config.archive_path(),
            patcher: PatcherCommand::new(config.patcher_path(), settings.patcher_args.clone()),
            layout: settings.layout(),
            log_path: None,
        }
    }
}

/// Summary of a completed installation.
#[derive(Debug, Clone)]
pub struct WizardResult {
    pub pck_path: PathBuf,
    pub edition: GameEdition,
    pub backup: Option<PathBuf>,
}

/// Drives the pages against a [`UserInterface`].
pub struct Wizard<'a> {
    ui: &'a mut dyn UserInterface,
    options: WizardOptions,
    checker: Box<dyn ReleaseCheck>,
    state: SetupState,
    outcome: Option<PatchOutcome>,
}

impl<'a> Wizard<'a> {
    pub fn new(
        ui: &'a mut dyn UserInterface,
        options: WizardOptions,
        checker: Box<dyn ReleaseCheck>,
        state: SetupState,
    ) -> Self {
        Self {
            ui,
            options,
            checker,
            state,
            outcome: None,
        }
    }

    /// Run every page. Exiting early is reported as [`SetupError::Cancelled`].
    pub fn run(mut self) -> Result<WizardResult> {
        let total = Page::ALL.len();
        let mut index = 0;

        while index < total {
            let page = Page::ALL[index];
            if page == Page::VerifyVersion && self.state.version_verified {
                index += 1;
                continue;
            }
            debug!("Entering page {:?}", page);
            self.ui.show_page(index + 1, total, page.title());

            match self.show(page)? {
                PageOutcome::Next => index += 1,
                PageOutcome::Back => index = self.back_from(index),
                PageOutcome::Exit => {
                    info!("Wizard left on page {:?}", page);
                    return Err(SetupError::Cancelled);
                }
            }
        }

        let pck_path = self.state.pck_path.clone().ok_or(SetupError::Cancelled)?;
        Ok(WizardResult {
            pck_path,
            edition: self.state.edition(),
            backup: self.outcome.and_then(|o| o.backup),
        })
    }

    fn show(&mut self, page: Page) -> Result<PageOutcome> {
        match page {
            Page::Welcome => self.welcome(),
            Page::VerifyVersion => self.verify(),
            Page::LocateGame => self.locate(),
            Page::Install => self.install(),
            Page::Finish => self.finish(),
        }
    }

    fn back_from(&self, index: usize) -> usize {
        let mut target = index.saturating_sub(1);
        while target > 0 && Page::ALL[target] == Page::VerifyVersion && self.state.version_verified
        {
            target -= 1;
        }
        target
    }
}
