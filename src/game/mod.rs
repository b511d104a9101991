//! Locating the game's package file.
//!
//! - [`steam`] - Steam install and library discovery
//! - [`vdf`] - text KeyValues parser for Steam's `.vdf`/`.acf` files
//! - [`locate`] - quick find and validation of `UntilThen.pck`

pub mod locate;
pub mod steam;
pub mod vdf;

pub use locate::{quick_find, validate_target};
pub use steam::{find_app_dir, find_steam_roots, library_folders};

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Default package file name.
pub const PCK_FILE_NAME: &str = "UntilThen.pck";

/// Install directory name used by the demo build.
pub const DEMO_DIR_NAME: &str = "Until Then Demo";

/// Errors raised while locating or validating the package.
#[derive(Debug, Error)]
pub enum GameError {
    /// Quick find did not turn up a package.
    #[error("The game package could not be located automatically. Select it manually with --pck.")]
    NotFound,

    /// The selected path does not exist.
    #[error("File not found: {path}")]
    Missing { path: PathBuf },

    /// The selected path exists but is not a regular file.
    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    /// The selected file does not have the `.pck` extension.
    #[error("Not a .pck file: {path}")]
    WrongExtension { path: PathBuf },

    /// A Steam metadata file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Vdf { path: PathBuf, message: String },
}

/// Which build of the game a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEdition {
    Full,
    Demo,
}

impl GameEdition {
    /// Search order for quick find.
    pub const ALL: [GameEdition; 2] = [GameEdition::Full, GameEdition::Demo];

    /// Steam app id of this edition.
    pub fn app_id(self) -> u32 {
        match self {
            Self::Full => 1574820,
            Self::Demo => 2296400,
        }
    }

    pub fn is_demo(self) -> bool {
        matches!(self, Self::Demo)
    }
}

impl fmt::Display for GameEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full game"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// File names that identify the package on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLayout {
    /// Package file name inside the install directory.
    pub pck_name: String,
    /// Parent directory name that marks a demo install.
    pub demo_dir_name: String,
}

impl Default for GameLayout {
    fn default() -> Self {
        Self {
            pck_name: PCK_FILE_NAME.to_string(),
            demo_dir_name: DEMO_DIR_NAME.to_string(),
        }
    }
}

/// A validated package ready to be patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameTarget {
    pub pck_path: PathBuf,
    pub edition: GameEdition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edition_app_ids() {
        assert_eq!(GameEdition::Full.app_id(), 1574820);
        assert_eq!(GameEdition::Demo.app_id(), 2296400);
    }

    #[test]
    fn quick_find_prefers_full_game() {
        assert_eq!(GameEdition::ALL[0], GameEdition::Full);
    }

    #[test]
    fn edition_display() {
        assert_eq!(GameEdition::Full.to_string(), "full game");
        assert_eq!(GameEdition::Demo.to_string(), "demo");
    }

    #[test]
    fn edition_serializes_snake_case() {
        let json = serde_json::to_string(&GameEdition::Demo).unwrap();
        assert_eq!(json, "\"demo\"");
    }

    #[test]
    fn default_layout() {
        let layout = GameLayout::default();
        assert_eq!(layout.pck_name, "UntilThen.pck");
        assert_eq!(layout.demo_dir_name, "Until Then Demo");
    }
}
