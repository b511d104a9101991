//! Quick find and validation of the game package.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::steam::find_app_dir;
use super::{GameEdition, GameError, GameLayout, GameTarget};

/// Search the given Steam roots for the package.
///
/// The full game wins over the demo when both are installed.
pub fn quick_find(steam_roots: &[PathBuf], layout: &GameLayout) -> Option<GameTarget> {
    for edition in GameEdition::ALL {
        for root in steam_roots {
            let Some(install_dir) = find_app_dir(root, edition.app_id()) else {
                continue;
            };

            let candidate = install_dir.join(&layout.pck_name);
            if candidate.is_file() {
                let pck_path = candidate.canonicalize().unwrap_or(candidate);
                info!("Found {} package at {}", edition, pck_path.display());
                return Some(GameTarget { pck_path, edition });
            }
            debug!(
                "{} installed at {} but {} is missing",
                edition,
                install_dir.display(),
                layout.pck_name
            );
        }
    }

    None
}

/// Check that `path` is an existing `.pck` file and work out its edition.
pub fn validate_target(path: &Path, layout: &GameLayout) -> Result<GameTarget, GameError> {
    if !path.exists() {
        return Err(GameError::Missing {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(GameError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let is_pck = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pck"))
        .unwrap_or(false);
    if !is_pck {
        return Err(GameError::WrongExtension {
            path: path.to_path_buf(),
        });
    }

    let in_demo_dir = path
        .parent()
        .and_then(Path::file_name)
        .map(|name| name == layout.demo_dir_name.as_str())
        .unwrap_or(false);
    let edition = if in_demo_dir {
        GameEdition::Demo
    } else {
        GameEdition::Full
    };

    Ok(GameTarget {
        pck_path: path.to_path_buf(),
        edition,
    })
}
