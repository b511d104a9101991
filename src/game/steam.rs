//! Steam install and library discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::vdf::{self, VdfValue};

/// Steam install directories that exist on this machine, most likely first.
pub fn find_steam_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    for candidate in candidate_roots() {
        if candidate.is_dir() && !roots.iter().any(|r| same_dir(r, &candidate)) {
            roots.push(candidate);
        }
    }
    debug!("Steam roots: {:?}", roots);
    roots
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(target_os = "windows")]
fn candidate_roots() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    candidates.extend(registry::steam_path());
    for var in ["ProgramFiles(x86)", "ProgramFiles"] {
        if let Some(dir) = std::env::var_os(var) {
            candidates.push(PathBuf::from(dir).join("Steam"));
        }
    }
    candidates
}

#[cfg(target_os = "macos")]
fn candidate_roots() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| vec![home.join("Library/Application Support/Steam")])
        .unwrap_or_default()
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn candidate_roots() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        home.join(".steam/steam"),
        home.join(".local/share/Steam"),
        home.join("snap/steam/common/.local/share/Steam"),
        home.join(".var/app/com.valvesoftware.Steam/data/Steam"),
    ]
}

#[cfg(target_os = "windows")]
mod registry {
    use std::path::PathBuf;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};
    use winreg::RegKey;

    /// Steam path from the registry: per-user key first, then the machine keys.
    pub fn steam_path() -> Vec<PathBuf> {
        let mut found = Vec::new();

        if let Ok(key) = RegKey::predef(HKEY_CURRENT_USER).open_subkey(r"Software\Valve\Steam") {
            if let Ok(path) = key.get_value::<String, _>("SteamPath") {
                found.push(PathBuf::from(path));
            }
        }

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        for subkey in [r"SOFTWARE\Wow6432Node\Valve\Steam", r"SOFTWARE\Valve\Steam"] {
            if let Ok(key) = hklm.open_subkey(subkey) {
                if let Ok(path) = key.get_value::<String, _>("InstallPath") {
                    found.push(PathBuf::from(path));
                }
            }
        }

        found
    }
}

/// Library folders registered with the Steam install at `root`.
///
/// Falls back to `root` itself when `libraryfolders.vdf` is missing or
/// lists nothing.
pub fn library_folders(root: &Path) -> Vec<PathBuf> {
    let vdf_path = root.join("steamapps").join("libraryfolders.vdf");
    let mut libraries = Vec::new();

    match vdf::parse_file(&vdf_path) {
        Ok(data) => {
            if let Some(folders) = data.get("libraryfolders") {
                for (key, entry) in folders.entries() {
                    match entry {
                        VdfValue::Map(_) => {
                            if let Some(path) = entry.get("path").and_then(VdfValue::as_str) {
                                libraries.push(PathBuf::from(path));
                            }
                        }
                        // Older format: "1" "D:\\SteamLibrary"
                        VdfValue::Str(path) if key.chars().all(|c| c.is_ascii_digit()) => {
                            libraries.push(PathBuf::from(path));
                        }
                        VdfValue::Str(_) => {}
                    }
                }
            }
        }
        Err(e) => debug!("No library list at {}: {}", vdf_path.display(), e),
    }

    if libraries.is_empty() {
        libraries.push(root.to_path_buf());
    }
    libraries
}

/// Install directory of `app_id` in any library of the Steam install at `root`.
pub fn find_app_dir(root: &Path, app_id: u32) -> Option<PathBuf> {
    for library in library_folders(root) {
        let steamapps = library.join("steamapps");
        let manifest_path = steamapps.join(format!("appmanifest_{app_id}.acf"));
        if !manifest_path.is_file() {
            continue;
        }

        let manifest = match vdf::parse_file(&manifest_path) {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping unreadable manifest: {}", e);
                continue;
            }
        };

        let Some(install_dir) = manifest
            .get_path(&["AppState", "installdir"])
            .and_then(VdfValue::as_str)
        else {
            continue;
        };

        let game_path = steamapps.join("common").join(install_dir);
        if game_path.is_dir() {
            debug!("App {} installed at {}", app_id, game_path.display());
            return Some(game_path);
        }
    }

    None
}
