//! Configuration schema for `setup.yml`.
//!
//! Every field is optional; a missing file behaves like an empty one.
//!
//! ```yaml
//! installer_version: "1.2.0"
//! release_repo_id: 1014041717
//! archive: assets/translation_files.zip
//! patcher:
//!   linux: tools/godotpcktool
//!   windows: tools/godotpcktool.exe
//! backup: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// GitHub repository id the translation releases are published under.
pub const DEFAULT_REPO_ID: u64 = 1014041717;

/// Default GitHub API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Installer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Version compared against the latest release tag
    pub installer_version: String,

    /// `owner/name` of the release repository, used when no id is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_repo: Option<String>,

    /// Numeric repository id; takes precedence over `release_repo`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_repo_id: Option<u64>,

    /// Base URL of the releases API
    pub api_base_url: String,

    /// `host:port` addresses tried to decide whether the machine is online
    pub probe_hosts: Vec<String>,

    /// Translation archive, relative to the resource directory
    pub archive: PathBuf,

    /// Patcher executable per platform
    pub patcher: PatcherPaths,

    /// Patcher argument template
    pub patcher_args: Vec<String>,

    /// Keep a backup of the original package
    pub backup: bool,

    /// Name of the game package file
    pub pck_name: String,

    /// Install directory name that marks the demo
    pub demo_dir_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            installer_version: env!("CARGO_PKG_VERSION").to_string(),
            release_repo: None,
            release_repo_id: Some(DEFAULT_REPO_ID),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            probe_hosts: crate::updates::DEFAULT_PROBE_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            archive: PathBuf::from("assets").join("translation_files.zip"),
            patcher: PatcherPaths::default(),
            patcher_args: default_patcher_args(),
            backup: true,
            pck_name: crate::game::PCK_FILE_NAME.to_string(),
            demo_dir_name: crate::game::DEMO_DIR_NAME.to_string(),
        }
    }
}

impl Settings {
    pub fn layout(&self) -> crate::game::GameLayout {
        crate::game::GameLayout {
            pck_name: self.pck_name.clone(),
            demo_dir_name: self.demo_dir_name.clone(),
        }
    }
}

fn default_patcher_args() -> Vec<String> {
    [
        "--pack",
        "${source}",
        "--action",
        "add",
        "--remove-prefix",
        "${assets}",
        "--file",
        "${assets}",
        "--output",
        "${output}",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Patcher executable per platform, relative to the resource directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatcherPaths {
    pub windows: PathBuf,
    pub linux: PathBuf,
    pub macos: PathBuf,
}

impl Default for PatcherPaths {
    fn default() -> Self {
        let tools = PathBuf::from("tools");
        Self {
            windows: tools.join("godotpcktool.exe"),
            linux: tools.join("godotpcktool"),
            macos: tools.join("godotpcktool-macos"),
        }
    }
}

impl PatcherPaths {
    /// Path for the platform this binary was built for.
    pub fn current(&self) -> &PathBuf {
        if cfg!(target_os = "windows") {
            &self.windows
        } else if cfg!(target_os = "macos") {
            &self.macos
        } else {
            &self.linux
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings: Settings = serde_yaml::from_str(
            "backup: false\nrelease_repo: someone/translation\npatcher:\n  linux: bin/pck\n",
        )
        .unwrap();

        assert!(!settings.backup);
        assert_eq!(settings.release_repo.as_deref(), Some("someone/translation"));
        assert_eq!(settings.patcher.linux, PathBuf::from("bin/pck"));
        assert_eq!(
            settings.patcher.windows,
            PathBuf::from("tools").join("godotpcktool.exe")
        );
        assert_eq!(settings.pck_name, "UntilThen.pck");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: std::result::Result<Settings, _> = serde_yaml::from_str("bakup: true");
        assert!(result.is_err());
    }

    #[test]
    fn default_args_use_job_variables() {
        let args = Settings::default().patcher_args.join(" ");
        for var in ["${source}", "${assets}", "${output}"] {
            assert!(args.contains(var), "missing {var}");
        }
    }

    #[test]
    fn probe_hosts_can_be_emptied() {
        let settings: Settings = serde_yaml::from_str("probe_hosts: []").unwrap();
        assert!(settings.probe_hosts.is_empty());
        assert!(!Settings::default().probe_hosts.is_empty());
    }

    #[test]
    fn default_repo_id() {
        assert_eq!(Settings::default().release_repo_id, Some(DEFAULT_REPO_ID));
    }

    #[test]
    fn current_patcher_matches_platform() {
        let paths = PatcherPaths::default();
        let current = paths.current();
        if cfg!(target_os = "windows") {
            assert!(current.ends_with("godotpcktool.exe"));
        } else {
            assert!(current.starts_with("tools"));
        }
    }
}
