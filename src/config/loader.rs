//! Configuration file discovery and loading.
//!
//! The installer ships as a directory: the executable, `setup.yml`, the
//! translation archive and the patcher. Relative paths in the config are
//! resolved against the directory the config came from (or the
//! executable's directory when there is no config file).

use crate::config::schema::Settings;
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "setup.yml";

/// Settings together with where they were loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    /// Config file that was read, if any
    pub source: Option<PathBuf>,
    /// Directory relative resource paths are resolved against
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    /// Defaults rooted at `base_dir`.
    pub fn defaults(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: Settings::default(),
            source: None,
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a configured path against the resource directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Absolute path of the bundled translation archive.
    pub fn archive_path(&self) -> PathBuf {
        self.resolve(&self.settings.archive)
    }

    /// Absolute path of the patcher for this platform.
    pub fn patcher_path(&self) -> PathBuf {
        self.resolve(self.settings.patcher.current())
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load settings from `explicit`, or from `setup.yml` in `search_dir`.
///
/// An explicit path must exist; the implicit one is optional.
pub fn load_settings(explicit: Option<&Path>, search_dir: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let settings = load_config_file(path)?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debug!("Loaded config from {}", path.display());
        return Ok(LoadedConfig {
            settings,
            source: Some(path.to_path_buf()),
            base_dir,
        });
    }

    let candidate = search_dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        let settings = load_config_file(&candidate)?;
        debug!("Loaded config from {}", candidate.display());
        Ok(LoadedConfig {
            settings,
            source: Some(candidate),
            base_dir: search_dir.to_path_buf(),
        })
    } else {
        debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, search_dir.display());
        Ok(LoadedConfig::defaults(search_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_implicit_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = load_settings(None, temp.path()).unwrap();

        assert!(loaded.source.is_none());
        assert_eq!(loaded.settings, Settings::default());
        assert_eq!(loaded.base_dir, temp.path());
    }

    #[test]
    fn implicit_config_is_read() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "backup: false\n").unwrap();

        let loaded = load_settings(None, temp.path()).unwrap();
        assert!(!loaded.settings.backup);
        assert_eq!(loaded.source, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn explicit_config_sets_base_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("bundle");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.yml");
        fs::write(&path, "archive: data/files.zip\n").unwrap();

        let loaded = load_settings(Some(&path), temp.path()).unwrap();
        assert_eq!(loaded.base_dir, dir);
        assert_eq!(loaded.archive_path(), dir.join("data/files.zip"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_settings(Some(&temp.path().join("nope.yml")), temp.path()).unwrap_err();
        assert!(matches!(err, SetupError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "backup: [unclosed").unwrap();

        let err = load_settings(None, temp.path()).unwrap_err();
        match err {
            SetupError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let settings = parse_config("\n", Path::new("setup.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let temp = TempDir::new().unwrap();
        let loaded = LoadedConfig::defaults(temp.path());
        let abs = temp.path().join("elsewhere").join("tool");
        assert_eq!(loaded.resolve(&abs), abs);
        assert_eq!(
            loaded.resolve(Path::new("tools/x")),
            temp.path().join("tools/x")
        );
    }

    #[test]
    fn patcher_path_is_under_base_dir() {
        let temp = TempDir::new().unwrap();
        let loaded = LoadedConfig::defaults(temp.path());
        assert!(loaded.patcher_path().starts_with(temp.path()));
    }

    #[test]
    fn executable_dir_exists() {
        assert!(executable_dir().is_dir());
    }
}
