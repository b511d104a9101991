//! Installer configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Variable interpolation in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use ut_setup::config::{load_settings, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("setup.yml"), "backup: false").unwrap();
//!
//! let loaded = load_settings(None, temp.path()).unwrap();
//! validate(&loaded.settings).unwrap();
//! assert!(!loaded.settings.backup);
//! ```

pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use schema::{PatcherPaths, Settings, DEFAULT_API_BASE_URL, DEFAULT_REPO_ID};

pub use loader::{
    executable_dir, load_config_file, load_settings, parse_config, LoadedConfig, CONFIG_FILE_NAME,
};

pub use validator::{validate, validate_config, ValidationError};

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, InterpolationContext, Segment,
};
