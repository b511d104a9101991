//! Error types for installer operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each pipeline stage has its own error enum ([`BundleError`],
//!   [`PatchError`], [`GameError`]) that converts into `SetupError`
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

pub use crate::bundle::BundleError;
pub use crate::game::GameError;
pub use crate::patch::PatchError;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the setup configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Extracting the translation archive failed.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Running the patcher or swapping the package failed.
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Locating or validating the game package failed.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The user backed out of the wizard.
    #[error("Installation cancelled by user")]
    Cancelled,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Game(_) => 2,
            Self::Cancelled => 3,
            _ => 1,
        }
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = SetupError::ConfigParseError {
            path: PathBuf::from("/setup.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/setup.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = SetupError::ConfigValidationError {
            message: "missing patcher".into(),
        };
        assert!(err.to_string().contains("missing patcher"));
    }

    #[test]
    fn bundle_error_is_transparent() {
        let err: SetupError = BundleError::UnsafeEntry {
            name: "../evil".into(),
        }
        .into();
        assert!(err.to_string().contains("../evil"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn game_error_maps_to_not_found_exit_code() {
        let err: SetupError = GameError::NotFound.into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn cancelled_has_distinct_exit_code() {
        assert_eq!(SetupError::Cancelled.exit_code(), 3);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(SetupError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
