//! Patching the game package with the external packer tool.
//!
//! - [`command`] - patcher invocation with polled, line-streamed output
//! - [`swap`] - moving the patched package into place, backups, restore
//! - [`job`] - the full run: invoke, verify, swap

pub mod command;
pub mod job;
pub mod swap;

pub use command::{ensure_executable, run_patcher, OutputLine, PatcherCommand, PatcherRun};
pub use job::{patched_path_for, PatchJob, PatchOutcome};
pub use swap::{backup_path_for, find_backups, restore_backup, swap_into_place, SwapOutcome};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while patching the package.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The package to patch does not exist.
    #[error("Game package not found: {path}")]
    PackageMissing { path: PathBuf },

    /// The patcher executable is not where the configuration says.
    #[error("Patcher not found: {path}")]
    PatcherMissing { path: PathBuf },

    /// Could not mark the patcher as executable.
    #[error("Cannot make {path} executable: {source}")]
    Permission {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An argument template referenced an unknown variable.
    #[error("Invalid patcher arguments: {0}")]
    Template(String),

    /// The patcher process could not be started or waited on.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The patcher exited unsuccessfully.
    #[error("Patcher failed with exit code {code:?}: {command}")]
    PatcherFailed { command: String, code: Option<i32> },

    /// The patcher reported success but wrote nothing.
    #[error("Patcher did not produce {path}")]
    NoOutput { path: PathBuf },

    /// Moving a package file failed.
    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// There is no backup to restore.
    #[error("No backup found for {path}")]
    NoBackup { path: PathBuf },
}
