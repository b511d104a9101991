//! Tracing setup.
//!
//! Every run writes a fresh `setup.log`: next to the executable when that
//! directory is writable, otherwise under the platform's local data
//! directory. Console logging stays off unless `--debug` or `RUST_LOG`
//! asks for it; the UI reports everything a user needs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::executable_dir;

/// Log file name.
pub const LOG_FILE_NAME: &str = "setup.log";

/// Candidate log locations, in order of preference.
pub fn log_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![executable_dir().join(LOG_FILE_NAME)];
    if let Some(data) = dirs::data_local_dir() {
        candidates.push(data.join("ut-setup").join(LOG_FILE_NAME));
    }
    candidates
}

/// Create (or truncate) the log file at `path`.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    File::create(path)
}

/// Open the first usable location, returning the file and where it lives.
fn open_first(candidates: &[PathBuf]) -> Option<(File, PathBuf)> {
    candidates
        .iter()
        .find_map(|path| open_log_file(path).ok().map(|file| (file, path.clone())))
}

fn console_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("ut_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    }
}

fn file_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("ut_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ut_setup=info"))
    }
}

/// Install the global subscriber.
///
/// Log level is controlled by:
/// 1. `--debug` sets both outputs to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO in the file and nothing on the console
///
/// Returns the log file path, or `None` when no location was writable.
pub fn init(debug: bool, log_file: Option<&Path>) -> Option<PathBuf> {
    let candidates = match log_file {
        Some(path) => vec![path.to_path_buf()],
        None => log_candidates(),
    };
    let opened = open_first(&candidates);

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter(debug));

    let (file_layer, path) = match opened {
        Some((file, path)) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_filter(file_filter(debug));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        match &path {
            Some(path) => tracing::info!(
                "ut-setup {} logging to {}",
                env!("CARGO_PKG_VERSION"),
                path.display()
            ),
            None => tracing::warn!("No writable location for {}", LOG_FILE_NAME),
        }
    }
    path
}
