//! A complete patch run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::command::{ensure_executable, run_patcher, OutputLine, PatcherCommand, PatcherRun};
use super::swap::swap_into_place;
use super::PatchError;

/// Where the patcher writes its output: `<pck>.patched` next to the package.
pub fn patched_path_for(pck: &Path) -> PathBuf {
    let mut name = pck.file_name().unwrap_or_default().to_os_string();
    name.push(".patched");
    pck.with_file_name(name)
}

/// Everything needed to patch one package.
#[derive(Debug, Clone)]
pub struct PatchJob {
    pub pck_path: PathBuf,
    /// Directory holding the extracted translation files
    pub assets_dir: PathBuf,
    pub command: PatcherCommand,
    pub backup: bool,
}

/// Result of a successful patch run.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub backup: Option<PathBuf>,
    pub run: PatcherRun,
}

impl PatchJob {
    /// Run the patcher and swap its output into place.
    ///
    /// On any failure before the swap, the package is left as it was and
    /// the patcher's output file is removed.
    pub fn run<F>(&self, on_line: F) -> Result<PatchOutcome, PatchError>
    where
        F: FnMut(OutputLine),
    {
        if !self.pck_path.is_file() {
            return Err(PatchError::PackageMissing {
                path: self.pck_path.clone(),
            });
        }
        ensure_executable(&self.command.program)?;

        let output = patched_path_for(&self.pck_path);
        discard(&output);

        let resolved = self
            .command
            .resolve(&self.pck_path, &self.assets_dir, &output)?;
        info!("Patching {}", self.pck_path.display());

        let run = match run_patcher(&resolved, on_line) {
            Ok(run) => run,
            Err(e) => {
                discard(&output);
                return Err(e);
            }
        };

        if !run.success {
            discard(&output);
            return Err(PatchError::PatcherFailed {
                command: resolved.display(),
                code: run.exit_code,
            });
        }
        if !output.is_file() {
            return Err(PatchError::NoOutput { path: output });
        }

        match swap_into_place(&self.pck_path, &output, self.backup) {
            Ok(swap) => {
                info!("Patched {} in {:?}", self.pck_path.display(), run.duration);
                Ok(PatchOutcome {
                    backup: swap.backup,
                    run,
                })
            }
            Err(e) => {
                discard(&output);
                Err(e)
            }
        }
    }
}

fn discard(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}
