//! Patcher invocation.
//!
//! The patcher is run directly (no shell) with its stdout and stderr piped.
//! Two reader threads forward lines over a channel; the calling thread
//! polls that channel and the child's exit status every [`POLL_INTERVAL`]
//! and hands each line to the caller's callback.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::{resolve_string, InterpolationContext};

use super::PatchError;

/// How often the child and its output are polled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long output may stay silent after the patcher exits before the
/// readers are abandoned.
pub const OUTPUT_GRACE: Duration = Duration::from_millis(500);

/// Output line from the patcher.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(s) | Self::Stderr(s) => s,
        }
    }
}

/// Patcher executable plus an argument template.
///
/// Arguments may reference `${source}`, `${assets}` and `${output}`.
#[derive(Debug, Clone)]
pub struct PatcherCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl PatcherCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Substitute the job's paths into the argument template.
    pub fn resolve(
        &self,
        source: &Path,
        assets: &Path,
        output: &Path,
    ) -> Result<PatcherCommand, PatchError> {
        let ctx = InterpolationContext::new()
            .with_var("source", source.display().to_string())
            .with_var("assets", assets.display().to_string())
            .with_var("output", output.display().to_string())
            .with_env(std::env::vars().collect());

        let args = self
            .args
            .iter()
            .map(|arg| resolve_string(arg, &ctx).map_err(|e| PatchError::Template(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PatcherCommand {
            program: self.program.clone(),
            args,
        })
    }

    /// Command line for logs and error messages.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Result of a patcher run.
#[derive(Debug, Clone)]
pub struct PatcherRun {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    /// Whether the process exited with code 0.
    pub success: bool,
    /// Combined stdout and stderr, in arrival order.
    pub output: String,
    pub duration: Duration,
}

/// Make sure the patcher can be executed.
///
/// Bundled binaries lose their executable bit when unpacked by some
/// archive tools, so on Unix it is added back when missing.
pub fn ensure_executable(path: &Path) -> Result<(), PatchError> {
    if !path.is_file() {
        return Err(PatchError::PatcherMissing {
            path: path.to_path_buf(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let perm_err = |source| PatchError::Permission {
            path: path.to_path_buf(),
            source,
        };
        let mut perms = std::fs::metadata(path).map_err(perm_err)?.permissions();
        if perms.mode() & 0o111 != 0o111 {
            debug!("Setting executable permission on {}", path.display());
            perms.set_mode(perms.mode() | 0o755);
            std::fs::set_permissions(path, perms).map_err(perm_err)?;
        }
    }

    Ok(())
}

/// Run the patcher, feeding every output line to `on_line` as it arrives.
pub fn run_patcher<F>(command: &PatcherCommand, mut on_line: F) -> Result<PatcherRun, PatchError>
where
    F: FnMut(OutputLine),
{
    let start = Instant::now();
    let command_line = command.display();
    debug!("Running patcher: {}", command_line);

    let spawn_err = |source| PatchError::Spawn {
        command: command_line.clone(),
        source,
    };

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_err)?;

    let (tx, rx) = mpsc::channel();
    let mut readers = Vec::new();

    if let Some(stdout) = child.stdout.take() {
        let tx = tx.clone();
        readers.push(thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(std::result::Result::ok) {
                let _ = tx.send(OutputLine::Stdout(line));
            }
        }));
    }
    if let Some(stderr) = child.stderr.take() {
        let tx = tx.clone();
        readers.push(thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(std::result::Result::ok) {
                let _ = tx.send(OutputLine::Stderr(line));
            }
        }));
    }
    drop(tx);

    let mut output = String::new();
    let mut forward = |line: OutputLine, output: &mut String| {
        output.push_str(line.text());
        output.push('\n');
        on_line(line);
    };

    let status = loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => forward(line, &mut output),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
        }
        if let Some(status) = child.try_wait().map_err(spawn_err)? {
            break status;
        }
        if readers_done(&readers) {
            // Output is done; block on exit instead of spinning.
            break child.wait().map_err(spawn_err)?;
        }
    };

    // A background process started by the patcher can hold the pipes open
    // long after it exits, so stop once the output goes quiet.
    loop {
        match rx.recv_timeout(OUTPUT_GRACE) {
            Ok(line) => forward(line, &mut output),
            Err(RecvTimeoutError::Disconnected) => {
                for reader in readers {
                    let _ = reader.join();
                }
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("Patcher output still open after exit; not waiting for it");
                break;
            }
        }
    }

    let duration = start.elapsed();
    debug!(
        "Patcher exited with {:?} after {:?}",
        status.code(),
        duration
    );

    Ok(PatcherRun {
        exit_code: status.code(),
        success: status.success(),
        output,
        duration,
    })
}

fn readers_done(readers: &[thread::JoinHandle<()>]) -> bool {
    readers.iter().all(|r| r.is_finished())
}
