//! Extraction and patching with live feedback.
//!
//! These run on the UI thread: extraction progress arrives from the
//! worker as events, patcher output arrives line by line from the
//! patcher's reader threads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::bundle::{spawn_extraction, ArchiveSource, ExtractEvent};
use crate::error::Result;
use crate::patch::{OutputLine, PatchJob, PatchOutcome};
use crate::ui::{format_duration, UserInterface};

/// How long the UI waits for an extraction event before redrawing.
const EVENT_POLL: Duration = Duration::from_millis(50);

/// Extract `source` into `dest` on a worker thread, feeding a progress bar.
pub fn extract_with_progress(
    ui: &mut dyn UserInterface,
    source: ArchiveSource,
    dest: &Path,
) -> Result<PathBuf> {
    info!("Extracting {} to {}", source.describe(), dest.display());
    let mut progress = ui.start_progress("Extracting translation files");
    let mut handle = spawn_extraction(source, dest);
    let mut total = 0;

    loop {
        match handle.next_timeout(EVENT_POLL) {
            Some(ExtractEvent::Total(n)) => {
                total = n;
                progress.set_length(n as u64);
            }
            Some(ExtractEvent::Extracted { count, name }) => {
                debug!("Extracted {}", name);
                progress.set_position(count as u64, &name);
            }
            Some(ExtractEvent::Finished(Ok(dir))) => {
                info!("Extracted {} entries", total);
                progress.finish_success(&format!("Extracted {} entries", total));
                return Ok(dir);
            }
            Some(ExtractEvent::Finished(Err(e))) => {
                error!("Extraction failed: {}", e);
                progress.finish_error("Extraction failed");
                return Err(e.into());
            }
            None => {}
        }
    }
}

/// Run the patch job, showing the patcher's output and logging every line.
pub fn patch_with_log(ui: &mut dyn UserInterface, job: &PatchJob) -> Result<PatchOutcome> {
    let mut spinner = ui.start_spinner("Applying the translation");
    info!("Patcher: {}", job.command.display());

    let result = job.run(|line| {
        match &line {
            OutputLine::Stdout(text) => info!("patcher: {}", text),
            OutputLine::Stderr(text) => info!("patcher (stderr): {}", text),
        }
        spinner.push_output(&line);
    });

    match result {
        Ok(outcome) => {
            spinner.finish_success(&format!(
                "Translation applied ({})",
                format_duration(outcome.run.duration)
            ));
            Ok(outcome)
        }
        Err(e) => {
            error!("Patching failed: {}", e);
            spinner.finish_error("Patching failed");
            Err(e.into())
        }
    }
}
