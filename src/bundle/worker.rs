//! Off-thread extraction.
//!
//! The worker owns the archive and the destination path until it reports
//! [`ExtractEvent::Finished`]; the caller only ever sees events.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use super::{extract_archive, ArchiveSource, BundleError, ExtractEvent};

/// Handle to a running extraction.
pub struct ExtractionHandle {
    events: Receiver<ExtractEvent>,
    worker: Option<JoinHandle<()>>,
    finished: bool,
}

/// Start extracting `source` into `dest` on a worker thread.
pub fn spawn_extraction(source: ArchiveSource, dest: &Path) -> ExtractionHandle {
    let (tx, rx) = mpsc::channel();
    let dest = dest.to_path_buf();

    let worker = thread::spawn(move || {
        debug!("Extraction worker started");
        let progress_tx = tx.clone();
        let result = extract_archive(source, &dest, |event| {
            let _ = progress_tx.send(event);
        });
        let _ = tx.send(ExtractEvent::Finished(result));
    });

    ExtractionHandle {
        events: rx,
        worker: Some(worker),
        finished: false,
    }
}

impl ExtractionHandle {
    /// Next event if one is ready, without blocking.
    ///
    /// Returns `None` when nothing is pending. If the worker disappeared
    /// without a terminal event, a synthetic `Finished(Err(WorkerLost))`
    /// is produced once.
    pub fn try_next(&mut self) -> Option<ExtractEvent> {
        if self.finished {
            return None;
        }
        match self.events.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.lost()),
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<ExtractEvent> {
        if self.finished {
            return None;
        }
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(self.observe(event)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.lost()),
        }
    }

    /// Whether the terminal event has been delivered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Block until the extraction ends, forwarding progress to `on_event`.
    pub fn wait<F>(mut self, mut on_event: F) -> Result<PathBuf, BundleError>
    where
        F: FnMut(&ExtractEvent),
    {
        loop {
            let event = match self.events.recv() {
                Ok(event) => self.observe(event),
                Err(_) => self.lost(),
            };
            if let ExtractEvent::Finished(result) = event {
                return result;
            }
            on_event(&event);
        }
    }

    fn observe(&mut self, event: ExtractEvent) -> ExtractEvent {
        if matches!(event, ExtractEvent::Finished(_)) {
            self.finish();
        }
        event
    }

    fn lost(&mut self) -> ExtractEvent {
        self.finish();
        ExtractEvent::Finished(Err(BundleError::WorkerLost))
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
