//! Translation archive extraction.
//!
//! The bundled translation assets ship as a zip archive. This module
//! provides:
//! - [`extract_archive`] - blocking extraction with per-entry progress
//! - [`spawn_extraction`] - the same work on a dedicated worker thread,
//!   reported back as a stream of [`ExtractEvent`]s
//!
//! Extraction always writes into a `<dest>.partial` staging directory and
//! only renames it to `dest` once every entry is on disk.

pub mod extract;
pub mod worker;

pub use extract::{extract_archive, staging_dir_for};
pub use worker::{spawn_extraction, ExtractionHandle};

use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting the translation archive.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The archive file could not be opened.
    #[error("Cannot open archive {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The archive is not a readable zip file.
    #[error("Corrupt archive: {0}")]
    Corrupt(#[from] zip::result::ZipError),

    /// An entry would escape the destination directory.
    #[error("Archive entry '{name}' has an unsafe path")]
    UnsafeEntry { name: String },

    /// Writing an entry to disk failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The destination already holds something other than an empty directory.
    #[error("Destination {path} already exists and is not empty")]
    DestinationInUse { path: PathBuf },

    /// The destination does not name a directory (`.`, `..`, `/`).
    #[error("Destination {path} must name a new directory")]
    InvalidDestination { path: PathBuf },

    /// The worker thread ended without reporting a result.
    #[error("Extraction worker stopped unexpectedly")]
    WorkerLost,
}

/// Where the archive bytes come from.
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// A zip file on disk.
    Path(PathBuf),
    /// A zip archive already held in memory.
    Bytes(Vec<u8>),
}

impl ArchiveSource {
    /// Human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("<in-memory archive, {} bytes>", bytes.len()),
        }
    }

    pub(crate) fn open(self) -> Result<Box<dyn ReadSeek + Send>, BundleError> {
        match self {
            Self::Path(path) => {
                let file =
                    std::fs::File::open(&path).map_err(|source| BundleError::Open { path, source })?;
                Ok(Box::new(std::io::BufReader::new(file)))
            }
            Self::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes))),
        }
    }
}

/// Reader the zip crate can consume.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Progress reported by an extraction.
#[derive(Debug)]
pub enum ExtractEvent {
    /// Total number of entries, sent once before any entry is written.
    Total(usize),
    /// One more entry is on disk.
    Extracted { count: usize, name: String },
    /// Terminal event carrying the final directory or the failure.
    Finished(Result<PathBuf, BundleError>),
}
