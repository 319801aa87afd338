//! Error types for the importer

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::grouping::GroupCoord;

/// Main error type for an import session
#[derive(Debug, Error)]
pub enum Error {
    #[error("geometry exporter not found (searched: {searched:?})")]
    ExporterNotFound { searched: Vec<PathBuf> },

    #[error("geometry exporter exited with {status}")]
    ExporterFailed { status: ExitStatus },

    #[error("world at {path} is unreadable: {reason}")]
    WorldUnreadable { path: PathBuf, reason: String },

    /// Per-chunk problem; logged and skipped, never returned from a session.
    #[error("chunk {x}x{z} has unsupported block data: {reason}")]
    UnsupportedChunkFormat { x: i32, z: i32, reason: String },

    #[error("failed to import group {group}: {source}")]
    GroupImportFailure {
        group: GroupCoord,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error raised while importing a single group.
    pub fn group(group: GroupCoord, source: Error) -> Self {
        Error::GroupImportFailure {
            group,
            source: Box::new(source),
        }
    }
}
