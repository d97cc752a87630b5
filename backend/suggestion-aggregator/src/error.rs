use event_schema::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobError>;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Input data file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input {path} is not a JSON array of records: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write suggestion snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}
