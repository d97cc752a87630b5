//! Suggestion snapshot persistence.
//!
//! The aggregation job writes the snapshot wholesale; the pathfinder service
//! reads it once per process. Writes go through a sibling temp file and a
//! rename so a reader never sees a half-written document.

use crate::suggestion::SuggestionMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot at {path} is not a valid suggestion map: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SnapshotError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            SnapshotError::NotFound(path.to_path_buf())
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read a suggestion snapshot from disk
pub fn read_snapshot(path: &Path) -> Result<SuggestionMap, SnapshotError> {
    let contents = fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a suggestion snapshot as pretty-printed JSON, creating parent directories
pub fn write_snapshot(path: &Path, suggestions: &SuggestionMap) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SnapshotError::io(parent, e))?;
    }

    let body = serde_json::to_string_pretty(suggestions).map_err(SnapshotError::Encode)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, body).map_err(|e| SnapshotError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| SnapshotError::io(path, e))?;
    Ok(())
}
