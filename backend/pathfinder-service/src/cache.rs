//! Load-once suggestion cache.
//!
//! The snapshot is read lazily on the first lookup or health probe and kept
//! for the lifetime of the process. `OnceCell` guards the unloaded -> loaded
//! transition: concurrent first callers block until the single load finishes,
//! later callers read the map without synchronization. A failed load is not
//! retried; the cache stays empty until the process restarts.

use crate::error::LookupError;
use event_schema::{read_snapshot, SnapshotError, SuggestionEntry, SuggestionMap};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the persisted suggestion map comes from
pub trait SnapshotSource: Send + Sync {
    /// Human readable location, used in logs
    fn describe(&self) -> String;

    fn load(&self) -> Result<SuggestionMap, SnapshotError>;
}

/// Snapshot stored as a JSON file written by the aggregation job
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SuggestionMap, SnapshotError> {
        read_snapshot(&self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Unloaded,
    Loaded,
    /// Snapshot was empty, missing or corrupt
    LoadedEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheHealth {
    pub cache_loaded: bool,
    pub cached_items: usize,
}

pub struct SuggestionCache {
    source: Option<Box<dyn SnapshotSource>>,
    entries: OnceCell<SuggestionMap>,
}

impl SuggestionCache {
    pub fn new(source: impl SnapshotSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            entries: OnceCell::new(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSnapshotSource::new(path))
    }

    /// Cache that is already loaded with `entries`; no source is ever read
    pub fn preloaded(entries: SuggestionMap) -> Self {
        Self {
            source: None,
            entries: OnceCell::with_value(entries),
        }
    }

    /// Current state. Does not trigger the load.
    pub fn state(&self) -> CacheState {
        match self.entries.get() {
            None => CacheState::Unloaded,
            Some(entries) if entries.is_empty() => CacheState::LoadedEmpty,
            Some(_) => CacheState::Loaded,
        }
    }

    /// Run the load if it has not happened yet, then report the state
    pub fn ensure_loaded(&self) -> CacheState {
        self.entries();
        self.state()
    }

    pub fn health(&self) -> CacheHealth {
        let entries = self.entries();
        CacheHealth {
            cache_loaded: !entries.is_empty(),
            cached_items: entries.len(),
        }
    }

    /// Look up the suggestion for `goal` (exact, case-sensitive match)
    ///
    /// # Errors
    /// - `LookupError::ServiceUnavailable` if the cache holds no entries at all
    /// - `LookupError::NotFound` if it has entries but none for `goal`
    pub fn lookup(&self, goal: &str) -> Result<&SuggestionEntry, LookupError> {
        let entries = self.entries();
        if entries.is_empty() {
            return Err(LookupError::ServiceUnavailable);
        }

        entries
            .get(goal)
            .ok_or_else(|| LookupError::NotFound(goal.to_string()))
    }

    fn entries(&self) -> &SuggestionMap {
        self.entries.get_or_init(|| self.load())
    }

    fn load(&self) -> SuggestionMap {
        let Some(source) = self.source.as_ref() else {
            return SuggestionMap::new();
        };

        info!(source = %source.describe(), "Loading suggestion cache");
        match source.load() {
            Ok(entries) => {
                if entries.is_empty() {
                    warn!(source = %source.describe(), "Suggestion snapshot is empty");
                } else {
                    info!(cached_items = entries.len(), "Suggestion cache loaded");
                }
                entries
            }
            Err(e) => {
                warn!(
                    source = %source.describe(),
                    error = %e,
                    "Suggestion snapshot not found or invalid, using empty cache"
                );
                SuggestionMap::new()
            }
        }
    }
}
