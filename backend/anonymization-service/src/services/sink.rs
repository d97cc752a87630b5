use crate::error::SinkError;
use chrono::{DateTime, Utc};
use event_schema::AnonymizedEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Downstream destination for anonymized events (warehouse stream, queue, ...)
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &AnonymizedEvent) -> Result<(), SinkError>;
}

/// Destination for events that cannot be anonymized
pub trait DeadLetterSink: Send + Sync {
    fn dead_letter(&self, record: &DeadLetterRecord) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadLetterReason {
    /// Message could not be decoded as a raw event
    Malformed,
    /// Event has no usable `user_context.user_id`
    MissingIdentifier,
    /// Anonymized event could not be handed to the downstream sink
    SinkFailure,
}

/// Dead-letter envelope. Holds the original message so it can be fixed and replayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetterRecord {
    pub event_id: Option<String>,
    pub reason: DeadLetterReason,
    pub error: String,
    pub failed_at: DateTime<Utc>,
    pub message: Value,
}

impl DeadLetterRecord {
    pub fn new(
        event_id: Option<String>,
        reason: DeadLetterReason,
        error: impl ToString,
        message: Value,
    ) -> Self {
        Self {
            event_id,
            reason,
            error: error.to_string(),
            failed_at: Utc::now(),
            message,
        }
    }
}

/// Appends one JSON document per line to a file
///
/// Each record is encoded into a single buffer and handed to the writer with
/// one `write_all`. Nothing is held back between calls, so a failed append
/// never resurfaces on a later one.
pub struct JsonLinesSink<W = File> {
    path: PathBuf,
    writer: Mutex<W>,
}

impl JsonLinesSink<File> {
    /// Open (or create) the file in append mode, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self::with_writer(path, file))
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn with_writer(path: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append<T: Serialize>(&self, value: &T) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn publish(&self, event: &AnonymizedEvent) -> Result<(), SinkError> {
        self.append(event)
    }
}

impl<W: Write + Send> DeadLetterSink for JsonLinesSink<W> {
    fn dead_letter(&self, record: &DeadLetterRecord) -> Result<(), SinkError> {
        self.append(record)
    }
}
