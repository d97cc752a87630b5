use crate::anonymizer::Anonymizer;
use crate::error::{AnonymizeError, IngestError};
use crate::services::sink::{DeadLetterReason, DeadLetterRecord, DeadLetterSink, EventSink};
use event_schema::RawEvent;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of handling a single raw event message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Anonymized,
    DeadLettered(DeadLetterReason),
}

/// Running counters exposed on `/health`
#[derive(Debug, Default)]
pub struct ConsumerStats {
    received: AtomicU64,
    anonymized: AtomicU64,
    dead_lettered: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub events_received: u64,
    pub events_anonymized: u64,
    pub events_dead_lettered: u64,
}

impl ConsumerStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            events_received: self.received.load(Ordering::Relaxed),
            events_anonymized: self.anonymized.load(Ordering::Relaxed),
            events_dead_lettered: self.dead_lettered.load(Ordering::Relaxed),
        }
    }
}

/// Per-batch tally returned by [`EventConsumer::process_batch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub anonymized: usize,
    pub dead_lettered: usize,
}

/// Core of the raw-event listener
///
/// Each message is decoded, anonymized and published. Failures affect only the
/// message at hand: it is written to the dead-letter sink and never retried in
/// place.
pub struct EventConsumer {
    anonymizer: Anonymizer,
    sink: Arc<dyn EventSink>,
    dead_letters: Arc<dyn DeadLetterSink>,
    stats: Arc<ConsumerStats>,
}

impl EventConsumer {
    pub fn new(
        anonymizer: Anonymizer,
        sink: Arc<dyn EventSink>,
        dead_letters: Arc<dyn DeadLetterSink>,
    ) -> Self {
        Self {
            anonymizer,
            sink,
            dead_letters,
            stats: Arc::new(ConsumerStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<ConsumerStats> {
        Arc::clone(&self.stats)
    }

    pub fn process_message(&self, message: Value) -> ProcessOutcome {
        self.stats.received.fetch_add(1, Ordering::Relaxed);

        let event_id = message
            .get("event_id")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let display_id = event_id.as_deref().unwrap_or("N/A");
        info!(event_id = %display_id, "Received raw event");

        let raw: RawEvent = match serde_json::from_value(message.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                error!(event_id = %display_id, error = %e, "Malformed raw event");
                return self.route_to_dead_letter(event_id, DeadLetterReason::Malformed, e, message);
            }
        };

        let anonymized = match self.anonymizer.anonymize(&raw) {
            Ok(event) => event,
            Err(e @ AnonymizeError::MissingIdentifier) => {
                error!(event_id = %display_id, error = %e, "Validation error for raw event");
                return self.route_to_dead_letter(
                    event_id,
                    DeadLetterReason::MissingIdentifier,
                    e,
                    message,
                );
            }
        };
        info!(event_id = %display_id, "Successfully anonymized event");

        if let Err(e) = self.sink.publish(&anonymized) {
            error!(event_id = %display_id, error = %e, "Failed to produce anonymized event");
            return self.route_to_dead_letter(event_id, DeadLetterReason::SinkFailure, e, message);
        }

        self.stats.anonymized.fetch_add(1, Ordering::Relaxed);
        ProcessOutcome::Anonymized
    }

    pub fn process_batch(&self, messages: impl IntoIterator<Item = Value>) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for message in messages {
            summary.processed += 1;
            match self.process_message(message) {
                ProcessOutcome::Anonymized => summary.anonymized += 1,
                ProcessOutcome::DeadLettered(_) => summary.dead_lettered += 1,
            }
        }
        summary
    }

    fn route_to_dead_letter(
        &self,
        event_id: Option<String>,
        reason: DeadLetterReason,
        error: impl ToString,
        message: Value,
    ) -> ProcessOutcome {
        self.stats.dead_lettered.fetch_add(1, Ordering::Relaxed);

        let record = DeadLetterRecord::new(event_id, reason, error, message);
        match self.dead_letters.dead_letter(&record) {
            Ok(()) => warn!(
                event_id = record.event_id.as_deref().unwrap_or("N/A"),
                reason = ?reason,
                "Event routed to dead letter"
            ),
            Err(e) => error!(
                event_id = record.event_id.as_deref().unwrap_or("N/A"),
                reason = ?reason,
                error = %e,
                "Failed to write dead letter record"
            ),
        }

        ProcessOutcome::DeadLettered(reason)
    }
}

/// Load raw event messages from a JSON array file or a JSON Lines file
///
/// In JSON Lines mode a line that is not valid JSON is kept as a string value
/// so the consumer dead-letters it instead of failing the whole file.
pub fn read_raw_events(path: &Path) -> Result<Vec<Value>, IngestError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: display.clone(),
        source,
    })?;

    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(&contents).map_err(|source| IngestError::Parse {
            path: display,
            source,
        });
    }

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|_| Value::String(line.to_string()))
        })
        .collect())
}
