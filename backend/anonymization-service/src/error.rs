use thiserror::Error;

/// Per-event anonymization failure
///
/// Caller-data defect: the event cannot succeed without fixing the source, so
/// it is routed to the dead-letter sink instead of being retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnonymizeError {
    #[error("Event is missing user_id for anonymization")]
    MissingIdentifier,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read raw events from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Raw event file {path} is not a JSON array: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
