//! Schema registry for the journey pipeline
//!
//! Defines the records that cross service boundaries: raw journey events as
//! produced upstream, their anonymized projection, the `(goal, first_step)`
//! rows the aggregation job consumes, and the suggestion snapshot served by
//! the pathfinder service. Key names are part of the wire contract.

// Raw and anonymized journey events
pub mod journey;
// Aggregation input and suggestion output
pub mod suggestion;
// Snapshot persistence
pub mod snapshot;

// Re-export commonly used types
pub use journey::{AnonymizedEvent, AnonymizedPayload, RawEvent, RawPayload, UserContext};
pub use snapshot::{read_snapshot, write_snapshot, SnapshotError};
pub use suggestion::{AggregationRecord, SuggestionEntry, SuggestionMap};

/// Payload keys allowed to leave the anonymization boundary
pub const PAYLOAD_ALLOW_LIST: [&str; 3] = ["node_id", "node_type", "node_title"];
