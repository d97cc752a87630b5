pub mod consumer;
pub mod sink;

pub use consumer::{
    read_raw_events, BatchSummary, ConsumerStats, EventConsumer, ProcessOutcome, StatsSnapshot,
};
pub use sink::{DeadLetterReason, DeadLetterRecord, DeadLetterSink, EventSink, JsonLinesSink};
