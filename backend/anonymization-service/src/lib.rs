pub mod anonymizer;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

pub use anonymizer::Anonymizer;
pub use config::Config;
pub use error::{AnonymizeError, IngestError, SinkError};
pub use services::{EventConsumer, JsonLinesSink, ProcessOutcome};
