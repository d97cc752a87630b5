pub mod aggregate;
pub mod config;
pub mod error;
pub mod jobs;

pub use aggregate::{aggregate, aggregate_values, AggregationOutcome, SkipReason, SkippedRecords};
pub use config::Config;
pub use error::JobError;
pub use jobs::JobReport;
