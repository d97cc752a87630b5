// ============================================
// Suggestion Batch Job
// ============================================
//
// Reads the warehouse query result, finds the most common first step for each
// goal and writes the snapshot that pathfinder-service loads on startup.
// Designed to run as a CronJob; the service must be restarted to pick up a
// new snapshot.

use crate::aggregate::aggregate_values;
use crate::config::Config;
use crate::error::{JobError, Result};
use event_schema::write_snapshot;
use serde_json::Value;
use std::io;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobReport {
    pub records_read: usize,
    pub records_skipped: usize,
    pub goals_written: usize,
}

/// Run one aggregation pass. A missing input file aborts the job before any
/// snapshot is written.
pub fn run(config: &Config) -> Result<JobReport> {
    let started = Instant::now();
    let input = &config.aggregation_input_path;
    info!(input = %input.display(), "Reading warehouse records");

    let contents = std::fs::read_to_string(input).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            JobError::InputNotFound(input.clone())
        } else {
            JobError::ReadInput {
                path: input.clone(),
                source,
            }
        }
    })?;

    let records: Vec<Value> =
        serde_json::from_str(&contents).map_err(|source| JobError::ParseInput {
            path: input.clone(),
            source,
        })?;
    let records_read = records.len();

    let outcome = aggregate_values(records);

    let output = &config.suggestion_cache_path;
    info!(output = %output.display(), goals = outcome.suggestions.len(), "Writing suggestions");
    write_snapshot(output, &outcome.suggestions)?;

    let report = JobReport {
        records_read,
        records_skipped: outcome.skipped.total(),
        goals_written: outcome.suggestions.len(),
    };
    info!(
        records_read = report.records_read,
        records_skipped = report.records_skipped,
        goals_written = report.goals_written,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Suggestion generation complete"
    );
    Ok(report)
}
