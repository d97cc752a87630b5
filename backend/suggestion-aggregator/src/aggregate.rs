//! Most-common-first-step aggregation.
//!
//! Records are grouped by goal; within a goal the step with the highest
//! occurrence count wins. Ties go to the step that appeared first in the
//! input, so callers wanting another order must sort before aggregating.
//! Malformed records are counted and skipped, never fatal.

use event_schema::{AggregationRecord, SuggestionEntry, SuggestionMap};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Why a record was excluded from grouping. A record is counted once, under
/// the first problem found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingGoal,
    MissingFirstStep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRecords {
    pub not_an_object: usize,
    pub missing_goal: usize,
    pub missing_first_step: usize,
}

impl SkippedRecords {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotAnObject => self.not_an_object += 1,
            SkipReason::MissingGoal => self.missing_goal += 1,
            SkipReason::MissingFirstStep => self.missing_first_step += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_an_object + self.missing_goal + self.missing_first_step
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationOutcome {
    pub suggestions: SuggestionMap,
    pub skipped: SkippedRecords,
}

#[derive(Default)]
struct GoalTally {
    // (step, count) in order of first appearance
    steps: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl GoalTally {
    fn observe(&mut self, step: String) {
        match self.index.get(&step) {
            Some(&i) => self.steps[i].1 += 1,
            None => {
                self.index.insert(step.clone(), self.steps.len());
                self.steps.push((step, 1));
            }
        }
    }

    fn winner(self) -> Option<(String, u64)> {
        let mut best: Option<(String, u64)> = None;
        for (step, count) in self.steps {
            if best.as_ref().map_or(true, |(_, top)| count > *top) {
                best = Some((step, count));
            }
        }
        best
    }
}

/// Aggregate `(goal, first_step)` records into a suggestion map
pub fn aggregate<I>(records: I) -> AggregationOutcome
where
    I: IntoIterator<Item = AggregationRecord>,
{
    aggregate_results(records.into_iter().map(Ok))
}

/// Aggregate untyped warehouse rows, classifying malformed ones first
pub fn aggregate_values<I>(values: I) -> AggregationOutcome
where
    I: IntoIterator<Item = Value>,
{
    aggregate_results(values.into_iter().map(classify))
}

fn classify(value: Value) -> Result<AggregationRecord, SkipReason> {
    let Value::Object(mut fields) = value else {
        return Err(SkipReason::NotAnObject);
    };

    let mut take_string = |key: &str| match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    Ok(AggregationRecord {
        goal: take_string("goal"),
        first_step: take_string("first_step"),
    })
}

fn aggregate_results<I>(records: I) -> AggregationOutcome
where
    I: IntoIterator<Item = Result<AggregationRecord, SkipReason>>,
{
    let mut groups: HashMap<String, GoalTally> = HashMap::new();
    let mut skipped = SkippedRecords::default();

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(reason) => {
                skipped.record(reason);
                continue;
            }
        };
        let Some(goal) = record.goal else {
            skipped.record(SkipReason::MissingGoal);
            continue;
        };
        let Some(step) = record.first_step else {
            skipped.record(SkipReason::MissingFirstStep);
            continue;
        };
        groups.entry(goal).or_default().observe(step);
    }

    let mut suggestions = SuggestionMap::new();
    for (goal, tally) in groups {
        if let Some((step, count)) = tally.winner() {
            debug!(goal = %goal, step = %step, count, "Most common first step");
            suggestions.insert(goal, SuggestionEntry::new(step, count));
        }
    }

    if skipped.total() > 0 {
        warn!(
            skipped = skipped.total(),
            not_an_object = skipped.not_an_object,
            missing_goal = skipped.missing_goal,
            missing_first_step = skipped.missing_first_step,
            "Skipped malformed aggregation records"
        );
    }

    AggregationOutcome {
        suggestions,
        skipped,
    }
}
