use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `(goal, first_step)` row from the warehouse query
///
/// Both fields are optional on the wire; rows missing either one are counted
/// and skipped by the aggregation job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRecord {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub first_step: Option<String>,
}

impl AggregationRecord {
    pub fn new(goal: impl Into<String>, first_step: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            first_step: Some(first_step.into()),
        }
    }
}

/// Most common first step observed for a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub suggestion_text: String,
    pub count: u64,
}

impl SuggestionEntry {
    pub fn new(suggestion_text: impl Into<String>, count: u64) -> Self {
        Self {
            suggestion_text: suggestion_text.into(),
            count,
        }
    }
}

/// Goal -> suggestion snapshot. Goals are compared by exact string equality.
pub type SuggestionMap = BTreeMap<String, SuggestionEntry>;
