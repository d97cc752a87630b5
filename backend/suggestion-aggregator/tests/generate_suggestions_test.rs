use event_schema::{read_snapshot, SuggestionEntry};
use serde_json::json;
use std::path::Path;
use suggestion_aggregator::{jobs, Config, JobError};

fn config_in(dir: &Path) -> Config {
    Config {
        aggregation_input_path: dir
            .join("aggregation_scripts")
            .join("simulated_warehouse_query_result.json"),
        suggestion_cache_path: dir.join("pathfinder-service").join("suggestion_cache.json"),
    }
}

fn write_input(config: &Config, value: serde_json::Value) {
    let parent = config.aggregation_input_path.parent().unwrap();
    std::fs::create_dir_all(parent).unwrap();
    std::fs::write(&config.aggregation_input_path, value.to_string()).unwrap();
}

#[test]
fn generate_suggestions_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(
        &config,
        json!([
            {"goal": "Test Goal", "first_step": "Step A"},
            {"goal": "Test Goal", "first_step": "Step A"},
            {"goal": "Test Goal", "first_step": "Step B"},
            {"goal": "Another Goal", "first_step": "Step C"},
        ]),
    );

    let report = jobs::run(&config).unwrap();
    assert_eq!(report.records_read, 4);
    assert_eq!(report.records_skipped, 0);
    assert_eq!(report.goals_written, 2);

    let snapshot = read_snapshot(&config.suggestion_cache_path).unwrap();
    assert_eq!(snapshot["Test Goal"], SuggestionEntry::new("Step A", 2));
    assert_eq!(snapshot["Another Goal"], SuggestionEntry::new("Step C", 1));
}

#[test]
fn malformed_rows_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(
        &config,
        json!([
            {"goal": "Test Goal", "first_step": "Step A"},
            {"goal": "Test Goal"},
            {"first_step": "Step Z"},
            42,
        ]),
    );

    let report = jobs::run(&config).unwrap();
    assert_eq!(report.records_read, 4);
    assert_eq!(report.records_skipped, 3);
    assert_eq!(report.goals_written, 1);
}

#[test]
fn empty_input_writes_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(&config, json!([]));

    let report = jobs::run(&config).unwrap();
    assert_eq!(report.goals_written, 0);
    assert!(read_snapshot(&config.suggestion_cache_path)
        .unwrap()
        .is_empty());
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let err = jobs::run(&config).unwrap_err();
    assert!(matches!(err, JobError::InputNotFound(_)));
    assert!(!config.suggestion_cache_path.exists());
}

#[test]
fn non_array_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_input(&config, json!({"goal": "Test Goal", "first_step": "Step A"}));

    assert!(matches!(
        jobs::run(&config).unwrap_err(),
        JobError::ParseInput { .. }
    ));
}
