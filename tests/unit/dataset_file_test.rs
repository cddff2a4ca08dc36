//! Unit tests for reading datasets from JSON files.

use std::path::Path;

use tempfile::TempDir;
use trainload::dataset::{simulated_watch_download, DatasetError, SessionDataset};

#[test]
fn test_json_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sessions.json");
    let dataset = simulated_watch_download();

    std::fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();
    let loaded = SessionDataset::load(&path).unwrap();

    assert_eq!(loaded, dataset);
}

#[test]
fn test_missing_file() {
    let result = SessionDataset::load(Path::new("/nonexistent/sessions.json"));
    assert!(matches!(result, Err(DatasetError::Io(_))));
}

#[test]
fn test_missing_field_is_a_parse_error() {
    let json = r#"[{"athlete": "Dani", "date": "2025-08-01"}]"#;
    assert!(matches!(
        SessionDataset::from_json(json),
        Err(DatasetError::Parse(_))
    ));
}

#[test]
fn test_empty_array_is_empty_dataset() {
    let dataset = SessionDataset::from_json("[]").unwrap();
    assert!(dataset.is_empty());
}
