//! Unit tests for report export and rendering.

use tempfile::TempDir;
use trainload::dataset::simulated_watch_download;
use trainload::report::{export_csv, export_csv_to_file, format_prediction};
use trainload::{analyze, SessionDataset};

#[test]
fn test_export_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.csv");
    let report = analyze(&simulated_watch_download());

    export_csv_to_file(&report.sessions, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, export_csv(&report.sessions).unwrap());
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_csv_alert_column() {
    let report = analyze(&simulated_watch_download());
    let csv = export_csv(&report.sessions).unwrap();

    let alerts: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.rsplit(',').next())
        .collect();
    assert_eq!(alerts, vec!["Green", "Yellow", "Green", "Green", "Red"]);
}

#[test]
fn test_empty_report_exports_header() {
    let report = analyze(&SessionDataset::default());
    let csv = export_csv(&report.sessions).unwrap();

    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_prediction_formatting_respects_decimals() {
    let report = analyze(&simulated_watch_download());
    let query = report.predictor.default_query("Dani").unwrap();
    let prediction = report.predictor.answer(&query).unwrap();

    let text = format_prediction(&prediction, 2);
    assert!(text.starts_with("Estimated time Dani: "));
    assert!(text.ends_with(" min"));

    let number = text
        .trim_start_matches("Estimated time Dani: ")
        .trim_end_matches(" min");
    assert_eq!(number.split('.').nth(1).map(str::len), Some(2));
}
