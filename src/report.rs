//! Rendering of analysis output for the presentation layer.
//!
//! CSV export of the augmented session table, a plain-text table for terminals
//! and formatting of predicted durations.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::ml::Prediction;
use crate::pipeline::{AnalysisReport, AnalyzedSession};

/// Errors during report export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSV_HEADER: &str = "athlete,date,duration_min,distance_km,hr_mean,hr_max,rpe,hrv,sleep_h,actual_duration_min,load,fatigue,rolling_load_7d,rolling_load_30d,fatigue_alert";

/// Export the augmented table to CSV. An empty table yields only the header.
pub fn export_csv(sessions: &[AnalyzedSession]) -> Result<String, ExportError> {
    let mut output = Vec::new();

    writeln!(output, "{}", CSV_HEADER).map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for row in sessions {
        let s = &row.session;
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{},{},{:.2},{:.4},{:.2},{:.2},{}",
            csv_field(&s.athlete),
            s.date.format("%Y-%m-%d"),
            s.duration_min,
            s.distance_km,
            s.hr_mean,
            s.hr_max,
            s.rpe,
            s.hrv,
            s.sleep_h,
            s.actual_duration_min,
            row.load,
            row.fatigue,
            row.rolling_load_7d,
            row.rolling_load_30d,
            row.fatigue_alert,
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export the augmented table to a CSV file.
pub fn export_csv_to_file(sessions: &[AnalyzedSession], path: &Path) -> Result<(), ExportError> {
    let content = export_csv(sessions)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Quote a field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format a prediction for display, e.g. `Estimated time Dani: 61.23 min`.
pub fn format_prediction(prediction: &Prediction, decimals: usize) -> String {
    format!(
        "Estimated time {}: {:.*} min",
        prediction.athlete, decimals, prediction.duration_min
    )
}

/// Plain-text table of the analyzed sessions, each athlete's latest alert with
/// its recommendation, and rejected rows.
pub fn render_table(report: &AnalysisReport) -> String {
    if report.is_empty() {
        return "No sessions to analyze.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<10} {:>9} {:>9} {:>8} {:>10} {:>10}\n",
        "Athlete", "Date", "Load", "Fatigue", "Alert", "Load 7d", "Load 30d"
    ));

    for row in &report.sessions {
        out.push_str(&format!(
            "{:<12} {:<10} {:>9.1} {:>9.2} {:>8} {:>10.1} {:>10.1}\n",
            row.session.athlete,
            row.session.date.format("%Y-%m-%d"),
            row.load,
            row.fatigue,
            row.fatigue_alert.label(),
            row.rolling_load_7d,
            row.rolling_load_30d,
        ));
    }

    for summary in &report.athletes {
        out.push_str(&format!(
            "{}: {} on {}. {}\n",
            summary.athlete,
            summary.latest_alert.label(),
            summary.last_date.format("%Y-%m-%d"),
            summary.latest_alert.recommendation()
        ));
    }

    for rejected in &report.rejected {
        out.push_str(&format!(
            "Skipped {} on {}: {}\n",
            rejected.session.athlete,
            rejected.session.date.format("%Y-%m-%d"),
            rejected.reason
        ));
    }

    out
}
