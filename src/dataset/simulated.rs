//! Simulated sports-watch download.
//!
//! Stands in for a real device sync: returns a fixed, small dataset with two
//! athletes so the dashboard can be exercised without hardware.

use chrono::NaiveDate;

use super::types::{Session, SessionDataset};

/// Raw rows: (date, athlete, duration, distance, hr_mean, hr_max, rpe, hrv, sleep, actual time)
const SIMULATED_ROWS: [(&str, &str, f64, f64, f64, f64, u8, f64, f64, f64); 5] = [
    ("2025-08-01", "Dani", 60.0, 12.0, 150.0, 180.0, 7, 55.0, 7.0, 60.0),
    ("2025-08-03", "Dani", 45.0, 10.0, 145.0, 175.0, 6, 60.0, 8.0, 58.0),
    ("2025-08-05", "Dani", 70.0, 15.0, 155.0, 185.0, 8, 50.0, 6.0, 65.0),
    ("2025-08-01", "Antía", 50.0, 11.0, 148.0, 178.0, 7, 57.0, 7.0, 59.0),
    ("2025-08-03", "Antía", 55.0, 12.0, 150.0, 180.0, 7, 55.0, 8.0, 60.0),
];

/// Return the dataset a simulated watch sync would download.
pub fn simulated_watch_download() -> SessionDataset {
    SIMULATED_ROWS
        .iter()
        .filter_map(
            |&(date, athlete, duration, distance, hr_mean, hr_max, rpe, hrv, sleep, actual)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
                Some(Session {
                    athlete: athlete.to_string(),
                    date,
                    duration_min: duration,
                    distance_km: distance,
                    hr_mean,
                    hr_max,
                    rpe,
                    hrv,
                    sleep_h: sleep,
                    actual_duration_min: actual,
                })
            },
        )
        .collect()
}
