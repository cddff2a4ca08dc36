//! Integration tests for the complete analytics pipeline.
//!
//! Tests the end-to-end flow:
//! 1. Acquire a dataset (simulated watch download or hand-built sessions)
//! 2. Compute load and fatigue
//! 3. Accumulate rolling 7/30-day load
//! 4. Classify fatigue per athlete
//! 5. Train per-athlete predictors and query them

use chrono::{Duration, NaiveDate};
use trainload::dataset::simulated_watch_download;
use trainload::ml::ModelKind;
use trainload::{analyze, AppConfig, FatigueAlert, LoadMonitor, Session, SessionDataset};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

/// Simulates a block of training: one session every `spacing` days.
fn simulate_training_block(athlete: &str, start: NaiveDate, count: i64, spacing: i64) -> Vec<Session> {
    (0..count)
        .map(|i| {
            let duration = 40.0 + (i % 4) as f64 * 15.0;
            Session {
                athlete: athlete.to_string(),
                date: start + Duration::days(i * spacing),
                duration_min: duration,
                distance_km: duration / 5.0,
                hr_mean: 140.0 + (i % 3) as f64 * 5.0,
                hr_max: 180.0,
                rpe: 5 + (i % 4) as u8,
                hrv: 50.0 + (i % 5) as f64,
                sleep_h: 6.5 + (i % 3) as f64 * 0.5,
                actual_duration_min: duration * 0.98,
            }
        })
        .collect()
}

#[test]
fn test_full_analytics_pipeline() {
    let report = analyze(&simulated_watch_download());

    // Step 1-2: loads for Dani match the hand calculation
    let dani: Vec<_> = report.sessions_for("Dani").collect();
    let loads: Vec<f64> = dani.iter().map(|s| s.load).collect();
    assert_eq!(loads.len(), 3);
    assert!((loads[0] - 630.0).abs() < 1e-9);
    assert!((loads[1] - 391.5).abs() < 1e-9);
    assert!((loads[2] - 868.0).abs() < 1e-9);

    // Step 3: all three sessions fall inside the 7-day window on 08-05
    assert!((dani[2].rolling_load_7d - 1889.5).abs() < 1e-9);

    // Step 4: Dani's fatigue ~ [13.09, 6.53, 23.15], mean ~14.25, std ~8.37
    let alerts: Vec<FatigueAlert> = dani.iter().map(|s| s.fatigue_alert).collect();
    assert_eq!(
        alerts,
        vec![FatigueAlert::Green, FatigueAlert::Green, FatigueAlert::Red]
    );

    // Antía's fatigue ~ [10.39, 10.50], tiny spread puts the second in Yellow
    let antia: Vec<FatigueAlert> = report
        .sessions_for("Antía")
        .map(|s| s.fatigue_alert)
        .collect();
    assert_eq!(antia, vec![FatigueAlert::Green, FatigueAlert::Yellow]);

    // Step 5: one forest per athlete
    assert_eq!(report.predictor.model_kind("Dani"), Some(ModelKind::Forest));
    assert_eq!(report.predictor.model_kind("Antía"), Some(ModelKind::Forest));
}

#[test]
fn test_rolling_load_invariants_over_long_history() {
    let mut sessions = simulate_training_block("Dani", date(6, 1), 40, 2);
    sessions.extend(simulate_training_block("Antía", date(6, 15), 25, 3));
    let report = analyze(&SessionDataset::new(sessions));

    assert_eq!(report.sessions.len(), 65);
    for row in &report.sessions {
        assert!(row.load >= 0.0);
        assert!(row.rolling_load_7d >= row.load);
        assert!(row.rolling_load_7d <= row.rolling_load_30d);
    }
}

#[test]
fn test_rolling_window_matches_brute_force() {
    let sessions = simulate_training_block("Dani", date(6, 1), 30, 1);
    let report = analyze(&SessionDataset::new(sessions));

    let rows: Vec<_> = report.sessions_for("Dani").collect();
    for row in &rows {
        let d = row.session.date;
        let week: f64 = rows
            .iter()
            .filter(|r| r.session.date <= d && r.session.date > d - Duration::days(7))
            .map(|r| r.load)
            .sum();
        let month: f64 = rows
            .iter()
            .filter(|r| r.session.date <= d && r.session.date > d - Duration::days(30))
            .map(|r| r.load)
            .sum();
        assert!((row.rolling_load_7d - week).abs() < 1e-6);
        assert!((row.rolling_load_30d - month).abs() < 1e-6);
    }
}

#[test]
fn test_shuffled_input_gives_same_output() {
    let sessions = simulate_training_block("Dani", date(7, 1), 12, 2);
    let mut reversed = sessions.clone();
    reversed.reverse();

    let a = analyze(&SessionDataset::new(sessions));
    let b = analyze(&SessionDataset::new(reversed));

    assert_eq!(a.sessions, b.sessions);
}

#[test]
fn test_pipeline_is_idempotent() {
    let dataset = simulated_watch_download();
    let monitor = LoadMonitor::new(AppConfig::default());

    let first = monitor.analyze(&dataset);
    let second = monitor.analyze(&dataset);

    assert_eq!(first.sessions, second.sessions);
    assert_eq!(first.athletes, second.athletes);
    for athlete in ["Dani", "Antía"] {
        let q = first.predictor.default_query(athlete).unwrap();
        assert_eq!(
            first.predictor.answer(&q).unwrap(),
            second.predictor.answer(&q).unwrap()
        );
    }
}

#[test]
fn test_single_session_athlete() {
    let dataset = SessionDataset::new(vec![Session {
        duration_min: 45.0,
        distance_km: 9.0,
        hr_mean: 150.0,
        hr_max: 176.0,
        rpe: 6,
        hrv: 58.0,
        sleep_h: 7.5,
        actual_duration_min: 47.0,
        ..Session::new("Solo", date(8, 1))
    }]);

    let report = analyze(&dataset);

    assert_eq!(report.sessions.len(), 1);
    assert_eq!(report.sessions[0].fatigue_alert, FatigueAlert::Green);
    assert_eq!(report.summary("Solo").unwrap().baseline.std_dev, 0.0);
    assert_eq!(report.predictor.predict("Solo", 10.0, 500.0).unwrap(), 47.0);
}

#[test]
fn test_same_day_double_session() {
    let morning = Session {
        duration_min: 30.0,
        distance_km: 6.0,
        hr_mean: 140.0,
        hr_max: 170.0,
        rpe: 5,
        hrv: 55.0,
        sleep_h: 8.0,
        actual_duration_min: 31.0,
        ..Session::new("Dani", date(8, 10))
    };
    let evening = Session {
        duration_min: 60.0,
        rpe: 7,
        ..morning.clone()
    };
    let report = analyze(&SessionDataset::new(vec![morning, evening]));

    let total = 30.0 * 140.0 * 5.0 / 100.0 + 60.0 * 140.0 * 7.0 / 100.0;
    for row in &report.sessions {
        assert!((row.rolling_load_7d - total).abs() < 1e-9);
        assert!((row.rolling_load_30d - total).abs() < 1e-9);
    }
}
