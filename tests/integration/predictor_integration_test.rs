//! Integration tests for per-athlete performance prediction.

use chrono::{Duration, NaiveDate};
use trainload::config::{AppConfig, PredictorSettings};
use trainload::dataset::simulated_watch_download;
use trainload::ml::{MlError, ModelKind, PredictionQuery};
use trainload::{analyze, LoadMonitor, MetricsCalculator, Session, SessionDataset};

/// Two clearly separated kinds of session: short easy runs and long tempo runs.
fn two_kinds_of_session(athlete: &str) -> Vec<Session> {
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    (0..8)
        .map(|i| {
            let long = i % 2 == 1;
            Session {
                athlete: athlete.to_string(),
                date: start + Duration::days(i),
                duration_min: if long { 110.0 } else { 30.0 },
                distance_km: if long { 21.0 } else { 5.0 },
                hr_mean: if long { 160.0 } else { 135.0 },
                hr_max: 185.0,
                rpe: if long { 8 } else { 4 },
                hrv: 55.0,
                sleep_h: 7.5,
                actual_duration_min: if long { 112.0 } else { 31.0 },
            }
        })
        .collect()
}

#[test]
fn test_prediction_at_training_row_is_close_to_actual() {
    let sessions = two_kinds_of_session("Dani");
    let calc = MetricsCalculator::new();
    let report = analyze(&SessionDataset::new(sessions.clone()));

    for session in &sessions[..2] {
        let predicted = report
            .predictor
            .predict("Dani", session.distance_km, calc.load(session))
            .unwrap();
        assert!(
            (predicted - session.actual_duration_min).abs() < 10.0,
            "predicted {} vs actual {}",
            predicted,
            session.actual_duration_min
        );
    }
}

#[test]
fn test_models_are_independent_per_athlete() {
    let mut sessions = two_kinds_of_session("Dani");
    // Same features, everything twice as slow.
    sessions.extend(two_kinds_of_session("Antía").into_iter().map(|s| Session {
        actual_duration_min: s.actual_duration_min * 2.0,
        ..s
    }));
    let report = analyze(&SessionDataset::new(sessions));

    let dani = report.predictor.predict("Dani", 5.0, 546.75).unwrap();
    let antia = report.predictor.predict("Antía", 5.0, 546.75).unwrap();

    assert!(antia > dani * 1.5, "dani {} antia {}", dani, antia);
}

#[test]
fn test_different_seeds_may_differ_but_each_is_reproducible() {
    let dataset = simulated_watch_download();
    let config = AppConfig {
        predictor: PredictorSettings {
            seed: 7,
            n_trees: 25,
            ..PredictorSettings::default()
        },
        ..AppConfig::default()
    };

    let a = LoadMonitor::new(config.clone()).analyze(&dataset);
    let b = LoadMonitor::new(config).analyze(&dataset);

    let query = PredictionQuery {
        athlete: "Dani".into(),
        distance_km: 13.0,
        load: 700.0,
    };
    assert_eq!(a.predictor.answer(&query), b.predictor.answer(&query));
}

#[test]
fn test_dashboard_defaults() {
    let report = analyze(&simulated_watch_download());

    let query = report.predictor.default_query("Antía").unwrap();
    assert_eq!(query.distance_km, 10.0);
    assert!((query.load - (518.0 + 577.5) / 2.0).abs() < 1e-9);

    let prediction = report.predictor.answer(&query).unwrap();
    assert_eq!(prediction.model, ModelKind::Forest);
    assert!((59.0..=60.0).contains(&prediction.duration_min));
}

#[test]
fn test_query_errors_are_reported_not_raised() {
    let report = analyze(&simulated_watch_download());

    assert!(matches!(
        report.predictor.predict("Nobody", 10.0, 500.0),
        Err(MlError::UnknownAthlete(_))
    ));
    assert!(matches!(
        report.predictor.predict("Dani", 0.0, 500.0),
        Err(MlError::InvalidQuery(_))
    ));
}
