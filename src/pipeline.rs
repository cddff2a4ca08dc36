//! Full analytics run over one dataset.
//!
//! Dataset -> load/fatigue -> rolling load -> fatigue alerts, and separately
//! dataset -> per-athlete predictor. Every call starts from the raw sessions;
//! nothing is carried over between runs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::dataset::{Session, SessionDataset};
use crate::metrics::analytics::{
    FatigueAlert, FatigueBaseline, FatigueClassifier, TrainingLoadCalculator,
};
use crate::metrics::calculator::MetricsCalculator;
use crate::ml::{PerformancePredictor, TrainingSample};

/// A session with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSession {
    /// Raw input fields
    #[serde(flatten)]
    pub session: Session,
    /// Session load
    pub load: f64,
    /// Load normalized by HRV and sleep
    pub fatigue: f64,
    /// Load over the trailing 7 days
    pub rolling_load_7d: f64,
    /// Load over the trailing 30 days
    pub rolling_load_30d: f64,
    /// Fatigue semaphore relative to the athlete's own history
    pub fatigue_alert: FatigueAlert,
}

/// A session left out of load/fatigue analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedSession {
    /// The offending row
    pub session: Session,
    /// Why it was rejected
    pub reason: String,
}

/// Per-athlete overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteSummary {
    /// Athlete identifier
    pub athlete: String,
    /// Number of analyzed sessions
    pub sessions: usize,
    /// Mean session load
    pub mean_load: f64,
    /// Fatigue distribution used for the semaphore
    pub baseline: FatigueBaseline,
    /// Date of the most recent session
    pub last_date: NaiveDate,
    /// Alert of the most recent session
    pub latest_alert: FatigueAlert,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Augmented table ordered by athlete, then date
    pub sessions: Vec<AnalyzedSession>,
    /// Rows that could not be analyzed
    pub rejected: Vec<RejectedSession>,
    /// One entry per athlete with analyzed sessions
    pub athletes: Vec<AthleteSummary>,
    /// Per-athlete duration models
    #[serde(skip)]
    pub predictor: PerformancePredictor,
}

impl AnalysisReport {
    /// Analyzed sessions of one athlete, by date.
    pub fn sessions_for<'a>(&'a self, athlete: &'a str) -> impl Iterator<Item = &'a AnalyzedSession> {
        self.sessions
            .iter()
            .filter(move |s| s.session.athlete == athlete)
    }

    /// Summary for one athlete.
    pub fn summary(&self, athlete: &str) -> Option<&AthleteSummary> {
        self.athletes.iter().find(|a| a.athlete == athlete)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.rejected.is_empty()
    }
}

/// Runs the analytics pipeline.
pub struct LoadMonitor {
    calculator: MetricsCalculator,
    training_load: TrainingLoadCalculator,
    classifier: FatigueClassifier,
    config: AppConfig,
}

impl LoadMonitor {
    /// Create a monitor with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            calculator: MetricsCalculator::new(),
            training_load: TrainingLoadCalculator::new(),
            classifier: FatigueClassifier::new(),
            config,
        }
    }

    /// Run every stage over `dataset`.
    pub fn analyze(&self, dataset: &SessionDataset) -> AnalysisReport {
        let mut sessions = Vec::with_capacity(dataset.len());
        let mut rejected = Vec::new();
        let mut athletes = Vec::new();
        let mut predictor = PerformancePredictor::new(self.config.predictor.clone());

        for (athlete, history) in dataset.by_athlete() {
            self.train_predictor(&mut predictor, athlete, &history);

            let mut valid: Vec<(&Session, f64, f64)> = Vec::with_capacity(history.len());
            for session in history {
                match self.calculator.calculate(session) {
                    Ok(metrics) => valid.push((session, metrics.load, metrics.fatigue)),
                    Err(e) => {
                        tracing::warn!(
                            "Rejecting {} session on {}: {}",
                            athlete,
                            session.date,
                            e
                        );
                        rejected.push(RejectedSession {
                            session: session.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            if valid.is_empty() {
                continue;
            }

            let dated: Vec<(NaiveDate, f64)> = valid.iter().map(|(s, load, _)| (s.date, *load)).collect();
            let rolling = self.training_load.calculate_history(&dated);

            let fatigue: Vec<f64> = valid.iter().map(|(_, _, f)| *f).collect();
            let (baseline, alerts) = self.classifier.classify_history(&fatigue);
            let Some(baseline) = baseline else {
                continue;
            };

            let start = sessions.len();
            for (((session, load, fatigue), rolling), alert) in
                valid.iter().zip(rolling).zip(alerts)
            {
                sessions.push(AnalyzedSession {
                    session: (*session).clone(),
                    load: *load,
                    fatigue: *fatigue,
                    rolling_load_7d: rolling.rolling_7d,
                    rolling_load_30d: rolling.rolling_30d,
                    fatigue_alert: alert,
                });
            }

            let analyzed = &sessions[start..];
            if let Some(last) = analyzed.last() {
                athletes.push(AthleteSummary {
                    athlete: athlete.to_string(),
                    sessions: analyzed.len(),
                    mean_load: analyzed.iter().map(|s| s.load).sum::<f64>() / analyzed.len() as f64,
                    baseline,
                    last_date: last.session.date,
                    latest_alert: last.fatigue_alert,
                });
            }
        }

        tracing::info!(
            "Analyzed {} sessions for {} athletes ({} rejected)",
            sessions.len(),
            athletes.len(),
            rejected.len()
        );

        AnalysisReport {
            sessions,
            rejected,
            athletes,
            predictor,
        }
    }

    /// Fit the athlete's duration model on raw history.
    ///
    /// Load does not depend on HRV or sleep, so rows rejected for fatigue still
    /// train the predictor.
    fn train_predictor(&self, predictor: &mut PerformancePredictor, athlete: &str, history: &[&Session]) {
        let samples: Vec<TrainingSample> = history
            .iter()
            .map(|s| TrainingSample {
                distance_km: s.distance_km,
                load: self.calculator.load(s),
                actual_duration_min: s.actual_duration_min,
            })
            .collect();

        if let Err(e) = predictor.fit_athlete(athlete, &samples) {
            tracing::warn!("No performance model for {}: {}", athlete, e);
        }
    }
}

impl Default for LoadMonitor {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Run the pipeline with default configuration.
pub fn analyze(dataset: &SessionDataset) -> AnalysisReport {
    LoadMonitor::default().analyze(dataset)
}
