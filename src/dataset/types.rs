//! Session record and dataset types.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One raw workout session as delivered by the acquisition layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Athlete identifier
    pub athlete: String,
    /// Calendar date of the session
    pub date: NaiveDate,
    /// Session duration in minutes
    pub duration_min: f64,
    /// Distance covered in kilometers
    pub distance_km: f64,
    /// Mean heart rate in bpm
    pub hr_mean: f64,
    /// Maximum heart rate in bpm
    pub hr_max: f64,
    /// Rate of perceived exertion (1-10)
    pub rpe: u8,
    /// Heart rate variability (ms)
    pub hrv: f64,
    /// Hours slept the night before
    pub sleep_h: f64,
    /// Realized time for the session in minutes (predictor target)
    pub actual_duration_min: f64,
}

impl Session {
    /// Create a session with every numeric field zeroed.
    ///
    /// Mostly useful as a base for struct update syntax in tests and fixtures.
    pub fn new(athlete: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            athlete: athlete.into(),
            date,
            duration_min: 0.0,
            distance_km: 0.0,
            hr_mean: 0.0,
            hr_max: 0.0,
            rpe: 0,
            hrv: 0.0,
            sleep_h: 0.0,
            actual_duration_min: 0.0,
        }
    }
}

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An in-memory table of workout sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionDataset {
    sessions: Vec<Session>,
}

impl SessionDataset {
    /// Create a dataset from a list of sessions (input order is preserved).
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Parse a dataset from a JSON array of sessions.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Add a session to the end of the table.
    pub fn push(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// All sessions in input order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Distinct athlete identifiers, sorted.
    pub fn athletes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sessions.iter().map(|s| s.athlete.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Group sessions by athlete, each group sorted by date ascending.
    ///
    /// Sessions sharing athlete and date keep their input order.
    pub fn by_athlete(&self) -> BTreeMap<&str, Vec<&Session>> {
        let mut groups: BTreeMap<&str, Vec<&Session>> = BTreeMap::new();
        for session in &self.sessions {
            groups.entry(session.athlete.as_str()).or_default().push(session);
        }
        for sessions in groups.values_mut() {
            sessions.sort_by_key(|s| s.date);
        }
        groups
    }
}

impl From<Vec<Session>> for SessionDataset {
    fn from(sessions: Vec<Session>) -> Self {
        Self::new(sessions)
    }
}

impl FromIterator<Session> for SessionDataset {
    fn from_iter<I: IntoIterator<Item = Session>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
