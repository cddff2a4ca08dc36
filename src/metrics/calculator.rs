//! Per-session load and fatigue calculation.
//!
//! - Load: `duration_min * hr_mean * rpe / 100`
//! - Fatigue: `load / hrv * (8 / sleep_h)`

use serde::{Deserialize, Serialize};

use crate::dataset::Session;
use crate::metrics::analytics::{AnalyticsError, AnalyticsResult};

/// Hours of sleep considered fully rested.
pub const REFERENCE_SLEEP_HOURS: f64 = 8.0;

/// Derived metrics for a single session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Session load (duration x mean HR x RPE / 100)
    pub load: f64,
    /// Load normalized by HRV and sleep
    pub fatigue: f64,
}

/// Computes load and fatigue from a session's raw fields.
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    /// Sleep hours at which the sleep factor is 1.0
    reference_sleep_h: f64,
}

impl MetricsCalculator {
    /// Create a calculator with the default 8h sleep reference.
    pub fn new() -> Self {
        Self {
            reference_sleep_h: REFERENCE_SLEEP_HOURS,
        }
    }

    /// Session load. Never fails; non-negative inputs give a non-negative load.
    pub fn load(&self, session: &Session) -> f64 {
        session.duration_min * session.hr_mean * f64::from(session.rpe) / 100.0
    }

    /// Fatigue for an already computed load.
    ///
    /// `hrv` and `sleep_h` must be strictly positive and finite.
    pub fn fatigue(&self, load: f64, hrv: f64, sleep_h: f64) -> AnalyticsResult<f64> {
        if !hrv.is_finite() || hrv <= 0.0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "HRV must be positive, got {}",
                hrv
            )));
        }
        if !sleep_h.is_finite() || sleep_h <= 0.0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "Sleep hours must be positive, got {}",
                sleep_h
            )));
        }

        Ok(load / hrv * (self.reference_sleep_h / sleep_h))
    }

    /// Compute load and fatigue for one session.
    ///
    /// Fails when either value is not a finite number.
    pub fn calculate(&self, session: &Session) -> AnalyticsResult<SessionMetrics> {
        let load = self.load(session);
        if !load.is_finite() {
            return Err(AnalyticsError::InvalidInput(format!(
                "Load is not a finite number (duration {}, mean HR {})",
                session.duration_min, session.hr_mean
            )));
        }

        let fatigue = self.fatigue(load, session.hrv, session.sleep_h)?;
        if !fatigue.is_finite() {
            return Err(AnalyticsError::InvalidInput(format!(
                "Fatigue is not a finite number (load {}, HRV {}, sleep {}h)",
                load, session.hrv, session.sleep_h
            )));
        }

        Ok(SessionMetrics { load, fatigue })
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
