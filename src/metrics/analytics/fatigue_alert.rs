//! Fatigue semaphore (Green/Yellow/Red).
//!
//! Each athlete is judged against their own fatigue distribution:
//! - Green: fatigue < mean
//! - Yellow: mean <= fatigue < mean + std
//! - Red: fatigue >= mean + std
//!
//! `std` is the sample standard deviation. Athletes with fewer than two
//! sessions have no spread to compare against and are always Green.

use serde::{Deserialize, Serialize};

use super::error::{AnalyticsError, AnalyticsResult};

/// Three-level fatigue risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FatigueAlert {
    /// Below the athlete's mean fatigue.
    Green,
    /// Between the mean and one standard deviation above it.
    Yellow,
    /// At or beyond one standard deviation above the mean.
    Red,
}

impl FatigueAlert {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            FatigueAlert::Green => "Green",
            FatigueAlert::Yellow => "Yellow",
            FatigueAlert::Red => "Red",
        }
    }

    /// Get color for UI display (RGB).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            FatigueAlert::Green => (50, 205, 50),  // Lime green
            FatigueAlert::Yellow => (255, 215, 0), // Gold
            FatigueAlert::Red => (220, 20, 60),    // Crimson
        }
    }

    /// Get recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self {
            FatigueAlert::Green => "Fatigue is below your usual level. Training can proceed as planned.",
            FatigueAlert::Yellow => {
                "Fatigue is above your average. Watch sleep and recovery before hard sessions."
            }
            FatigueAlert::Red => {
                "Fatigue is well above your norm. Prioritize recovery and reduce intensity."
            }
        }
    }
}

impl std::fmt::Display for FatigueAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An athlete's fatigue distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueBaseline {
    /// Mean fatigue.
    pub mean: f64,
    /// Sample standard deviation (0 with a single session).
    pub std_dev: f64,
    /// Number of sessions the baseline was built from.
    pub samples: usize,
}

impl FatigueBaseline {
    /// Build a baseline from an athlete's fatigue values.
    pub fn from_values(values: &[f64]) -> AnalyticsResult<Self> {
        if values.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "At least one session is required for a fatigue baseline".into(),
            ));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std_dev = if values.len() < 2 {
            0.0
        } else {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        };

        Ok(Self {
            mean,
            std_dev,
            samples: values.len(),
        })
    }

    /// Fatigue at which a session turns Red.
    pub fn red_threshold(&self) -> f64 {
        self.mean + self.std_dev
    }

    /// Whether there are enough sessions for a meaningful comparison.
    pub fn has_sufficient_history(&self) -> bool {
        self.samples >= 2
    }

    /// Classify one fatigue value against this baseline.
    pub fn classify(&self, fatigue: f64) -> FatigueAlert {
        if !self.has_sufficient_history() || fatigue < self.mean {
            FatigueAlert::Green
        } else if fatigue < self.red_threshold() {
            FatigueAlert::Yellow
        } else {
            FatigueAlert::Red
        }
    }
}

/// Classifies an athlete's sessions into fatigue alerts.
#[derive(Debug, Clone, Default)]
pub struct FatigueClassifier;

impl FatigueClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify every fatigue value of one athlete, in input order.
    ///
    /// Returns the baseline alongside the alerts; an empty history yields no
    /// baseline and no alerts.
    pub fn classify_history(&self, fatigue: &[f64]) -> (Option<FatigueBaseline>, Vec<FatigueAlert>) {
        match FatigueBaseline::from_values(fatigue) {
            Ok(baseline) => {
                let alerts = fatigue.iter().map(|&f| baseline.classify(f)).collect();
                (Some(baseline), alerts)
            }
            Err(_) => (None, Vec::new()),
        }
    }
}
