//! Shared ML types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for ML operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlError {
    /// Insufficient data for training or prediction
    #[error("Insufficient data: {message}. {guidance}")]
    InsufficientData {
        /// What data is missing
        message: String,
        /// How to get more data
        guidance: String,
    },

    /// No model was trained for this athlete
    #[error("No trained model for athlete '{0}'")]
    UnknownAthlete(String),

    /// Query values outside the accepted range
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Feature vectors and targets disagree in shape
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Model used before being fitted
    #[error("Model has not been fitted")]
    NotFitted,
}

/// Result type for ML operations.
pub type MlResult<T> = Result<T, MlError>;

/// Which kind of model answered a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Random forest trained on two or more sessions
    Forest,
    /// Single-session history: the lone actual duration is returned verbatim
    SingleSession,
}

impl ModelKind {
    /// Get display name for this model kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::Forest => "Random forest",
            ModelKind::SingleSession => "Single session",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One training row for the performance predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Distance in kilometers
    pub distance_km: f64,
    /// Session load
    pub load: f64,
    /// Realized duration in minutes
    pub actual_duration_min: f64,
}

impl TrainingSample {
    /// Feature vector in model order: `[distance_km, load]`.
    pub fn features(&self) -> Vec<f64> {
        vec![self.distance_km, self.load]
    }

    /// Whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.distance_km.is_finite() && self.load.is_finite() && self.actual_duration_min.is_finite()
    }
}
