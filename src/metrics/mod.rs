//! Metrics module for training load calculations.

pub mod analytics;
pub mod calculator;

pub use calculator::{MetricsCalculator, SessionMetrics};

// Re-export key analytics types for convenience
pub use analytics::{
    FatigueAlert, FatigueBaseline, FatigueClassifier, RollingLoad, TrainingLoadCalculator,
};
