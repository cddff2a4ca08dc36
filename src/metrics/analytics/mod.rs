//! Training load analytics.
//!
//! This module provides:
//! - Rolling 7/30-day training load per athlete
//! - Fatigue semaphore against each athlete's own history

pub mod error;
pub mod fatigue_alert;
pub mod training_load;

// Re-exports for convenience
pub use error::{AnalyticsError, AnalyticsResult};
pub use fatigue_alert::{FatigueAlert, FatigueBaseline, FatigueClassifier};
pub use training_load::{RollingLoad, TrainingLoadCalculator, MONTH_WINDOW_DAYS, WEEK_WINDOW_DAYS};
