//! TrainLoad - Training Load Monitoring
//!
//! Derives per-session load and fatigue from workout records, accumulates
//! rolling 7/30-day load per athlete, classifies fatigue with a per-athlete
//! Green/Yellow/Red semaphore and predicts session duration from distance and
//! load with a per-athlete random forest.

pub mod config;
pub mod dataset;
pub mod metrics;
pub mod ml;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use config::AppConfig;
pub use dataset::{Session, SessionDataset};
pub use metrics::analytics::FatigueAlert;
pub use metrics::calculator::MetricsCalculator;
pub use ml::PerformancePredictor;
pub use pipeline::{analyze, AnalysisReport, AnalyzedSession, LoadMonitor};
