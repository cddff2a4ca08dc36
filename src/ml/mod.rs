//! Performance prediction models.
//!
//! Provides a small regression-forest implementation and the per-athlete
//! duration predictor built on it.

pub mod decision_tree;
pub mod forest;
pub mod performance_forecast;
pub mod types;

// Re-exports for convenience
pub use decision_tree::{DecisionTree, TreeConfig, TreeNode};
pub use forest::{ForestConfig, RandomForest};
pub use performance_forecast::{AthleteModel, PerformancePredictor, Prediction, PredictionQuery};
pub use types::{MlError, MlResult, ModelKind, TrainingSample};
