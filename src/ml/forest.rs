//! Bagged regression forest.
//!
//! Each tree is grown on a bootstrap resample of the training rows drawn from
//! a seeded `StdRng`, so fitting the same data with the same seed always
//! yields the same forest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::decision_tree::{DecisionTree, TreeConfig};
use super::types::{MlError, MlResult};

/// Forest configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Seed for bootstrap sampling
    pub seed: u64,
    /// Per-tree growth limits
    pub tree: TreeConfig,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            tree: TreeConfig::default(),
        }
    }
}

/// Random forest regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    config: ForestConfig,
    input_dim: usize,
}

impl RandomForest {
    /// Create an unfitted forest for `input_dim` features.
    pub fn new(input_dim: usize, config: ForestConfig) -> Self {
        Self {
            trees: Vec::new(),
            config,
            input_dim,
        }
    }

    /// Fit the forest. Refitting replaces all trees.
    pub fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()> {
        if features.is_empty() {
            return Err(MlError::InsufficientData {
                message: "Cannot fit a forest without samples".into(),
                guidance: "Provide at least one training row.".into(),
            });
        }
        if features.len() != targets.len() {
            return Err(MlError::DimensionMismatch {
                expected: features.len(),
                got: targets.len(),
            });
        }

        let n = features.len();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut trees = Vec::with_capacity(self.config.n_trees);

        for _ in 0..self.config.n_trees.max(1) {
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let mut tree = DecisionTree::new(self.input_dim, self.config.tree);
            tree.fit_indices(features, targets, &sample)?;
            trees.push(tree);
        }

        self.trees = trees;
        Ok(())
    }

    /// Mean prediction across all trees.
    pub fn predict(&self, features: &[f64]) -> MlResult<f64> {
        if self.trees.is_empty() {
            return Err(MlError::NotFitted);
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    /// Number of fitted trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
