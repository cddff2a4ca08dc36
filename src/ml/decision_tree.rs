//! Regression tree used by the random forest.
//!
//! Splits minimize the weighted mean squared error of the targets; candidate
//! thresholds are midpoints between consecutive distinct feature values and
//! leaves predict the mean target of their samples.

use serde::{Deserialize, Serialize};

use super::types::{MlError, MlResult};

/// A node in the regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal node with split condition
    Split {
        /// Feature index to split on
        feature: usize,
        /// Threshold value
        threshold: f64,
        /// Left child (feature <= threshold)
        left: Box<TreeNode>,
        /// Right child (feature > threshold)
        right: Box<TreeNode>,
    },
    /// Leaf node with prediction value
    Leaf {
        /// Mean target of the samples in this leaf
        value: f64,
        /// Number of samples in this leaf
        samples: usize,
    },
}

impl TreeNode {
    /// Predict for a single feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] <= *threshold {
                    left.predict(features)
                } else {
                    right.predict(features)
                }
            }
            TreeNode::Leaf { value, .. } => *value,
        }
    }

    /// Get maximum depth below this node.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
            TreeNode::Leaf { .. } => 0,
        }
    }

    /// Count leaf nodes.
    pub fn leaves(&self) -> usize {
        match self {
            TreeNode::Split { left, right, .. } => left.leaves() + right.leaves(),
            TreeNode::Leaf { .. } => 1,
        }
    }
}

/// Tree growth limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum tree depth; `None` grows until leaves are pure or too small to split
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples required in a leaf
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Option<TreeNode>,
    config: TreeConfig,
    input_dim: usize,
}

impl DecisionTree {
    /// Create an unfitted tree for `input_dim` features.
    pub fn new(input_dim: usize, config: TreeConfig) -> Self {
        Self {
            root: None,
            config,
            input_dim,
        }
    }

    /// Fit the tree to all rows.
    pub fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> MlResult<()> {
        let indices: Vec<usize> = (0..features.len()).collect();
        self.fit_indices(features, targets, &indices)
    }

    /// Fit the tree to the rows named by `indices` (repeats allowed).
    pub fn fit_indices(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
    ) -> MlResult<()> {
        if features.len() != targets.len() {
            return Err(MlError::DimensionMismatch {
                expected: features.len(),
                got: targets.len(),
            });
        }
        if let Some(row) = features.iter().find(|row| row.len() != self.input_dim) {
            return Err(MlError::DimensionMismatch {
                expected: self.input_dim,
                got: row.len(),
            });
        }
        if indices.is_empty() {
            return Err(MlError::InsufficientData {
                message: "Cannot fit a tree without samples".into(),
                guidance: "Provide at least one training row.".into(),
            });
        }

        self.root = Some(self.build(features, targets, indices, 0));
        Ok(())
    }

    /// Predict for a single feature vector.
    pub fn predict(&self, features: &[f64]) -> MlResult<f64> {
        if features.len() != self.input_dim {
            return Err(MlError::DimensionMismatch {
                expected: self.input_dim,
                got: features.len(),
            });
        }
        self.root
            .as_ref()
            .map(|root| root.predict(features))
            .ok_or(MlError::NotFitted)
    }

    /// Root node, if fitted.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    fn build(
        &self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        depth: usize,
    ) -> TreeNode {
        let leaf = || TreeNode::Leaf {
            value: mean(indices.iter().map(|&i| targets[i])),
            samples: indices.len(),
        };

        if self.config.max_depth.is_some_and(|max| depth >= max)
            || indices.len() < self.config.min_samples_split
            || is_pure(targets, indices)
        {
            return leaf();
        }

        let Some((feature, threshold)) = self.best_split(features, targets, indices) else {
            return leaf();
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| features[i][feature] <= threshold);

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(self.build(features, targets, &left, depth + 1)),
            right: Box::new(self.build(features, targets, &right, depth + 1)),
        }
    }

    /// Best (feature, threshold) by MSE reduction, honoring `min_samples_leaf`.
    fn best_split(
        &self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
    ) -> Option<(usize, f64)> {
        let n = indices.len() as f64;
        let current = mse(indices.iter().map(|&i| targets[i]));

        let mut best: Option<(usize, f64)> = None;
        let mut best_gain = 0.0;

        for feature in 0..self.input_dim {
            let mut values: Vec<f64> = indices.iter().map(|&i| features[i][feature]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;

                let (left, right): (Vec<f64>, Vec<f64>) = indices
                    .iter()
                    .map(|&i| (features[i][feature], targets[i]))
                    .fold((Vec::new(), Vec::new()), |(mut l, mut r), (x, y)| {
                        if x <= threshold {
                            l.push(y);
                        } else {
                            r.push(y);
                        }
                        (l, r)
                    });

                if left.len() < self.config.min_samples_leaf
                    || right.len() < self.config.min_samples_leaf
                {
                    continue;
                }

                let weighted = (left.len() as f64 / n) * mse(left.iter().copied())
                    + (right.len() as f64 / n) * mse(right.iter().copied());
                let gain = current - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature, threshold));
                }
            }
        }

        best
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn mse(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let m = mean(values.clone());
    mean(values.map(|v| (v - m).powi(2)))
}

fn is_pure(targets: &[f64], indices: &[usize]) -> bool {
    let first = targets[indices[0]];
    indices.iter().all(|&i| (targets[i] - first).abs() < 1e-10)
}
