//! Yield-loss predictor
//!
//! A small random-forest regressor fitted once at startup over the embedded
//! sample table: CART regression trees with an MSE split criterion, each
//! trained on a bootstrap resample drawn with a per-tree seed, predictions
//! averaged across trees.
//!
//! The fitted model is immutable. It holds no interior mutability, so a
//! shared reference can serve any number of concurrent `predict` calls.

use crate::data::{TrainingSample, N_FEATURES};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use thiserror::Error;

/// Fatal configuration errors from model fitting.
///
/// The embedded dataset is fixed, so under normal operation fitting cannot
/// fail; any of these aborts startup rather than being recovered at
/// request time.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("cannot fit yield-loss model with zero samples")]
    EmptyDataset,
    #[error("training sample {index} contains a non-finite value")]
    NonFiniteSample { index: usize },
}

/// Forest hyperparameters.
#[derive(Debug, Clone, Copy)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_estimators: usize,
    /// Base seed; tree i draws its bootstrap sample with seed `base + i`
    pub random_state: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 50,
            random_state: 42,
        }
    }
}

/// A node in a regression tree.
#[derive(Debug, Clone)]
enum TreeNode {
    /// Split on `feature <= threshold`: left, else right
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    /// Mean target value of the training samples that reached this leaf
    Leaf { value: f64 },
}

impl TreeNode {
    fn predict(&self, features: &[f64; N_FEATURES]) -> f64 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Random-forest yield-loss model.
///
/// Fit once over the embedded dataset, then shared read-only for the
/// lifetime of the process (dependency-injected into request handlers
/// rather than held as a global).
#[derive(Debug, Clone)]
pub struct YieldLossModel {
    trees: Vec<TreeNode>,
    /// Per-tree out-of-bag sample indices (samples absent from the
    /// bootstrap resample), kept for `oob_error`
    oob_indices: Vec<Vec<usize>>,
    features: Vec<[f64; N_FEATURES]>,
    targets: Vec<f64>,
}

impl YieldLossModel {
    /// Fit a forest over `samples`.
    ///
    /// Deterministic for a given `config`: tree i resamples with seed
    /// `random_state + i`, derived before the parallel scatter, so the
    /// result does not depend on thread scheduling.
    pub fn fit(samples: &[TrainingSample], config: ForestConfig) -> Result<Self, TrainError> {
        if samples.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        for (index, sample) in samples.iter().enumerate() {
            let finite =
                sample.features().iter().all(|v| v.is_finite()) && sample.yield_loss.is_finite();
            if !finite {
                return Err(TrainError::NonFiniteSample { index });
            }
        }

        let features: Vec<[f64; N_FEATURES]> = samples.iter().map(|s| s.features()).collect();
        let targets: Vec<f64> = samples.iter().map(|s| s.yield_loss).collect();
        let n_samples = samples.len();

        let (trees, oob_indices): (Vec<TreeNode>, Vec<Vec<usize>>) = (0..config.n_estimators)
            .into_par_iter()
            .map(|i| {
                let bootstrap = bootstrap_sample(n_samples, config.random_state + i as u64);

                let in_bag: FxHashSet<usize> = bootstrap.iter().copied().collect();
                let oob: Vec<usize> = (0..n_samples).filter(|idx| !in_bag.contains(idx)).collect();

                let tree_x: Vec<[f64; N_FEATURES]> =
                    bootstrap.iter().map(|&idx| features[idx]).collect();
                let tree_y: Vec<f64> = bootstrap.iter().map(|&idx| targets[idx]).collect();

                (build_tree(&tree_x, &tree_y), oob)
            })
            .unzip();

        Ok(Self {
            trees,
            oob_indices,
            features,
            targets,
        })
    }

    /// Predicted yield loss for one feature vector: mean over all trees.
    ///
    /// Unbounded output; out-of-range inputs can in principle extrapolate
    /// below zero, and callers must not assume non-negativity.
    pub fn predict(&self, features: &[f64; N_FEATURES]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Number of trees in the fitted forest.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Out-of-bag mean absolute error, in yield-loss units.
    ///
    /// Each training sample is predicted using only the trees whose
    /// bootstrap resample excluded it. `None` if no sample was ever
    /// out-of-bag (possible in principle with very few trees).
    pub fn oob_error(&self) -> Option<f64> {
        let n_samples = self.targets.len();
        let mut sums = vec![0.0; n_samples];
        let mut counts = vec![0usize; n_samples];

        for (tree, oob) in self.trees.iter().zip(&self.oob_indices) {
            for &idx in oob {
                sums[idx] += tree.predict(&self.features[idx]);
                counts[idx] += 1;
            }
        }

        let mut abs_error = 0.0;
        let mut covered = 0usize;
        for idx in 0..n_samples {
            if counts[idx] > 0 {
                let oob_prediction = sums[idx] / counts[idx] as f64;
                abs_error += (oob_prediction - self.targets[idx]).abs();
                covered += 1;
            }
        }

        (covered > 0).then(|| abs_error / covered as f64)
    }
}

/// Bootstrap resample: n indices drawn uniformly with replacement from a
/// seeded RNG.
fn bootstrap_sample(n_samples: usize, seed: u64) -> Vec<usize> {
    let dist = Uniform::from(0..n_samples);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples).map(|_| dist.sample(&mut rng)).collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn variance(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Weighted mean of child variances, the quantity a split minimizes.
fn split_mse(y_left: &[f64], y_right: &[f64]) -> f64 {
    let n_left = y_left.len() as f64;
    let n_right = y_right.len() as f64;
    let n_total = n_left + n_right;
    if n_total == 0.0 {
        return 0.0;
    }
    (n_left / n_total) * variance(y_left) + (n_right / n_total) * variance(y_right)
}

/// Best split for one feature: midpoints between consecutive sorted unique
/// values, scored by variance reduction.
fn best_split_for_feature(
    x: &[[f64; N_FEATURES]],
    y: &[f64],
    feature: usize,
    current_variance: f64,
) -> Option<(f64, f64)> {
    let mut values: Vec<f64> = x.iter().map(|row| row[feature]).collect();
    values.sort_by(|a, b| a.partial_cmp(b).expect("finite values validated at fit"));
    values.dedup();

    let mut best: Option<(f64, f64)> = None;
    for pair in values.windows(2) {
        let threshold = (pair[0] + pair[1]) / 2.0;

        let mut y_left = Vec::new();
        let mut y_right = Vec::new();
        for (row, &target) in x.iter().zip(y) {
            if row[feature] <= threshold {
                y_left.push(target);
            } else {
                y_right.push(target);
            }
        }
        if y_left.is_empty() || y_right.is_empty() {
            continue;
        }

        let gain = current_variance - split_mse(&y_left, &y_right);
        if gain > 0.0 && best.map_or(true, |(_, g)| gain > g) {
            best = Some((threshold, gain));
        }
    }
    best
}

/// Best (feature, threshold) over all features, or `None` when no split
/// reduces variance.
fn best_split(x: &[[f64; N_FEATURES]], y: &[f64]) -> Option<(usize, f64)> {
    if y.len() < 2 {
        return None;
    }
    let current_variance = variance(y);

    let mut best: Option<(usize, f64, f64)> = None;
    for feature in 0..N_FEATURES {
        if let Some((threshold, gain)) = best_split_for_feature(x, y, feature, current_variance) {
            if best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((feature, threshold, gain));
            }
        }
    }
    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// Grow a regression tree to purity (no depth cap; the dataset is tiny and
/// splitting stops once variance reaches zero).
fn build_tree(x: &[[f64; N_FEATURES]], y: &[f64]) -> TreeNode {
    if variance(y) < 1e-12 {
        return TreeNode::Leaf { value: mean(y) };
    }

    let Some((feature, threshold)) = best_split(x, y) else {
        return TreeNode::Leaf { value: mean(y) };
    };

    let mut left_x = Vec::new();
    let mut left_y = Vec::new();
    let mut right_x = Vec::new();
    let mut right_y = Vec::new();
    for (row, &target) in x.iter().zip(y) {
        if row[feature] <= threshold {
            left_x.push(*row);
            left_y.push(target);
        } else {
            right_x.push(*row);
            right_y.push(target);
        }
    }

    TreeNode::Split {
        feature,
        threshold,
        left: Box::new(build_tree(&left_x, &left_y)),
        right: Box::new(build_tree(&right_x, &right_y)),
    }
}
