//! Exact greedy split finding on squared error.
//!
//! For every feature the samples in a node are sorted by value and every
//! boundary between two distinct values is scored by how much it reduces the
//! node's summed squared error.

use crate::core::constants::SPLIT_GAIN_TOLERANCE;
use crate::core::types::{Feature, FeatureIndex, Score};
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Information about a candidate split point.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    /// Feature index for the split
    pub feature: FeatureIndex,
    /// Samples with `value <= threshold` go left
    pub threshold: f64,
    /// Reduction in summed squared error
    pub gain: f64,
    /// Number of samples sent left
    pub left_count: usize,
    /// Number of samples sent right
    pub right_count: usize,
}

impl SplitInfo {
    /// Returns true if this split is valid and beneficial.
    pub fn is_valid(&self) -> bool {
        self.gain > 0.0 && self.left_count > 0 && self.right_count > 0
    }

    /// Returns true if `self` should replace `best`.
    ///
    /// Strictly greater gain wins; on equal gain the lower feature index is
    /// kept so results do not depend on evaluation order.
    fn beats(&self, best: &SplitInfo) -> bool {
        self.gain > best.gain || (self.gain == best.gain && self.feature < best.feature)
    }
}

/// Split finder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitFinderConfig {
    /// Minimum number of samples on each side of a split
    pub min_data_in_leaf: usize,
    /// Search features in parallel when the node has at least this many
    /// samples times features
    pub parallel_threshold: usize,
}

impl Default for SplitFinderConfig {
    fn default() -> Self {
        SplitFinderConfig {
            min_data_in_leaf: 1,
            parallel_threshold: 4096,
        }
    }
}

/// Finds the best split of a node over all features.
#[derive(Debug, Clone)]
pub struct SplitFinder {
    config: SplitFinderConfig,
}

impl SplitFinder {
    /// Creates a new split finder.
    pub fn new(config: SplitFinderConfig) -> Self {
        SplitFinder { config }
    }

    /// Returns the finder configuration.
    pub fn config(&self) -> &SplitFinderConfig {
        &self.config
    }

    /// Best split of the samples in `indices` over every feature, or `None`
    /// when no split reduces the error.
    pub fn find_best_split(
        &self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Score>,
        indices: &[usize],
    ) -> Option<SplitInfo> {
        let num_features = features.ncols();
        let candidates: Vec<Option<SplitInfo>> =
            if num_features > 1 && indices.len() * num_features >= self.config.parallel_threshold {
                (0..num_features)
                    .into_par_iter()
                    .map(|feature| self.find_best_split_for_feature(feature, features, targets, indices))
                    .collect()
            } else {
                (0..num_features)
                    .map(|feature| self.find_best_split_for_feature(feature, features, targets, indices))
                    .collect()
            };

        candidates
            .into_iter()
            .flatten()
            .fold(None, |best: Option<SplitInfo>, candidate| match best {
                Some(best) if !candidate.beats(&best) => Some(best),
                _ => Some(candidate),
            })
    }

    /// Best split of the samples in `indices` on a single feature.
    pub fn find_best_split_for_feature(
        &self,
        feature: FeatureIndex,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Score>,
        indices: &[usize],
    ) -> Option<SplitInfo> {
        let count = indices.len();
        let min_leaf = self.config.min_data_in_leaf.max(1);
        if count < 2 * min_leaf {
            return None;
        }

        let column = features.column(feature);
        let mut pairs: Vec<(Feature, Score)> = indices
            .iter()
            .map(|&i| (column[i], targets[i]))
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total_sum: f64 = pairs.iter().map(|&(_, t)| t).sum();
        let total_sum_squares: f64 = pairs.iter().map(|&(_, t)| t * t).sum();
        let parent_score = total_sum * total_sum / count as f64;
        // gain floor scales with the targets
        let min_gain = SPLIT_GAIN_TOLERANCE * total_sum_squares;

        let mut best: Option<SplitInfo> = None;
        let mut left_sum = 0.0;

        for i in 0..count - 1 {
            left_sum += pairs[i].1;
            let left_count = i + 1;
            let right_count = count - left_count;

            let (value, next_value) = (pairs[i].0, pairs[i + 1].0);
            if value == next_value || value.is_nan() || next_value.is_nan() {
                continue;
            }
            if left_count < min_leaf || right_count < min_leaf {
                continue;
            }

            let right_sum = total_sum - left_sum;
            // SSE(parent) - SSE(left) - SSE(right); the sum-of-squares terms cancel
            let gain = left_sum * left_sum / left_count as f64
                + right_sum * right_sum / right_count as f64
                - parent_score;

            if gain > best.as_ref().map_or(min_gain, |b| b.gain) {
                let mut threshold = value + (next_value - value) / 2.0;
                if threshold >= next_value {
                    threshold = value;
                }
                best = Some(SplitInfo {
                    feature,
                    threshold,
                    gain,
                    left_count,
                    right_count,
                });
            }
        }

        best
    }
}
