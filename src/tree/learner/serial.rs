//! Depth-first regression tree learner.
//!
//! Grows a CART regression tree on squared error: each node is split on the
//! best (feature, threshold) pair found by [`SplitFinder`] until it reaches
//! the maximum depth, becomes pure, or no split reduces the error. Leaves
//! predict the mean target of their samples.

use crate::core::error::{GbtError, Result};
use crate::core::traits::{LearnerParams, WeakLearner};
use crate::core::types::{Feature, ImportanceType, NodeIndex, Score};
use crate::tree::node::TreeNode;
use crate::tree::split::{SplitFinder, SplitFinderConfig};
use crate::tree::tree::Tree;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Regression tree used as the weak learner of the boosting engine.
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    params: LearnerParams,
    tree: Option<Tree>,
}

impl DecisionTreeRegressor {
    /// Creates an unfitted regressor with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self::from_params(&LearnerParams {
            max_depth,
            ..LearnerParams::default()
        })
    }

    /// Returns the learner parameters.
    pub fn params(&self) -> &LearnerParams {
        &self.params
    }

    /// Returns the fitted tree, if any.
    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Returns true once `fit` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// Number of leaves of the fitted tree (0 before fitting).
    pub fn num_leaves(&self) -> usize {
        self.tree.as_ref().map_or(0, Tree::num_leaves)
    }

    /// Depth of the fitted tree (0 before fitting).
    pub fn depth(&self) -> usize {
        self.tree.as_ref().map_or(0, Tree::depth)
    }

    fn grow(
        &self,
        finder: &SplitFinder,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Score>,
        indices: &[usize],
        depth: usize,
        tree: &mut Tree,
    ) -> NodeIndex {
        let output = indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64;
        let leaf = TreeNode::new_leaf(output, indices.len(), depth);

        if depth >= self.params.max_depth || is_pure(targets, indices) {
            return tree.push_node(leaf);
        }

        let split = match finder.find_best_split(features, targets, indices) {
            Some(split) if split.is_valid() => split,
            _ => return tree.push_node(leaf),
        };

        let column = features.column(split.feature);
        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| column[i] <= split.threshold);

        // placeholder, replaced once both children are in place
        let node_index = tree.push_node(leaf);
        let left_child = self.grow(finder, features, targets, &left, depth + 1, tree);
        let right_child = self.grow(finder, features, targets, &right, depth + 1, tree);

        tree.replace_node(
            node_index,
            TreeNode::new_internal(
                left_child,
                right_child,
                split.feature,
                split.threshold,
                split.gain,
                indices.len(),
                depth,
            ),
        );
        node_index
    }
}

fn is_pure(targets: &ArrayView1<'_, Score>, indices: &[usize]) -> bool {
    let first = targets[indices[0]];
    indices.iter().all(|&i| targets[i] == first)
}

impl WeakLearner for DecisionTreeRegressor {
    fn from_params(params: &LearnerParams) -> Self {
        DecisionTreeRegressor {
            params: *params,
            tree: None,
        }
    }

    fn fit(
        &mut self,
        features: &ArrayView2<'_, Feature>,
        targets: &ArrayView1<'_, Score>,
    ) -> Result<()> {
        if features.nrows() != targets.len() {
            return Err(GbtError::dimension_mismatch(
                format!("{} targets", features.nrows()),
                format!("{} targets", targets.len()),
            ));
        }
        if features.nrows() == 0 || features.ncols() == 0 {
            return Err(GbtError::dataset(format!(
                "cannot fit a tree on a {}x{} feature matrix",
                features.nrows(),
                features.ncols()
            )));
        }

        let finder = SplitFinder::new(SplitFinderConfig {
            min_data_in_leaf: self.params.min_data_in_leaf,
            ..SplitFinderConfig::default()
        });
        let indices: Vec<usize> = (0..features.nrows()).collect();
        let mut tree = Tree::new(features.ncols());
        self.grow(&finder, features, targets, &indices, 0, &mut tree);

        log::trace!(
            "fitted tree with {} leaves and depth {}",
            tree.num_leaves(),
            tree.depth()
        );
        self.tree = Some(tree);
        Ok(())
    }

    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Score>> {
        self.tree
            .as_ref()
            .ok_or_else(|| GbtError::not_fitted("DecisionTreeRegressor::predict"))?
            .predict_batch(features)
    }

    fn feature_importance(&self, importance_type: ImportanceType, num_features: usize) -> Array1<f64> {
        match &self.tree {
            Some(tree) if tree.num_features() == num_features => {
                tree.feature_importance(importance_type)
            }
            _ => Array1::zeros(num_features),
        }
    }
}
