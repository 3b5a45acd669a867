//! Decision tree structure.
//!
//! Nodes are stored in a contiguous vector with the root at index 0 and
//! children always placed after their parent.

use crate::core::error::{GbtError, Result};
use crate::core::types::{Feature, ImportanceType, NodeIndex, Score};
use crate::tree::node::TreeNode;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::fmt;

/// A fitted regression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Vector of tree nodes (index 0 is always the root)
    nodes: Vec<TreeNode>,
    /// Current number of leaf nodes
    num_leaves: usize,
    /// Depth of the deepest leaf
    depth: usize,
    /// Number of input columns the tree was grown on
    num_features: usize,
}

impl Tree {
    /// Creates an empty tree; nodes are added with [`Tree::push_node`].
    pub fn new(num_features: usize) -> Self {
        Tree {
            nodes: Vec::new(),
            num_leaves: 0,
            depth: 0,
            num_features,
        }
    }

    /// Appends a node and returns its index.
    pub fn push_node(&mut self, node: TreeNode) -> NodeIndex {
        if node.is_leaf() {
            self.num_leaves += 1;
            self.depth = self.depth.max(node.depth());
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Replaces the node at `index`, used to fill in a split once both
    /// children exist.
    pub(crate) fn replace_node(&mut self, index: NodeIndex, node: TreeNode) {
        if self.nodes[index].is_leaf() {
            self.num_leaves -= 1;
        }
        if node.is_leaf() {
            self.num_leaves += 1;
            self.depth = self.depth.max(node.depth());
        }
        self.nodes[index] = node;
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the tree depth (maximum depth of any leaf).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of features the tree expects.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Returns a reference to the node at the given index.
    pub fn node(&self, index: NodeIndex) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    /// Returns all nodes in storage order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Predicts the output for a single row.
    ///
    /// A NaN feature value fails every `<=` comparison and follows the right
    /// branch.
    pub fn predict_row(&self, features: &ArrayView1<'_, Feature>) -> Result<Score> {
        if features.len() != self.num_features {
            return Err(GbtError::dimension_mismatch(
                format!("{} feature columns", self.num_features),
                format!("{} feature columns", features.len()),
            ));
        }

        let mut node_index = 0;

        loop {
            let node = self
                .nodes
                .get(node_index)
                .ok_or_else(|| GbtError::not_fitted("Tree::predict_row"))?;

            if let Some(output) = node.leaf_output() {
                return Ok(output);
            }

            let (feature, threshold, left, right) = match (
                node.split_feature(),
                node.split_threshold(),
                node.left_child(),
                node.right_child(),
            ) {
                (Some(f), Some(t), Some(l), Some(r)) => (f, t, l, r),
                _ => {
                    return Err(GbtError::numerical(format!(
                        "internal node {} is missing split information",
                        node_index
                    )))
                }
            };

            node_index = if features[feature] <= threshold {
                left
            } else {
                right
            };
        }
    }

    /// Predicts the output for every row of `features`.
    pub fn predict_batch(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Score>> {
        if features.ncols() != self.num_features {
            return Err(GbtError::dimension_mismatch(
                format!("{} feature columns", self.num_features),
                format!("{} feature columns", features.ncols()),
            ));
        }

        features
            .outer_iter()
            .map(|row| self.predict_row(&row))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from)
    }

    /// Per-feature split counts or summed split gains.
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Array1<f64> {
        let mut importance = Array1::zeros(self.num_features);
        for node in &self.nodes {
            if let Some(feature) = node.split_feature() {
                importance[feature] += match importance_type {
                    ImportanceType::Split => 1.0,
                    ImportanceType::Gain => node.split_gain(),
                };
            }
        }
        importance
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tree(leaves={}, depth={}, nodes={})",
            self.num_leaves,
            self.depth,
            self.nodes.len()
        )?;
        for (index, node) in self.nodes.iter().enumerate() {
            writeln!(f, "{}{}: {}", "  ".repeat(node.depth()), index, node)?;
        }
        Ok(())
    }
}
