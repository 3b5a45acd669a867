//! Tree node implementation.
//!
//! A node is either an internal split (feature, threshold, two children) or a
//! leaf carrying the value predicted for every sample that reaches it.

use crate::core::types::{FeatureIndex, NodeIndex, Score};
use std::fmt;

/// Tree node representation supporting both internal and leaf nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Left child node index (for internal nodes only)
    left_child: Option<NodeIndex>,
    /// Right child node index (for internal nodes only)
    right_child: Option<NodeIndex>,
    /// Split feature index (for internal nodes only)
    split_feature: Option<FeatureIndex>,
    /// Split threshold; samples with `value <= threshold` go left
    split_threshold: Option<f64>,
    /// Prediction value (for leaf nodes only)
    leaf_output: Option<Score>,
    /// Squared-error reduction achieved by the split
    split_gain: f64,
    /// Number of training samples that reached this node
    data_count: usize,
    /// Node depth in the tree (root is 0)
    depth: usize,
}

impl TreeNode {
    /// Creates a new leaf node.
    pub fn new_leaf(output: Score, data_count: usize, depth: usize) -> Self {
        TreeNode {
            left_child: None,
            right_child: None,
            split_feature: None,
            split_threshold: None,
            leaf_output: Some(output),
            split_gain: 0.0,
            data_count,
            depth,
        }
    }

    /// Creates a new internal node with split information.
    pub fn new_internal(
        left_child: NodeIndex,
        right_child: NodeIndex,
        split_feature: FeatureIndex,
        split_threshold: f64,
        split_gain: f64,
        data_count: usize,
        depth: usize,
    ) -> Self {
        TreeNode {
            left_child: Some(left_child),
            right_child: Some(right_child),
            split_feature: Some(split_feature),
            split_threshold: Some(split_threshold),
            leaf_output: None,
            split_gain,
            data_count,
            depth,
        }
    }

    /// Returns true if this node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        self.leaf_output.is_some()
    }

    /// Returns the left child node index (for internal nodes).
    pub fn left_child(&self) -> Option<NodeIndex> {
        self.left_child
    }

    /// Returns the right child node index (for internal nodes).
    pub fn right_child(&self) -> Option<NodeIndex> {
        self.right_child
    }

    /// Returns the split feature index (for internal nodes).
    pub fn split_feature(&self) -> Option<FeatureIndex> {
        self.split_feature
    }

    /// Returns the split threshold value (for internal nodes).
    pub fn split_threshold(&self) -> Option<f64> {
        self.split_threshold
    }

    /// Returns the leaf output value (for leaf nodes).
    pub fn leaf_output(&self) -> Option<Score> {
        self.leaf_output
    }

    /// Returns the split gain.
    pub fn split_gain(&self) -> f64 {
        self.split_gain
    }

    /// Returns the number of training samples in this node.
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Returns the node depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.leaf_output, self.split_feature, self.split_threshold) {
            (Some(output), _, _) => write!(
                f,
                "Leaf(output={:.6}, count={}, depth={})",
                output, self.data_count, self.depth
            ),
            (None, Some(feature), Some(threshold)) => write!(
                f,
                "Split(feature={}, threshold={:.6}, gain={:.6}, count={}, depth={})",
                feature, threshold, self.split_gain, self.data_count, self.depth
            ),
            _ => write!(f, "Node(incomplete)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_node() {
        let node = TreeNode::new_leaf(1.5, 10, 2);
        assert!(node.is_leaf());
        assert_eq!(node.leaf_output(), Some(1.5));
        assert_eq!(node.left_child(), None);
        assert_eq!(node.data_count(), 10);
        assert!(node.to_string().starts_with("Leaf"));
    }

    #[test]
    fn test_internal_node() {
        let node = TreeNode::new_internal(1, 2, 0, 0.5, 3.0, 20, 0);
        assert!(!node.is_leaf());
        assert_eq!(node.left_child(), Some(1));
        assert_eq!(node.right_child(), Some(2));
        assert_eq!(node.split_feature(), Some(0));
        assert_eq!(node.split_threshold(), Some(0.5));
        assert_eq!(node.split_gain(), 3.0);
        assert!(node.to_string().starts_with("Split"));
    }
}
