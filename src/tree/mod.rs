//! Tree learning module.
//!
//! Provides the regression tree used as the weak learner of the boosting
//! engine: the flat node storage ([`Tree`], [`TreeNode`]), exact split
//! finding ([`SplitFinder`]), and the learner that grows trees
//! ([`DecisionTreeRegressor`]).

pub mod learner;
pub mod node;
pub mod split;
pub mod tree;

pub use learner::DecisionTreeRegressor;
pub use node::TreeNode;
pub use split::{SplitFinder, SplitFinderConfig, SplitInfo};
pub use tree::Tree;
