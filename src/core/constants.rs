//! Default hyperparameters and numeric constants.

use crate::core::types::VerbosityLevel;

/// Default number of boosting iterations (trees in the ensemble).
pub const DEFAULT_NUM_ITERATIONS: usize = 100;

/// Default maximum depth of each weak learner.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default learning rate (shrinkage) applied to each tree's contribution.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default minimum number of samples in a leaf.
pub const DEFAULT_MIN_DATA_IN_LEAF: usize = 1;

/// Default verbosity level for logging.
pub const DEFAULT_VERBOSITY: VerbosityLevel = VerbosityLevel::Info;

/// Clamp applied to the positive-class rate before taking log-odds.
pub const PROBABILITY_EPSILON: f64 = 1e-10;

/// Probability threshold separating the two classes.
pub const CLASSIFICATION_THRESHOLD: f64 = 0.5;

/// Smallest impurity decrease that counts as a real split, as a fraction of
/// the node's summed squared targets.
pub const SPLIT_GAIN_TOLERANCE: f64 = 1e-14;

/// Upper bound on per-iteration buffers reserved before training starts.
pub const MAX_PREALLOCATED_ITERATIONS: usize = 1024;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GBTREE_";

/// Library version string.
pub const GBTREE_RUST_VERSION: &str = env!("CARGO_PKG_VERSION");
