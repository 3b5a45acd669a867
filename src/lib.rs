//! # gbtree-rust
//!
//! Gradient boosting over regression trees, for regression and binary
//! classification, on dense `ndarray` inputs.
//!
//! ## Features
//!
//! - **Generic Engine**: one boosting loop parameterized by a loss policy, with
//!   squared error for regression and log loss for binary classification.
//! - **Exact Trees**: CART regression trees with exhaustive split search,
//!   parallelized across features with Rayon.
//! - **Explicit Errors**: shape, configuration and fitting problems are
//!   reported through [`GbtError`] instead of panics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gbtree_rust::{ConfigBuilder, GradientBoostingRegressor};
//! use ndarray::{array, Array1, Array2};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let features: Array2<f64> = array![[1.0], [2.0], [3.0]];
//! let labels: Array1<f64> = array![2.0, 4.0, 6.0];
//!
//! let config = ConfigBuilder::new()
//!     .num_iterations(20)
//!     .max_depth(2)
//!     .learning_rate(0.3)
//!     .build()?;
//!
//! let mut model: GradientBoostingRegressor = GradientBoostingRegressor::new(config)?;
//! model.fit(&features, &labels)?;
//!
//! let predictions = model.predict(&features)?;
//! println!("Predictions: {:?}", predictions);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types, constants, error handling, and trait abstractions
//! - [`config`]: Hyperparameters, validation, and file/environment loading
//! - [`tree`]: Regression trees used as weak learners
//! - [`boosting`]: The boosting engine, loss policies, and ensemble management

#![doc(html_root_url = "https://docs.rs/gbtree-rust/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Tree learning module
pub mod tree;

// Boosting module
pub mod boosting;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{GbtError, Result},
    traits::*,
    types::*,
};

// Re-export configuration functionality
pub use config::{Config, ConfigBuilder};

// Re-export tree functionality
pub use tree::{DecisionTreeRegressor, Tree, TreeNode};

// Re-export boosting functionality
pub use boosting::{
    create_loss_function, BinaryLogLoss, DynGradientBoosting, Ensemble, GradientBoosting,
    GradientBoostingClassifier, GradientBoostingRegressor, SquaredError, TrainingHistory,
};

// Version information
pub use self::core::constants::GBTREE_RUST_VERSION as VERSION;

/// Initialize the library's logging.
///
/// Installs `env_logger` at the default verbosity (`RUST_LOG` still takes
/// precedence). Calling it more than once is harmless.
///
/// # Examples
///
/// ```rust
/// fn main() -> gbtree_rust::Result<()> {
///     gbtree_rust::init()?;
///     assert!(gbtree_rust::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    core::initialize_core(DEFAULT_VERBOSITY)
}

/// Initialize the library's logging at `config.verbosity`.
///
/// Behaves like [`init`] otherwise; only the first initialization in a
/// process picks the level.
///
/// ```rust
/// use gbtree_rust::{ConfigBuilder, VerbosityLevel};
///
/// fn main() -> gbtree_rust::Result<()> {
///     let config = ConfigBuilder::new()
///         .verbosity(VerbosityLevel::Warning)
///         .build()?;
///     gbtree_rust::init_with_config(&config)?;
///     Ok(())
/// }
/// ```
pub fn init_with_config(config: &Config) -> Result<()> {
    core::initialize_core(config.verbosity)
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    core::is_core_initialized()
}
