//! Boosting algorithms and ensemble management for gbtree-rust.
//!
//! This module contains the gradient boosting engine, the loss policies it is
//! parameterized by, and the ensemble and history types it produces.

pub mod ensemble;
pub mod gbdt;
pub mod history;
pub mod loss;

pub use ensemble::Ensemble;
pub use gbdt::{
    DynGradientBoosting, GradientBoosting, GradientBoostingClassifier, GradientBoostingRegressor,
};
pub use history::TrainingHistory;
pub use loss::{create_loss_function, sigmoid, BinaryLogLoss, SquaredError};
