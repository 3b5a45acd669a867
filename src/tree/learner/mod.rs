//! Tree learning algorithms.

pub mod serial;

pub use serial::DecisionTreeRegressor;
