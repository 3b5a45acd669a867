//! Common test utilities for gbtree-rust integration tests.

#![allow(dead_code)]

use gbtree_rust::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;

/// Create test features for regression tasks
pub fn create_test_features_regression(num_samples: usize, num_features: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array2::from_shape_fn((num_samples, num_features), |_| rng.gen_range(-5.0..5.0))
}

/// Create test labels for regression as a linear combination of the features
pub fn create_test_labels_regression(features: &Array2<f64>) -> Array1<f64> {
    let weights = Array1::from_shape_fn(features.ncols(), |j| (j + 1) as f64 * 0.5);
    features.dot(&weights)
}

/// Create test features for binary classification
pub fn create_test_features_binary(num_samples: usize, num_features: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(123);
    Array2::from_shape_fn((num_samples, num_features), |_| rng.gen_range(-3.0..3.0))
}

/// Create test labels for binary classification: 1 when the feature sum is positive
pub fn create_test_labels_binary(features: &Array2<f64>) -> Array1<f64> {
    features
        .rows()
        .into_iter()
        .map(|row| if row.sum() > 0.0 { 1.0 } else { 0.0 })
        .collect()
}

/// Create a test configuration for an objective
pub fn create_test_config(
    objective: ObjectiveType,
    num_iterations: usize,
    max_depth: usize,
    learning_rate: f64,
) -> Config {
    ConfigBuilder::new()
        .objective(objective)
        .num_iterations(num_iterations)
        .max_depth(max_depth)
        .learning_rate(learning_rate)
        .build()
        .expect("test configuration must be valid")
}

/// Fraction of positions where `predictions` equals `labels`
pub fn accuracy(predictions: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    let correct = predictions
        .iter()
        .zip(labels.iter())
        .filter(|(p, y)| p == y)
        .count();
    correct as f64 / labels.len() as f64
}

/// Mean squared error between `predictions` and `labels`
pub fn mean_squared_error(predictions: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    let diff = predictions - labels;
    diff.dot(&diff) / labels.len() as f64
}

/// Macro for creating test data more easily
#[macro_export]
macro_rules! create_test_data {
    (regression, $samples:expr, $features:expr) => {{
        let features = common::create_test_features_regression($samples, $features);
        let labels = common::create_test_labels_regression(&features);
        (features, labels)
    }};

    (binary, $samples:expr, $features:expr) => {{
        let features = common::create_test_features_binary($samples, $features);
        let labels = common::create_test_labels_binary(&features);
        (features, labels)
    }};
}
