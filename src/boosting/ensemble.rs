//! Ensemble management.
//!
//! An [`Ensemble`] is the ordered sequence of fitted weak learners plus the
//! constant score every sample starts from. Its raw output for a row is
//! `initial_prediction + learning_rate * sum(learner outputs)`, accumulated
//! in insertion order.

use crate::core::constants::MAX_PREALLOCATED_ITERATIONS;
use crate::core::error::{GbtError, Result};
use crate::core::traits::WeakLearner;
use crate::core::types::{Feature, ImportanceType, Score};
use ndarray::{Array1, ArrayView2};

/// Ordered collection of fitted weak learners.
#[derive(Debug, Clone)]
pub struct Ensemble<W> {
    initial_prediction: Score,
    learning_rate: f64,
    num_features: usize,
    learners: Vec<W>,
}

impl<W: WeakLearner> Ensemble<W> {
    /// Creates an empty ensemble.
    pub fn new(initial_prediction: Score, learning_rate: f64, num_features: usize) -> Self {
        Ensemble {
            initial_prediction,
            learning_rate,
            num_features,
            learners: Vec::new(),
        }
    }

    /// Creates an empty ensemble with room for `capacity` learners (at most
    /// [`MAX_PREALLOCATED_ITERATIONS`] are reserved up front).
    pub fn with_capacity(
        initial_prediction: Score,
        learning_rate: f64,
        num_features: usize,
        capacity: usize,
    ) -> Self {
        Ensemble {
            initial_prediction,
            learning_rate,
            num_features,
            learners: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_ITERATIONS)),
        }
    }

    /// Appends a fitted learner.
    pub fn push(&mut self, learner: W) {
        self.learners.push(learner);
    }

    /// Constant score every sample starts from.
    pub fn initial_prediction(&self) -> Score {
        self.initial_prediction
    }

    /// Shrinkage applied to every learner's output.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Number of feature columns the ensemble was trained on.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of learners.
    pub fn len(&self) -> usize {
        self.learners.len()
    }

    /// True when no learner has been added.
    pub fn is_empty(&self) -> bool {
        self.learners.is_empty()
    }

    /// Learners in fitting order.
    pub fn learners(&self) -> &[W] {
        &self.learners
    }

    /// Accumulated raw scores for every row of `features`.
    pub fn raw_predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Score>> {
        if features.ncols() != self.num_features {
            return Err(GbtError::dimension_mismatch(
                format!("{} feature columns", self.num_features),
                format!("{} feature columns", features.ncols()),
            ));
        }

        let mut scores = Array1::from_elem(features.nrows(), self.initial_prediction);
        for learner in &self.learners {
            let output = learner.predict(features)?;
            accumulate(&mut scores, self.learning_rate, &output)?;
        }
        Ok(scores)
    }

    /// Per-feature importance summed over all learners.
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Array1<f64> {
        self.learners
            .iter()
            .fold(Array1::zeros(self.num_features), |total, learner| {
                total + learner.feature_importance(importance_type, self.num_features)
            })
    }
}

/// `scores += learning_rate * output`, in place.
pub(crate) fn accumulate(
    scores: &mut Array1<Score>,
    learning_rate: f64,
    output: &Array1<Score>,
) -> Result<()> {
    if output.len() != scores.len() {
        return Err(GbtError::dimension_mismatch(
            format!("{} learner outputs", scores.len()),
            format!("{} learner outputs", output.len()),
        ));
    }
    scores.scaled_add(learning_rate, output);
    Ok(())
}
