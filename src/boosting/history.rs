//! Per-iteration training diagnostics.

use crate::core::constants::MAX_PREALLOCATED_ITERATIONS;
use crate::core::types::IterationIndex;
use serde::{Deserialize, Serialize};

/// Training loss and residual magnitude recorded at every boosting iteration.
///
/// `residual_sum_squares[i]` is measured on the residuals tree `i` was fit
/// on, i.e. before its contribution is added; `train_loss[i]` is measured
/// after.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    train_loss: Vec<f64>,
    residual_sum_squares: Vec<f64>,
    degenerate_labels: bool,
}

impl TrainingHistory {
    /// Creates an empty history with room for `capacity` iterations (at most
    /// [`MAX_PREALLOCATED_ITERATIONS`] are reserved up front).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_PREALLOCATED_ITERATIONS);
        TrainingHistory {
            train_loss: Vec::with_capacity(capacity),
            residual_sum_squares: Vec::with_capacity(capacity),
            degenerate_labels: false,
        }
    }

    pub(crate) fn mark_degenerate_labels(&mut self) {
        self.degenerate_labels = true;
    }

    /// True when training labels were degenerate for the loss (e.g. a single
    /// class) and the initial prediction was clamped.
    pub fn degenerate_labels(&self) -> bool {
        self.degenerate_labels
    }

    /// Records one iteration.
    pub fn record(&mut self, train_loss: f64, residual_sum_squares: f64) {
        self.train_loss.push(train_loss);
        self.residual_sum_squares.push(residual_sum_squares);
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.train_loss.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.train_loss.is_empty()
    }

    /// Training loss after each iteration.
    pub fn train_loss(&self) -> &[f64] {
        &self.train_loss
    }

    /// Summed squared residuals fit at each iteration.
    pub fn residual_sum_squares(&self) -> &[f64] {
        &self.residual_sum_squares
    }

    /// Training loss after the last iteration.
    pub fn final_loss(&self) -> Option<f64> {
        self.train_loss.last().copied()
    }

    /// Iteration with the lowest training loss (earliest on ties).
    pub fn best_iteration(&self) -> Option<IterationIndex> {
        self.train_loss
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &loss)| match best {
                Some((_, best_loss)) if best_loss <= loss => best,
                _ => Some((i, loss)),
            })
            .map(|(i, _)| i)
    }
}
