//! Core trait definitions for gbtree-rust.
//!
//! The boosting engine depends on exactly two seams: a [`LossFunction`] that
//! supplies the initial prediction, pseudo-residuals and output interpretation,
//! and a [`WeakLearner`] that regresses features onto those residuals.

use crate::core::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_DATA_IN_LEAF};
use crate::core::error::Result;
use crate::core::types::*;
use ndarray::{Array1, ArrayView1, ArrayView2, ArrayViewMut1};

use std::fmt::Debug;

/// Parameters forwarded unchanged to every weak learner the engine creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnerParams {
    /// Maximum depth of the learner (root is depth 0)
    pub max_depth: usize,
    /// Minimum number of samples required in each leaf
    pub min_data_in_leaf: usize,
}

impl Default for LearnerParams {
    fn default() -> Self {
        LearnerParams {
            max_depth: DEFAULT_MAX_DEPTH,
            min_data_in_leaf: DEFAULT_MIN_DATA_IN_LEAF,
        }
    }
}

/// A regressor fit on pseudo-residuals at each boosting round.
pub trait WeakLearner: Send + Sync + Debug {
    /// Create an unfitted learner.
    fn from_params(params: &LearnerParams) -> Self
    where
        Self: Sized;

    /// Train the regressor to predict `targets` from `features`.
    fn fit(&mut self, features: &ArrayView2<'_, Feature>, targets: &ArrayView1<'_, Score>)
        -> Result<()>;

    /// Predict one real value per row of `features`.
    fn predict(&self, features: &ArrayView2<'_, Feature>) -> Result<Array1<Score>>;

    /// Per-feature importance scores; learners without a notion of
    /// importance report zeros.
    fn feature_importance(
        &self,
        _importance_type: ImportanceType,
        num_features: usize,
    ) -> Array1<f64> {
        Array1::zeros(num_features)
    }
}

/// Loss-specific policy used by the boosting engine.
///
/// Scores handed to the policy are always raw accumulated scores (log-odds
/// for classification); only [`interpret`](LossFunction::interpret) and
/// [`transform`](LossFunction::transform) leave that space.
pub trait LossFunction: Send + Sync + Debug {
    /// Constant prediction every sample starts from.
    fn initial_prediction(&self, labels: &ArrayView1<'_, Label>) -> Result<Score>;

    /// Write the negative gradient of the loss at `predictions` into
    /// `residuals`, pointwise.
    fn compute_residuals(
        &self,
        labels: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()>;

    /// Map an accumulated score to the final output.
    fn interpret(&self, raw: Score) -> Score;

    /// Map an accumulated score to the natural output scale before any
    /// thresholding.
    fn transform(&self, raw: Score) -> Score;

    /// Mean loss of `predictions` against `labels`.
    fn loss(&self, labels: &ArrayView1<'_, Label>, predictions: &ArrayView1<'_, Score>) -> f64;

    /// Check that labels lie in the domain of this loss.
    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()>;

    /// True when the labels leave nothing to learn and the initial
    /// prediction had to be clamped (a single class for binary labels).
    fn is_degenerate(&self, _labels: &ArrayView1<'_, Label>) -> bool {
        false
    }

    /// Short loss name used in logs.
    fn name(&self) -> &'static str;

    /// Objective this loss implements.
    fn objective_type(&self) -> ObjectiveType;
}

impl<L: LossFunction + ?Sized> LossFunction for Box<L> {
    fn initial_prediction(&self, labels: &ArrayView1<'_, Label>) -> Result<Score> {
        (**self).initial_prediction(labels)
    }

    fn compute_residuals(
        &self,
        labels: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        (**self).compute_residuals(labels, predictions, residuals)
    }

    fn interpret(&self, raw: Score) -> Score {
        (**self).interpret(raw)
    }

    fn transform(&self, raw: Score) -> Score {
        (**self).transform(raw)
    }

    fn loss(&self, labels: &ArrayView1<'_, Label>, predictions: &ArrayView1<'_, Score>) -> f64 {
        (**self).loss(labels, predictions)
    }

    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()> {
        (**self).validate_labels(labels)
    }

    fn is_degenerate(&self, labels: &ArrayView1<'_, Label>) -> bool {
        (**self).is_degenerate(labels)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn objective_type(&self) -> ObjectiveType {
        (**self).objective_type()
    }
}
