//! Loss policies for regression and binary classification.
//!
//! A loss policy decides where boosting starts (the initial prediction), what
//! each tree is fit on (the negative gradient of the loss at the current
//! scores), and how accumulated scores become outputs.

use crate::core::constants::{CLASSIFICATION_THRESHOLD, PROBABILITY_EPSILON};
use crate::core::error::{GbtError, Result};
use crate::core::traits::LossFunction;
use crate::core::types::{Label, ObjectiveType, Score};
use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Logistic function, evaluated without overflow for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn mean(labels: &ArrayView1<'_, Label>) -> Result<f64> {
    labels
        .mean()
        .ok_or_else(|| GbtError::dataset("cannot compute an initial prediction from zero labels"))
}

fn check_lengths(
    labels: &ArrayView1<'_, Label>,
    predictions: &ArrayView1<'_, Score>,
    residuals: &ArrayViewMut1<'_, Score>,
) -> Result<()> {
    if labels.len() != predictions.len() || labels.len() != residuals.len() {
        return Err(GbtError::dimension_mismatch(
            format!("{} predictions and residuals", labels.len()),
            format!(
                "{} predictions and {} residuals",
                predictions.len(),
                residuals.len()
            ),
        ));
    }
    Ok(())
}

/// Squared-error loss for regression.
///
/// Starts from the mean target, fits trees on `y - F(x)`, and returns scores
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredError;

impl LossFunction for SquaredError {
    fn initial_prediction(&self, labels: &ArrayView1<'_, Label>) -> Result<Score> {
        mean(labels)
    }

    fn compute_residuals(
        &self,
        labels: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        check_lengths(labels, predictions, residuals)?;
        Zip::from(residuals)
            .and(labels)
            .and(predictions)
            .for_each(|r, &y, &p| *r = y - p);
        Ok(())
    }

    fn interpret(&self, raw: Score) -> Score {
        raw
    }

    fn transform(&self, raw: Score) -> Score {
        raw
    }

    fn loss(&self, labels: &ArrayView1<'_, Label>, predictions: &ArrayView1<'_, Score>) -> f64 {
        if labels.is_empty() {
            return 0.0;
        }
        if labels.len() != predictions.len() {
            return f64::NAN;
        }
        let total = Zip::from(labels)
            .and(predictions)
            .fold(0.0, |acc, &y, &p| acc + (y - p) * (y - p));
        total / labels.len() as f64
    }

    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()> {
        if let Some(index) = labels.iter().position(|y| !y.is_finite()) {
            return Err(GbtError::dataset(format!(
                "label at row {} is not finite: {}",
                index, labels[index]
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "squared_error"
    }

    fn objective_type(&self) -> ObjectiveType {
        ObjectiveType::Regression
    }
}

/// Binary log loss on {0, 1} labels.
///
/// Scores accumulate in log-odds space. Residuals are `y - sigmoid(F(x))`,
/// and [`interpret`](LossFunction::interpret) thresholds the probability at
/// 0.5, sending an exact 0.5 to class 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryLogLoss;

impl LossFunction for BinaryLogLoss {
    fn initial_prediction(&self, labels: &ArrayView1<'_, Label>) -> Result<Score> {
        let positive_rate = mean(labels)?;
        let p = positive_rate.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
        Ok((p / (1.0 - p)).ln())
    }

    fn compute_residuals(
        &self,
        labels: &ArrayView1<'_, Label>,
        predictions: &ArrayView1<'_, Score>,
        residuals: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        check_lengths(labels, predictions, residuals)?;
        Zip::from(residuals)
            .and(labels)
            .and(predictions)
            .for_each(|r, &y, &p| *r = y - sigmoid(p));
        Ok(())
    }

    fn interpret(&self, raw: Score) -> Score {
        if sigmoid(raw) >= CLASSIFICATION_THRESHOLD {
            1.0
        } else {
            0.0
        }
    }

    fn transform(&self, raw: Score) -> Score {
        sigmoid(raw)
    }

    fn loss(&self, labels: &ArrayView1<'_, Label>, predictions: &ArrayView1<'_, Score>) -> f64 {
        if labels.is_empty() {
            return 0.0;
        }
        if labels.len() != predictions.len() {
            return f64::NAN;
        }
        let total = Zip::from(labels).and(predictions).fold(0.0, |acc, &y, &raw| {
            let p = sigmoid(raw).clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
            acc - (y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        });
        total / labels.len() as f64
    }

    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()> {
        if let Some(index) = labels.iter().position(|&y| y != 0.0 && y != 1.0) {
            return Err(GbtError::dataset(format!(
                "binary labels must be 0 or 1, found {} at row {}",
                labels[index], index
            )));
        }
        Ok(())
    }

    fn is_degenerate(&self, labels: &ArrayView1<'_, Label>) -> bool {
        match labels.first() {
            Some(&first) => labels.iter().all(|&y| y == first),
            None => false,
        }
    }

    fn name(&self) -> &'static str {
        "binary_logloss"
    }

    fn objective_type(&self) -> ObjectiveType {
        ObjectiveType::Binary
    }
}

/// Create the loss policy for an objective.
pub fn create_loss_function(objective: ObjectiveType) -> Box<dyn LossFunction> {
    match objective {
        ObjectiveType::Regression => Box::new(SquaredError),
        ObjectiveType::Binary => Box::new(BinaryLogLoss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    #[test]
    fn test_sigmoid() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5);
        assert_abs_diff_eq!(sigmoid(3.0_f64.ln()), 0.75, epsilon = 1e-12);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_abs_diff_eq!(sigmoid(2.0) + sigmoid(-2.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_squared_error_policy() {
        let labels = array![1.0, 2.0, 6.0];
        assert_abs_diff_eq!(SquaredError.initial_prediction(&labels.view()).unwrap(), 3.0);

        let predictions = array![3.0, 3.0, 3.0];
        let mut residuals = Array1::zeros(3);
        SquaredError
            .compute_residuals(&labels.view(), &predictions.view(), &mut residuals.view_mut())
            .unwrap();
        assert_eq!(residuals, array![-2.0, -1.0, 3.0]);

        assert_eq!(SquaredError.interpret(-7.25), -7.25);
        assert_abs_diff_eq!(
            SquaredError.loss(&labels.view(), &predictions.view()),
            14.0 / 3.0
        );
    }

    #[test]
    fn test_log_odds_initial_prediction() {
        let labels = array![1.0, 1.0, 1.0, 0.0];
        let initial = BinaryLogLoss.initial_prediction(&labels.view()).unwrap();
        assert_abs_diff_eq!(initial, 3.0_f64.ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(initial, 1.0986, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_labels_are_clamped() {
        let positives = array![1.0, 1.0];
        let negatives = array![0.0, 0.0];
        let high = BinaryLogLoss.initial_prediction(&positives.view()).unwrap();
        let low = BinaryLogLoss.initial_prediction(&negatives.view()).unwrap();

        assert!(high.is_finite() && low.is_finite());
        assert!(BinaryLogLoss.is_degenerate(&positives.view()));
        assert!(BinaryLogLoss.is_degenerate(&negatives.view()));
        assert!(!BinaryLogLoss.is_degenerate(&array![0.0, 1.0].view()));
        assert!(!SquaredError.is_degenerate(&array![3.0, 3.0].view()));
        let expected = ((1.0 - PROBABILITY_EPSILON) / PROBABILITY_EPSILON).ln();
        assert_abs_diff_eq!(high, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(low, -expected, epsilon = 1e-6);
    }

    #[test]
    fn test_binary_residuals_use_probabilities() {
        let labels = array![1.0, 0.0];
        let predictions = array![0.0, 0.0];
        let mut residuals = Array1::zeros(2);
        BinaryLogLoss
            .compute_residuals(&labels.view(), &predictions.view(), &mut residuals.view_mut())
            .unwrap();
        assert_eq!(residuals, array![0.5, -0.5]);
    }

    #[test]
    fn test_binary_interpret() {
        assert_eq!(BinaryLogLoss.interpret(-50.0), 0.0);
        assert_eq!(BinaryLogLoss.interpret(50.0), 1.0);
        assert_eq!(BinaryLogLoss.interpret(-0.01), 0.0);
        assert_eq!(BinaryLogLoss.interpret(0.01), 1.0);
        // exact 0.5 rounds up
        assert_eq!(BinaryLogLoss.interpret(0.0), 1.0);
        assert_eq!(BinaryLogLoss.interpret(f64::NEG_INFINITY), 0.0);
        assert_eq!(BinaryLogLoss.interpret(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_binary_label_validation() {
        assert!(BinaryLogLoss.validate_labels(&array![0.0, 1.0, 1.0].view()).is_ok());
        let err = BinaryLogLoss
            .validate_labels(&array![0.0, 2.0].view())
            .unwrap_err();
        assert!(matches!(err, GbtError::Dataset { .. }));
        assert!(err.to_string().contains("row 1"));

        assert!(SquaredError.validate_labels(&array![1.0, f64::NAN].view()).is_err());
    }

    #[test]
    fn test_binary_loss_value() {
        let labels = array![1.0, 0.0];
        let predictions = array![0.0, 0.0];
        assert_abs_diff_eq!(
            BinaryLogLoss.loss(&labels.view(), &predictions.view()),
            2.0_f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_residual_length_mismatch() {
        let labels = array![1.0, 0.0];
        let predictions = array![0.0];
        let mut residuals = Array1::zeros(2);
        assert!(matches!(
            SquaredError.compute_residuals(
                &labels.view(),
                &predictions.view(),
                &mut residuals.view_mut()
            ),
            Err(GbtError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_labels() {
        let labels = Array1::<f64>::zeros(0);
        assert!(SquaredError.initial_prediction(&labels.view()).is_err());
        assert!(BinaryLogLoss.initial_prediction(&labels.view()).is_err());
    }

    #[test]
    fn test_create_loss_function() {
        let loss = create_loss_function(ObjectiveType::Binary);
        assert_eq!(loss.objective_type(), ObjectiveType::Binary);
        assert_eq!(loss.name(), "binary_logloss");
        assert_eq!(loss.interpret(5.0), 1.0);

        let loss = create_loss_function(ObjectiveType::Regression);
        assert_eq!(loss.transform(5.0), 5.0);
    }
}
