//! Gradient Boosting Decision Tree (GBDT) engine.
//!
//! [`GradientBoosting`] builds an additive model one weak learner at a time.
//! Every iteration fits a fresh learner on the pseudo-residuals of the current
//! scores and adds its shrunken output to them. The loss policy `L` decides the
//! starting score, the residual formula and how raw scores become outputs.

use crate::boosting::ensemble::{accumulate, Ensemble};
use crate::boosting::history::TrainingHistory;
use crate::boosting::loss::{create_loss_function, BinaryLogLoss, SquaredError};
use crate::config::Config;
use crate::core::error::{GbtError, Result};
use crate::core::traits::{LossFunction, WeakLearner};
use crate::core::types::*;
use crate::tree::DecisionTreeRegressor;
use crate::{dataset_error, ensure};
use ndarray::{Array1, Array2};

/// Gradient boosting over weak learners `W` with loss policy `L`.
#[derive(Debug, Clone)]
pub struct GradientBoosting<L: LossFunction, W: WeakLearner = DecisionTreeRegressor> {
    config: Config,
    loss: L,
    model: Option<FittedModel<W>>,
}

#[derive(Debug, Clone)]
struct FittedModel<W> {
    ensemble: Ensemble<W>,
    history: TrainingHistory,
}

/// Squared-error regression.
pub type GradientBoostingRegressor<W = DecisionTreeRegressor> = GradientBoosting<SquaredError, W>;

/// Binary classification on {0, 1} labels.
pub type GradientBoostingClassifier<W = DecisionTreeRegressor> = GradientBoosting<BinaryLogLoss, W>;

/// Engine whose loss policy is chosen at runtime from `Config::objective`.
pub type DynGradientBoosting<W = DecisionTreeRegressor> =
    GradientBoosting<Box<dyn LossFunction>, W>;

impl<L: LossFunction, W: WeakLearner> GradientBoosting<L, W> {
    /// Creates an unfitted engine.
    ///
    /// The configuration is validated here, and its objective is overwritten
    /// with the loss policy's objective so the two never disagree.
    pub fn with_loss(mut config: Config, loss: L) -> Result<Self> {
        config.validate()?;
        config.objective = loss.objective_type();
        Ok(GradientBoosting {
            config,
            loss,
            model: None,
        })
    }

    /// Creates an unfitted engine from the three core hyperparameters.
    pub fn with_params(num_iterations: usize, max_depth: usize, learning_rate: f64) -> Result<Self>
    where
        L: Default,
    {
        let config = Config {
            num_iterations,
            max_depth,
            learning_rate,
            ..Config::default()
        };
        Self::with_loss(config, L::default())
    }

    /// Fits the ensemble on `features` (rows = samples) and `labels`.
    ///
    /// Runs exactly `num_iterations` rounds. On error the engine keeps
    /// whatever model it held before the call.
    pub fn fit(&mut self, features: &Array2<Feature>, labels: &Array1<Label>) -> Result<()> {
        self.validate_training_data(features, labels)?;

        let num_data = features.nrows();
        let num_features = features.ncols();
        let num_iterations = self.config.num_iterations;
        let learning_rate = self.config.learning_rate;
        let params = self.config.learner_params();

        log::info!(
            "Starting {} training: {} samples, {} features, {} iterations, max_depth {}, learning_rate {}",
            self.loss.name(),
            num_data,
            num_features,
            num_iterations,
            params.max_depth,
            learning_rate
        );

        let features = features.view();
        let labels = labels.view();

        let initial_prediction = self.loss.initial_prediction(&labels)?;
        let mut ensemble =
            Ensemble::with_capacity(initial_prediction, learning_rate, num_features, num_iterations);
        let mut history = TrainingHistory::with_capacity(num_iterations);

        if self.loss.is_degenerate(&labels) {
            log::warn!(
                "all {} training labels have the value {}; initial {} prediction is clamped to {}",
                num_data,
                labels[0],
                self.loss.name(),
                initial_prediction
            );
            history.mark_degenerate_labels();
        }

        let mut predictions = Array1::from_elem(num_data, initial_prediction);
        let mut residuals = Array1::<Score>::zeros(num_data);

        for iteration in 0..num_iterations {
            self.loss.compute_residuals(
                &labels,
                &predictions.view(),
                &mut residuals.view_mut(),
            )?;
            let residual_sum_squares = residuals.dot(&residuals);

            let mut learner = W::from_params(&params);
            learner.fit(&features, &residuals.view())?;
            let update = learner.predict(&features)?;
            accumulate(&mut predictions, learning_rate, &update)?;

            if let Some(row) = predictions.iter().position(|p| !p.is_finite()) {
                return Err(GbtError::numerical(format!(
                    "non-finite score {} for row {} at iteration {}",
                    predictions[row], row, iteration
                )));
            }

            let train_loss = self.loss.loss(&labels, &predictions.view());
            history.record(train_loss, residual_sum_squares);
            log::debug!(
                "Iteration {}: {} = {:.6}, residual sum of squares = {:.6}",
                iteration,
                self.loss.name(),
                train_loss,
                residual_sum_squares
            );

            ensemble.push(learner);
        }

        if self.model.is_some() {
            log::debug!("Replacing previously fitted ensemble");
        }

        log::info!(
            "Training completed: {} trees, final {} = {:.6}",
            ensemble.len(),
            self.loss.name(),
            history.final_loss().unwrap_or(f64::NAN)
        );

        self.model = Some(FittedModel { ensemble, history });
        Ok(())
    }

    /// Predicts one output per row: accumulated scores mapped through the
    /// loss policy's `interpret`.
    pub fn predict(&self, features: &Array2<Feature>) -> Result<Array1<Score>> {
        let raw = self.predict_raw_for("predict", features)?;
        Ok(raw.mapv(|score| self.loss.interpret(score)))
    }

    /// Accumulated scores before interpretation (log-odds for classification).
    pub fn predict_raw(&self, features: &Array2<Feature>) -> Result<Array1<Score>> {
        self.predict_raw_for("predict_raw", features)
    }

    fn predict_raw_for(&self, operation: &str, features: &Array2<Feature>) -> Result<Array1<Score>> {
        self.fitted(operation)?.ensemble.raw_predict(&features.view())
    }

    fn fitted(&self, operation: &str) -> Result<&FittedModel<W>> {
        self.model
            .as_ref()
            .ok_or_else(|| GbtError::not_fitted(operation))
    }

    fn validate_training_data(&self, features: &Array2<Feature>, labels: &Array1<Label>) -> Result<()> {
        ensure!(
            features.nrows() == labels.len(),
            GbtError::dimension_mismatch(
                format!("{} labels (one per feature row)", features.nrows()),
                format!("{} labels", labels.len()),
            )
        );
        ensure!(
            features.nrows() > 0 && features.ncols() > 0,
            dataset_error!(
                "training data must have at least one row and one column, got {}x{}",
                features.nrows(),
                features.ncols()
            )
        );
        if let Some(((row, col), value)) = features.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(dataset_error!(
                "feature value at row {}, column {} is not finite: {}",
                row,
                col,
                value
            ));
        }
        self.loss.validate_labels(&labels.view())
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Active loss policy.
    pub fn loss(&self) -> &L {
        &self.loss
    }

    /// True once `fit` has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Starting score of the fitted model.
    pub fn initial_prediction(&self) -> Option<Score> {
        self.model.as_ref().map(|m| m.ensemble.initial_prediction())
    }

    /// Number of fitted weak learners (0 before fit).
    pub fn num_trees(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.ensemble.len())
    }

    /// Number of feature columns seen during fit.
    pub fn num_features(&self) -> Option<usize> {
        self.model.as_ref().map(|m| m.ensemble.num_features())
    }

    /// Fitted weak learners in fitting order (empty before fit).
    pub fn estimators(&self) -> &[W] {
        self.model
            .as_ref()
            .map(|m| m.ensemble.learners())
            .unwrap_or(&[])
    }

    /// Per-iteration diagnostics of the last successful fit.
    pub fn training_history(&self) -> Option<&TrainingHistory> {
        self.model.as_ref().map(|m| &m.history)
    }

    /// Feature importance summed over all trees.
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Result<Array1<f64>> {
        Ok(self
            .fitted("feature_importance")?
            .ensemble
            .feature_importance(importance_type))
    }
}

impl<W: WeakLearner> GradientBoosting<SquaredError, W> {
    /// Creates an unfitted regressor.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_loss(config, SquaredError)
    }
}

impl<W: WeakLearner> GradientBoosting<BinaryLogLoss, W> {
    /// Creates an unfitted binary classifier.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_loss(config, BinaryLogLoss)
    }

    /// Positive-class probability for each row.
    pub fn predict_proba(&self, features: &Array2<Feature>) -> Result<Array1<Score>> {
        let raw = self.predict_raw_for("predict_proba", features)?;
        Ok(raw.mapv(|score| self.loss.transform(score)))
    }
}

impl<W: WeakLearner> GradientBoosting<Box<dyn LossFunction>, W> {
    /// Creates an unfitted engine whose loss follows `config.objective`.
    pub fn from_config(config: Config) -> Result<Self> {
        let loss = create_loss_function(config.objective);
        Self::with_loss(config, loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn config(num_iterations: usize, max_depth: usize, learning_rate: f64) -> Config {
        ConfigBuilder::new()
            .num_iterations(num_iterations)
            .max_depth(max_depth)
            .learning_rate(learning_rate)
            .build()
            .unwrap()
    }

    #[test]
    fn test_regression_example() {
        let features = array![[1.0], [2.0], [3.0]];
        let labels = array![2.0, 4.0, 6.0];
        let mut model = GradientBoostingRegressor::<DecisionTreeRegressor>::new(config(20, 2, 0.3)).unwrap();
        model.fit(&features, &labels).unwrap();

        assert_eq!(model.num_trees(), 20);
        assert_abs_diff_eq!(model.initial_prediction().unwrap(), 4.0);
        let predictions = model.predict(&features).unwrap();
        for (p, y) in predictions.iter().zip(labels.iter()) {
            assert_abs_diff_eq!(p, y, epsilon = 0.5);
        }
    }

    #[test]
    fn test_classification_example() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = array![0.0, 0.0, 1.0, 1.0];
        let mut model = GradientBoostingClassifier::<DecisionTreeRegressor>::new(config(10, 1, 0.5)).unwrap();
        model.fit(&features, &labels).unwrap();

        assert_abs_diff_eq!(model.initial_prediction().unwrap(), 0.0);
        assert_eq!(model.predict(&features).unwrap(), labels);

        let proba = model.predict_proba(&features).unwrap();
        assert!(proba[0] < 0.5 && proba[3] > 0.5);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = GradientBoostingRegressor::<DecisionTreeRegressor>::new(Config::default()).unwrap();
        assert!(!model.is_fitted());
        assert!(model.estimators().is_empty());
        assert!(matches!(
            model.predict(&array![[1.0]]),
            Err(GbtError::NotFitted { .. })
        ));
        assert!(model.feature_importance(ImportanceType::Split).is_err());
    }

    #[test]
    fn test_objective_follows_loss() {
        let config = Config::default();
        assert_eq!(config.objective, ObjectiveType::Regression);
        let model = GradientBoostingClassifier::<DecisionTreeRegressor>::new(config).unwrap();
        assert_eq!(model.config().objective, ObjectiveType::Binary);
    }

    #[test]
    fn test_with_params_validates() {
        assert!(GradientBoostingRegressor::<DecisionTreeRegressor>::with_params(0, 3, 0.1).is_err());
        assert!(GradientBoostingRegressor::<DecisionTreeRegressor>::with_params(10, 0, 0.1).is_err());
        assert!(GradientBoostingRegressor::<DecisionTreeRegressor>::with_params(10, 3, 0.0).is_err());
        assert!(GradientBoostingRegressor::<DecisionTreeRegressor>::with_params(10, 3, 0.1).is_ok());
    }

    #[test]
    fn test_failed_fit_keeps_previous_model() {
        let features = array![[0.0], [1.0]];
        let mut model = GradientBoostingClassifier::<DecisionTreeRegressor>::new(config(3, 1, 0.5)).unwrap();
        model.fit(&features, &array![0.0, 1.0]).unwrap();
        let before = model.predict_raw(&features).unwrap();

        let result = model.fit(&features, &array![0.0, 2.0]);
        assert!(matches!(result, Err(GbtError::Dataset { .. })));
        assert_eq!(model.predict_raw(&features).unwrap(), before);
    }

    #[test]
    fn test_history_matches_iterations() {
        let features = Array2::from_shape_fn((20, 1), |(i, _)| i as f64);
        let labels = Array1::from_shape_fn(20, |i| 2.0 * i as f64);
        let mut model = GradientBoostingRegressor::<DecisionTreeRegressor>::new(config(15, 2, 0.2)).unwrap();
        model.fit(&features, &labels).unwrap();

        let history = model.training_history().unwrap();
        assert_eq!(history.len(), 15);
        let rss = history.residual_sum_squares();
        assert!(rss[rss.len() - 1] < rss[0]);
    }

    #[test]
    fn test_dynamic_loss_from_config() {
        let config = ConfigBuilder::new()
            .objective(ObjectiveType::Binary)
            .num_iterations(5)
            .max_depth(1)
            .learning_rate(0.5)
            .build()
            .unwrap();
        let mut model = DynGradientBoosting::<DecisionTreeRegressor>::from_config(config).unwrap();
        assert_eq!(model.loss().objective_type(), ObjectiveType::Binary);

        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = array![0.0, 0.0, 1.0, 1.0];
        model.fit(&features, &labels).unwrap();
        assert_eq!(model.predict(&features).unwrap(), labels);
    }

    #[test]
    fn test_feature_importance_length() {
        let features = array![[0.0, 5.0], [1.0, 5.0], [2.0, 5.0], [3.0, 5.0]];
        let labels = array![0.0, 0.0, 1.0, 1.0];
        let mut model = GradientBoostingRegressor::<DecisionTreeRegressor>::new(config(4, 1, 0.5)).unwrap();
        model.fit(&features, &labels).unwrap();

        let importance = model.feature_importance(ImportanceType::Split).unwrap();
        assert_eq!(importance.len(), 2);
        assert_eq!(importance[1], 0.0);
        assert!(importance[0] > 0.0);
    }
}
