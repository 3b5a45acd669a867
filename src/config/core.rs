//! Core configuration structures and implementation for gbtree-rust.
//!
//! [`Config`] holds the hyperparameters fixed at construction of a boosting
//! model; [`ConfigBuilder`] is the fluent way to build one.

use crate::core::constants::*;
use crate::core::error::{GbtError, Result};
use crate::core::traits::LearnerParams;
use crate::core::types::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure for training and prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Objective function type (regression or binary classification)
    pub objective: ObjectiveType,
    /// Number of boosting iterations, i.e. trees in the ensemble
    pub num_iterations: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Learning rate (shrinkage) applied to each tree's output
    pub learning_rate: f64,
    /// Minimum number of data points in a leaf
    pub min_data_in_leaf: usize,
    /// Verbosity level for logging
    pub verbosity: VerbosityLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            objective: ObjectiveType::Regression,
            num_iterations: DEFAULT_NUM_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
            learning_rate: DEFAULT_LEARNING_RATE,
            min_data_in_leaf: DEFAULT_MIN_DATA_IN_LEAF,
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.num_iterations == 0 {
            return Err(GbtError::invalid_parameter(
                "num_iterations",
                self.num_iterations.to_string(),
                "must be at least 1",
            ));
        }

        if self.max_depth == 0 {
            return Err(GbtError::invalid_parameter(
                "max_depth",
                self.max_depth.to_string(),
                "must be at least 1",
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(GbtError::invalid_parameter(
                "learning_rate",
                self.learning_rate.to_string(),
                "must be a finite positive number",
            ));
        }

        if self.learning_rate > 1.0 {
            log::warn!(
                "learning_rate ({}) is above 1.0; boosting may overshoot",
                self.learning_rate
            );
        }

        if self.min_data_in_leaf == 0 {
            return Err(GbtError::invalid_parameter(
                "min_data_in_leaf",
                self.min_data_in_leaf.to_string(),
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Parameters forwarded to each weak learner
    pub fn learner_params(&self) -> LearnerParams {
        LearnerParams {
            max_depth: self.max_depth,
            min_data_in_leaf: self.min_data_in_leaf,
        }
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(GbtError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(GbtError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from `GBTREE_*` environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `GBTREE_*` environment variable overrides to this configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name (`GBTREE_NUM_ITERATIONS`,
    /// `GBTREE_MAX_DEPTH`, `GBTREE_LEARNING_RATE`, `GBTREE_MIN_DATA_IN_LEAF`,
    /// `GBTREE_OBJECTIVE`), then validate.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(val) = var("NUM_ITERATIONS") {
            self.num_iterations = parse_override("GBTREE_NUM_ITERATIONS", &val)?;
        }
        if let Some(val) = var("MAX_DEPTH") {
            self.max_depth = parse_override("GBTREE_MAX_DEPTH", &val)?;
        }
        if let Some(val) = var("LEARNING_RATE") {
            self.learning_rate = parse_override("GBTREE_LEARNING_RATE", &val)?;
        }
        if let Some(val) = var("MIN_DATA_IN_LEAF") {
            self.min_data_in_leaf = parse_override("GBTREE_MIN_DATA_IN_LEAF", &val)?;
        }
        if let Some(val) = var("OBJECTIVE") {
            self.objective = val.parse()?;
        }

        self.validate()
    }

    /// Get all parameters as a string map, for logging and diagnostics
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("objective".to_string(), self.objective.to_string());
        map.insert("num_iterations".to_string(), self.num_iterations.to_string());
        map.insert("max_depth".to_string(), self.max_depth.to_string());
        map.insert("learning_rate".to_string(), self.learning_rate.to_string());
        map.insert(
            "min_data_in_leaf".to_string(),
            self.min_data_in_leaf.to_string(),
        );
        map.insert("verbosity".to_string(), self.verbosity.to_string());
        map
    }
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| GbtError::config(format!("Invalid {}: {:?}", name, value)))
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the objective function
    pub fn objective(mut self, objective: ObjectiveType) -> Self {
        self.config.objective = objective;
        self
    }

    /// Set the number of boosting iterations
    pub fn num_iterations(mut self, iterations: usize) -> Self {
        if iterations == 0 {
            self.validation_errors
                .push("num_iterations must be at least 1".to_string());
        }
        self.config.num_iterations = iterations;
        self
    }

    /// Set the maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth == 0 {
            self.validation_errors
                .push("max_depth must be at least 1".to_string());
        }
        self.config.max_depth = depth;
        self
    }

    /// Set the learning rate
    pub fn learning_rate(mut self, rate: f64) -> Self {
        if !rate.is_finite() || rate <= 0.0 {
            self.validation_errors
                .push("learning_rate must be a finite positive number".to_string());
        }
        self.config.learning_rate = rate;
        self
    }

    /// Set minimum data points per leaf
    pub fn min_data_in_leaf(mut self, min_data: usize) -> Self {
        if min_data == 0 {
            self.validation_errors
                .push("min_data_in_leaf must be at least 1".to_string());
        }
        self.config.min_data_in_leaf = min_data;
        self
    }

    /// Set verbosity level
    pub fn verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            return Err(GbtError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
