//! Core data types for gbtree-rust.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::GbtError;

/// Feature value type stored in the input matrix.
pub type Feature = f64;

/// Target value type (a real for regression, 0 or 1 for classification).
pub type Label = f64;

/// Prediction, residual and accumulated score type.
pub type Score = f64;

/// Feature (column) index type.
pub type FeatureIndex = usize;

/// Tree node identifier type.
pub type NodeIndex = usize;

/// Boosting iteration number.
pub type IterationIndex = usize;

/// Objective function types supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveType {
    /// Regression on real-valued targets with squared error
    Regression,
    /// Binary classification on {0, 1} labels with log loss
    Binary,
}

impl Default for ObjectiveType {
    fn default() -> Self {
        ObjectiveType::Regression
    }
}

impl fmt::Display for ObjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveType::Regression => write!(f, "regression"),
            ObjectiveType::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for ObjectiveType {
    type Err = GbtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regression" | "l2" | "mse" => Ok(ObjectiveType::Regression),
            "binary" | "logloss" => Ok(ObjectiveType::Binary),
            other => Err(GbtError::invalid_parameter(
                "objective",
                other,
                "expected 'regression' or 'binary'",
            )),
        }
    }
}

/// Feature importance calculation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportanceType {
    /// Number of splits that use the feature
    Split,
    /// Total squared-error reduction of splits that use the feature
    Gain,
}

impl Default for ImportanceType {
    fn default() -> Self {
        ImportanceType::Split
    }
}

/// Verbosity levels for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// No output
    Silent,
    /// Warnings only
    Warning,
    /// Info messages
    Info,
    /// Debug messages
    Debug,
}

impl Default for VerbosityLevel {
    fn default() -> Self {
        VerbosityLevel::Info
    }
}

impl VerbosityLevel {
    /// Equivalent `log` level filter.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            VerbosityLevel::Silent => log::LevelFilter::Off,
            VerbosityLevel::Warning => log::LevelFilter::Warn,
            VerbosityLevel::Info => log::LevelFilter::Info,
            VerbosityLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for VerbosityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbosityLevel::Silent => write!(f, "off"),
            VerbosityLevel::Warning => write!(f, "warn"),
            VerbosityLevel::Info => write!(f, "info"),
            VerbosityLevel::Debug => write!(f, "debug"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_parse() {
        assert_eq!("regression".parse::<ObjectiveType>().unwrap(), ObjectiveType::Regression);
        assert_eq!(" Binary ".parse::<ObjectiveType>().unwrap(), ObjectiveType::Binary);
        assert!("multiclass".parse::<ObjectiveType>().is_err());
    }

    #[test]
    fn test_objective_display_round_trip() {
        for objective in [ObjectiveType::Regression, ObjectiveType::Binary] {
            let parsed: ObjectiveType = objective.to_string().parse().unwrap();
            assert_eq!(parsed, objective);
        }
    }

    #[test]
    fn test_verbosity_filter() {
        assert_eq!(VerbosityLevel::Silent.level_filter(), log::LevelFilter::Off);
        assert_eq!(VerbosityLevel::Debug.level_filter(), log::LevelFilter::Debug);
        assert!(VerbosityLevel::Warning < VerbosityLevel::Info);
    }
}
