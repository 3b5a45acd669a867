//! Error handling and error types for gbtree-rust.
//!
//! Every fallible operation in the crate returns [`Result`], so configuration,
//! shape and fitting problems surface to the caller instead of producing
//! silently wrong predictions.

use std::io;
use thiserror::Error;

/// Main error type for the library.
///
/// Boosting is deterministic numeric computation, so none of these errors is
/// transient: a failed call will fail again with the same inputs.
#[derive(Error, Debug)]
pub enum GbtError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid hyperparameter value
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Shape disagreement between inputs, or between training and prediction
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// A model was used before `fit` completed
    #[error("Model is not fitted: call fit() before {operation}")]
    NotFitted { operation: String },

    /// Training data that cannot be boosted on
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Non-finite values produced during boosting
    #[error("Numerical error: {message}")]
    Numerical { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML parse error: {source}")]
    TomlDe {
        #[from]
        source: toml::de::Error,
    },

    /// TOML serialization errors
    #[error("TOML serialization error: {source}")]
    TomlSer {
        #[from]
        source: toml::ser::Error,
    },
}

/// Type alias for Results using GbtError
pub type Result<T> = std::result::Result<T, GbtError>;

impl GbtError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        GbtError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        GbtError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        GbtError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a not-fitted error for the named operation
    pub fn not_fitted<S: Into<String>>(operation: S) -> Self {
        GbtError::NotFitted {
            operation: operation.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        GbtError::Dataset {
            message: message.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        GbtError::Numerical {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable by retrying the same call
    pub fn is_recoverable(&self) -> bool {
        match self {
            GbtError::Config { .. }
            | GbtError::InvalidParameter { .. }
            | GbtError::DimensionMismatch { .. }
            | GbtError::NotFitted { .. }
            | GbtError::Dataset { .. }
            | GbtError::Numerical { .. }
            | GbtError::Json { .. }
            | GbtError::TomlDe { .. }
            | GbtError::TomlSer { .. } => false,
            GbtError::Io { source } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
            ),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            GbtError::Config { .. } => "config",
            GbtError::InvalidParameter { .. } => "invalid_parameter",
            GbtError::DimensionMismatch { .. } => "dimension_mismatch",
            GbtError::NotFitted { .. } => "not_fitted",
            GbtError::Dataset { .. } => "dataset",
            GbtError::Numerical { .. } => "numerical",
            GbtError::Io { .. } => "io",
            GbtError::Json { .. } => "json",
            GbtError::TomlDe { .. } | GbtError::TomlSer { .. } => "toml",
        }
    }

    /// True for errors raised by configuration validation
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GbtError::Config { .. } | GbtError::InvalidParameter { .. }
        )
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::GbtError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::GbtError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! dataset_error {
    ($msg:expr) => {
        $crate::core::error::GbtError::dataset($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::GbtError::dataset(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
