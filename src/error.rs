//! Error types for encoder operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for encoder operations.
///
/// Configuration problems surface as [`EncoderError::InvalidHyperparameter`]
/// at construction time; malformed tables surface as
/// [`EncoderError::InvalidInput`] before any computation runs.
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::error::EncoderError;
///
/// let err = EncoderError::InvalidHyperparameter {
///     param: "linkage_method".to_string(),
///     value: "ward".to_string(),
///     constraint: "one of average, complete, single".to_string(),
/// };
/// assert!(err.to_string().contains("linkage_method"));
/// ```
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Invalid hyperparameter value provided.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Input table does not have the expected shape or dtype.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// `transform` was called before a successful `fit`.
    #[error("{estimator} not fitted. Call fit() first.")]
    NotFitted {
        /// Estimator name
        estimator: &'static str,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("Matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for EncoderError {
    fn from(msg: &str) -> Self {
        EncoderError::Other(msg.to_string())
    }
}

impl From<String> for EncoderError {
    fn from(msg: String) -> Self {
        EncoderError::Other(msg)
    }
}

impl EncoderError {
    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }

    /// Returns true for configuration errors raised at construction time.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidHyperparameter { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, EncoderError>;
