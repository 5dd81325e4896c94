//! Error types for proximal optimization.
//!
//! Errors are split in two layers: [`ProximalError`] for failures raised while
//! building or evaluating a single proximal operator, and [`OptimizerError`]
//! for failures of a whole `minimize()` run.

use thiserror::Error;

/// Errors that can occur while building or evaluating a proximal operator.
#[derive(Debug, Clone, Error)]
pub enum ProximalError {
    /// Dimension mismatch between matrices.
    ///
    /// Raised when a parameter or an operator output does not have the shape
    /// of the iterate it is combined with.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Numerical instability detected.
    ///
    /// Raised for singular systems, failed decompositions or non-finite values.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// A parameter was supplied with an invalid value.
    #[error("Invalid parameter '{parameter}' for regularizer '{regularizer}': {reason}")]
    InvalidParameter {
        /// Regularizer being built
        regularizer: String,
        /// Name of the offending parameter
        parameter: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A built-in regularizer was requested without one of its parameters.
    #[error("Regularizer '{regularizer}' requires parameter '{parameter}'")]
    MissingParameter {
        /// Regularizer being built
        regularizer: String,
        /// Name of the missing parameter
        parameter: String,
    },

    /// No built-in regularizer exists under the requested name.
    #[error("Unknown regularizer '{name}' (available: {available})")]
    UnknownRegularizer {
        /// Name that failed to resolve
        name: String,
        /// Comma-separated list of built-in names
        available: String,
    },
}

impl ProximalError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a DimensionMismatch error from two matrix shapes.
    pub fn shape_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::dimension_mismatch(
            format!("{}x{}", expected.0, expected.1),
            format!("{}x{}", actual.0, actual.1),
        )
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S1, S2, S3>(regularizer: S1, parameter: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidParameter {
            regularizer: regularizer.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingParameter error.
    pub fn missing_parameter<S1: Into<String>, S2: Into<String>>(
        regularizer: S1,
        parameter: S2,
    ) -> Self {
        Self::MissingParameter {
            regularizer: regularizer.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an UnknownRegularizer error.
    pub fn unknown_regularizer<S: Into<String>>(name: S, available: &[&str]) -> Self {
        Self::UnknownRegularizer {
            name: name.into(),
            available: available.join(", "),
        }
    }
}

/// Errors that can occur during optimization.
#[derive(Debug, Clone, Error)]
pub enum OptimizerError {
    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g., a zero iteration cap or a negative tolerance).
    #[error("Invalid optimizer configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// `minimize()` was called before any objective or regularizer was added.
    #[error("There must be at least one objective or regularizer to minimize")]
    NoObjectives,

    /// Propagated proximal operator error.
    #[error("Proximal operator failed: {0}")]
    Proximal(#[from] ProximalError),

    /// A user callback reported a failure.
    #[error("Callback failed: {reason}")]
    CallbackFailed {
        /// Description supplied by the callback
        reason: String,
    },
}

impl OptimizerError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create a CallbackFailed error.
    pub fn callback_failed<S: Into<String>>(reason: S) -> Self {
        Self::CallbackFailed {
            reason: reason.into(),
        }
    }
}

/// Result type alias for operations that can produce ProximalError.
pub type Result<T> = std::result::Result<T, ProximalError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
