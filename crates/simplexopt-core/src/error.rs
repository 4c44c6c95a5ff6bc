//! Error types for simplex optimization.
//!
//! Non-convergence is deliberately absent from this module: a run that hits
//! its iteration cap still produces an [`OptimizationResult`](crate::optimizer::OptimizationResult)
//! with `converged == false`. The errors below cover precondition violations
//! and failures propagated from user cost functions.

use thiserror::Error;

/// Errors that can occur during optimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g., zero dimension, a contraction coefficient outside
    /// `(0, 1)`).
    #[error("Invalid optimizer configuration: {reason} ({parameter} = {value})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Dimension mismatch between vectors.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: String,
        /// Actual dimension
        actual: String,
    },

    /// An operation was used in a state where its inputs are not valid.
    ///
    /// Raised when a geometric move is requested while the centroid is stale.
    #[error("Invalid optimizer state: {reason}")]
    InvalidState {
        /// Description of the invalid state
        reason: String,
    },

    /// The cost function failed to produce a value.
    #[error("Cost function evaluation failed: {reason}")]
    CostEvaluation {
        /// Description of the failure
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

    /// Create an InvalidState error.
    pub fn invalid_state<S: Into<String>>(reason: S) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Create a CostEvaluation error.
    pub fn cost_evaluation<S: Into<String>>(reason: S) -> Self {
        Self::CostEvaluation {
            reason: reason.into(),
        }
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;
