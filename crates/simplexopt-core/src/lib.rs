//! Core traits and types for derivative-free simplex optimization.
//!
//! This crate provides the foundations shared by the optimizers in the
//! workspace: the scalar abstraction, the objective-function interface,
//! stopping criteria, results, and callbacks.
//!
//! # Modules
//!
//! - [`callback`]: Per-iteration observation and cancellation
//! - [`cost_function`]: Cost function interface and closure adapters
//! - [`error`]: Error types for optimizer operations
//! - [`optimizer`]: Results, termination reasons and stopping criteria
//! - [`types`]: Scalar trait, vector aliases and numerical constants

pub mod callback;
pub mod cost_function;
pub mod error;
pub mod optimizer;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use simplexopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callback::{
        CallbackInfo, CancellationCallback, LogProgressCallback, NoOpCallback,
        OptimizationCallback,
    };
    pub use crate::cost_function::{CostFunction, CountingCostFunction, FnCost, TryFnCost};
    pub use crate::error::{OptimizerError, Result};
    pub use crate::optimizer::{
        ConvergenceChecker, OptimizationResult, Optimizer, OptimizerState, StoppingCriterion,
        TerminationReason,
    };
    pub use crate::types::{constants, DVector, Point, Scalar};
}
