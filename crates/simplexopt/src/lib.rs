//! # SimplexOpt
//!
//! Derivative-free minimization with the Nelder-Mead simplex method.
//!
//! The method only needs objective values: it keeps `d + 1` points in
//! `d`-dimensional space and reshapes them by reflection, expansion,
//! contraction and shrink until the best and worst points nearly coincide.
//!
//! ## Quick Start
//!
//! ```rust
//! let minimum = simplexopt::nelder_mead(
//!     |x: &[f64]| -> f64 { x.iter().map(|v| v * v).sum() },
//!     2,
//! )
//! .unwrap();
//!
//! assert_eq!(minimum.len(), 2);
//! assert!(minimum.norm() < 1e-4);
//! ```
//!
//! For control over coefficients, seeding, budgets and callbacks use
//! [`NelderMead`] directly or [`nelder_mead_with`].
//!
//! ## Crate Structure
//!
//! - `simplexopt-core`: scalar trait, cost functions, stopping criteria,
//!   results, callbacks, errors
//! - `simplexopt-optim`: the simplex and the Nelder-Mead driver

pub use simplexopt_core::{
    callback, cost_function, error, optimizer, types, OptimizerError, Result,
};
pub use simplexopt_optim::{
    Coefficients, ContractionKind, MoveCounts, NelderMead, NelderMeadConfig, ShrinkAnchor,
    Simplex, SimplexMove, Vertex,
};

pub use nalgebra;

use simplexopt_core::{
    cost_function::FnCost,
    optimizer::{OptimizationResult, StoppingCriterion},
    types::{DVector, Scalar},
};

/// Minimizes `objective` over `dimension`-dimensional space.
///
/// Starts from a random simplex within `±0.1` of the origin and runs with the
/// default coefficients and stopping criterion. Hitting the iteration cap is
/// not an error: the best point found is returned and a warning is logged.
///
/// # Errors
///
/// Returns [`OptimizerError::InvalidConfiguration`] when `dimension` is zero.
pub fn nelder_mead<T, F>(objective: F, dimension: usize) -> Result<DVector<T>>
where
    T: Scalar,
    F: Fn(&[T]) -> T,
{
    let result = nelder_mead_with(
        objective,
        dimension,
        NelderMeadConfig::default(),
        &StoppingCriterion::default(),
    )?;
    Ok(result.point)
}

/// Like [`nelder_mead`], with an explicit configuration and stopping
/// criterion, returning the full [`OptimizationResult`].
pub fn nelder_mead_with<T, F>(
    objective: F,
    dimension: usize,
    config: NelderMeadConfig<T>,
    stopping_criterion: &StoppingCriterion<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: Fn(&[T]) -> T,
{
    let cost_fn = FnCost::new(objective);
    NelderMead::new(config).optimize(&cost_fn, &DVector::zeros(dimension), stopping_criterion)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{nelder_mead, nelder_mead_with};
    pub use simplexopt_core::prelude::*;
    pub use simplexopt_optim::{
        Coefficients, MoveCounts, NelderMead, NelderMeadConfig, ShrinkAnchor, Simplex,
        SimplexMove,
    };
}
