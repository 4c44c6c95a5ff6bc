//! SimplexOpt Optimization - the Nelder-Mead simplex method.
//!
//! This crate provides the simplex itself, with its geometric moves, and the
//! driver that applies one move per iteration until the simplex collapses or
//! a stopping criterion fires.
//!
//! # Examples
//!
//! ```rust
//! use simplexopt_core::{cost_function::FnCost, optimizer::StoppingCriterion, types::DVector};
//! use simplexopt_optim::{NelderMead, NelderMeadConfig, ShrinkAnchor};
//!
//! let mut optimizer = NelderMead::new(
//!     NelderMeadConfig::new()
//!         .with_shrink_anchor(ShrinkAnchor::Best)
//!         .with_seed(7),
//! );
//!
//! let stopping_criterion = StoppingCriterion::new()
//!     .with_max_iterations(10_000)
//!     .with_spread_tolerance(1e-10);
//!
//! let cost_fn = FnCost::new(|x: &[f64]| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2));
//! let result = optimizer
//!     .optimize(&cost_fn, &DVector::zeros(2), &stopping_criterion)
//!     .unwrap();
//! assert!((result.point[0] - 3.0).abs() < 1e-4);
//! ```

pub mod nelder_mead;
pub mod simplex;

pub use nelder_mead::{MoveCounts, NelderMead, NelderMeadConfig, SimplexMove};
pub use simplex::{Coefficients, ContractionKind, ShrinkAnchor, Simplex, Vertex};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        let _config = NelderMeadConfig::<f64>::new();
        let _coefficients = Coefficients::<f64>::default();
        let _optimizer = NelderMead::<f32>::default();
        assert_eq!(ShrinkAnchor::default(), ShrinkAnchor::Best);
    }
}
