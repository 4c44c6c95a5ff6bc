//! Type definitions and aliases for simplex optimization.
//!
//! This module provides the scalar trait shared by every algorithm in the
//! workspace, the vector aliases used to store simplex vertices, and the
//! numerical constants used as defaults.

use nalgebra::{Dyn, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the numeric traits required by the simplex
/// geometry and the driver.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default L2 spread below which a simplex is considered collapsed.
    const DEFAULT_SPREAD_TOLERANCE: Self;

    /// Default half-width of the random perturbation used to seed a simplex.
    const DEFAULT_INITIAL_SPREAD: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize (for vertex counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_SPREAD_TOLERANCE: Self = 1e-6;
    const DEFAULT_INITIAL_SPREAD: Self = 0.1;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_SPREAD_TOLERANCE: Self = 1e-8;
    const DEFAULT_INITIAL_SPREAD: Self = 0.1;
}

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// A point in the search space.
pub type Point<T> = DVector<T>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Default iteration cap for a single run.
    pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get the default simplex spread tolerance.
    pub fn spread_tolerance<T: Scalar>() -> T {
        T::DEFAULT_SPREAD_TOLERANCE
    }

    /// Get the default initial perturbation half-width.
    pub fn initial_spread<T: Scalar>() -> T {
        T::DEFAULT_INITIAL_SPREAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert!(f32::DEFAULT_SPREAD_TOLERANCE > 0.0);
        assert!(f32::DEFAULT_INITIAL_SPREAD > f32::DEFAULT_SPREAD_TOLERANCE);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert_relative_eq!(f64::DEFAULT_SPREAD_TOLERANCE, 1e-8);
        assert_relative_eq!(f64::DEFAULT_INITIAL_SPREAD, 0.1);
    }

    #[test]
    fn test_conversions() {
        let x = <f32 as Scalar>::from_f64(0.5);
        assert_relative_eq!(x, 0.5f32);
        assert_relative_eq!(Scalar::to_f64(0.25f32), 0.25);
        assert_eq!(<f64 as Scalar>::from_usize(3), 3.0);
        assert_eq!(<f64 as Scalar>::try_from_f64(1.5), Some(1.5));
    }

    #[test]
    fn test_constants() {
        assert_eq!(constants::DEFAULT_MAX_ITERATIONS, 1_000_000);
        assert_eq!(constants::spread_tolerance::<f64>(), 1e-8);
        assert_eq!(constants::initial_spread::<f64>(), 0.1);
        assert_eq!(constants::epsilon::<f64>(), f64::EPSILON);
    }
}
