//! Standard objective functions for tests and benchmarks.
//!
//! Available under `cfg(test)` or with the `test-utils` feature.

use crate::{
    cost_function::{check_dimension, CostFunction},
    error::Result,
    types::{DVector, Scalar},
};

/// `f(x) = Σ xᵢ²`, minimum 0 at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereFunction;

impl<T: Scalar> CostFunction<T> for SphereFunction {
    fn cost(&self, point: &[T]) -> Result<T> {
        Ok(point.iter().fold(T::zero(), |acc, &x| acc + x * x))
    }
}

/// Generalized Rosenbrock function, minimum 0 at `(1, …, 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosenbrockFunction;

impl<T: Scalar> CostFunction<T> for RosenbrockFunction {
    fn cost(&self, point: &[T]) -> Result<T> {
        let hundred = <T as Scalar>::from_f64(100.0);
        Ok(point.windows(2).fold(T::zero(), |acc, w| {
            let a = T::one() - w[0];
            let b = w[1] - w[0] * w[0];
            acc + a * a + hundred * b * b
        }))
    }
}

/// `f(x) = ½‖x − target‖²`, minimum 0 at `target`.
#[derive(Debug, Clone)]
pub struct ShiftedQuadratic<T: Scalar> {
    /// Location of the minimum
    pub target: DVector<T>,
}

impl<T: Scalar> ShiftedQuadratic<T> {
    /// Creates a quadratic centred on `target`.
    pub fn new(target: DVector<T>) -> Self {
        Self { target }
    }
}

impl<T: Scalar> CostFunction<T> for ShiftedQuadratic<T> {
    fn cost(&self, point: &[T]) -> Result<T> {
        check_dimension(point, self.target.len())?;
        let half = <T as Scalar>::from_f64(0.5);
        Ok(point
            .iter()
            .zip(self.target.iter())
            .fold(T::zero(), |acc, (&x, &t)| acc + (x - t) * (x - t))
            * half)
    }
}

/// `f(x) = x₀`, unbounded below; a simplex chasing it never collapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSlope;

impl<T: Scalar> CostFunction<T> for LinearSlope {
    fn cost(&self, point: &[T]) -> Result<T> {
        Ok(point.first().copied().unwrap_or_else(T::zero))
    }
}

/// `f(x) = 0` everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatFunction;

impl<T: Scalar> CostFunction<T> for FlatFunction {
    fn cost(&self, _point: &[T]) -> Result<T> {
        Ok(T::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere() {
        assert_relative_eq!(SphereFunction.cost(&[3.0, 4.0]).unwrap(), 25.0);
        assert_relative_eq!(SphereFunction.cost(&[0.0_f64; 5]).unwrap(), 0.0);
    }

    #[test]
    fn test_rosenbrock() {
        assert_relative_eq!(RosenbrockFunction.cost(&[1.0, 1.0, 1.0]).unwrap(), 0.0);
        assert_relative_eq!(RosenbrockFunction.cost(&[0.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_shifted_quadratic() {
        let cost_fn = ShiftedQuadratic::new(DVector::from_vec(vec![1.0, 2.0]));
        assert_relative_eq!(cost_fn.cost(&[1.0, 2.0]).unwrap(), 0.0);
        assert_relative_eq!(cost_fn.cost(&[0.0, 0.0]).unwrap(), 2.5);
        assert!(cost_fn.cost(&[0.0]).is_err());
    }

    #[test]
    fn test_linear_and_flat() {
        assert_relative_eq!(LinearSlope.cost(&[-2.0, 7.0]).unwrap(), -2.0);
        assert_relative_eq!(FlatFunction.cost(&[-2.0, 7.0]).unwrap(), 0.0);
    }
}
