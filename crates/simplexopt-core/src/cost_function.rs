//! Cost function interface for optimization algorithms.
//!
//! The simplex method only ever needs the objective value at a point, so the
//! interface is a single `cost` method over a read-only slice. Implementors
//! must be deterministic: the optimizer caches one value per vertex and
//! relies on repeated evaluations agreeing.
//!
//! Closures are adapted with [`FnCost`] (infallible) or [`TryFnCost`]
//! (fallible), and [`CountingCostFunction`] wraps any cost function to
//! record how many times it was evaluated.

use crate::{
    error::{OptimizerError, Result},
    types::{Point, Scalar},
};
use std::cell::Cell;
use std::fmt::{self, Debug};

/// Trait for objective functions minimized by the simplex optimizer.
pub trait CostFunction<T>: Debug
where
    T: Scalar,
{
    /// Evaluates the cost function at a point.
    ///
    /// # Arguments
    ///
    /// * `point` - Coordinates of the point, one entry per dimension
    ///
    /// # Returns
    ///
    /// The cost function value at the point.
    fn cost(&self, point: &[T]) -> Result<T>;

    /// Evaluates the cost function at a vector-valued point.
    fn cost_at(&self, point: &Point<T>) -> Result<T> {
        self.cost(point.as_slice())
    }
}

impl<T, C> CostFunction<T> for &C
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
{
    fn cost(&self, point: &[T]) -> Result<T> {
        (**self).cost(point)
    }
}

/// Adapter turning an infallible closure into a [`CostFunction`].
///
/// ```
/// use simplexopt_core::cost_function::{CostFunction, FnCost};
///
/// let sphere = FnCost::new(|x: &[f64]| -> f64 { x.iter().map(|v| v * v).sum() });
/// assert_eq!(sphere.cost(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
#[derive(Clone)]
pub struct FnCost<F> {
    f: F,
}

impl<F> FnCost<F> {
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Debug for FnCost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCost").finish_non_exhaustive()
    }
}

impl<T, F> CostFunction<T> for FnCost<F>
where
    T: Scalar,
    F: Fn(&[T]) -> T,
{
    fn cost(&self, point: &[T]) -> Result<T> {
        Ok((self.f)(point))
    }
}

/// Adapter turning a fallible closure into a [`CostFunction`].
///
/// Errors returned by the closure abort the optimization run and are
/// propagated to the caller unchanged.
#[derive(Clone)]
pub struct TryFnCost<F> {
    f: F,
}

impl<F> TryFnCost<F> {
    /// Wraps a fallible closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Debug for TryFnCost<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFnCost").finish_non_exhaustive()
    }
}

impl<T, F> CostFunction<T> for TryFnCost<F>
where
    T: Scalar,
    F: Fn(&[T]) -> Result<T>,
{
    fn cost(&self, point: &[T]) -> Result<T> {
        (self.f)(point)
    }
}

/// A wrapper that counts function evaluations.
#[derive(Debug)]
pub struct CountingCostFunction<F> {
    /// The underlying cost function
    pub inner: F,
    cost_count: Cell<usize>,
}

impl<F> CountingCostFunction<F> {
    /// Creates a new counting wrapper around a cost function.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cost_count: Cell::new(0),
        }
    }

    /// Resets the counter to zero.
    pub fn reset_count(&self) {
        self.cost_count.set(0);
    }

    /// Returns the number of evaluations so far.
    pub fn count(&self) -> usize {
        self.cost_count.get()
    }
}

impl<T, F> CostFunction<T> for CountingCostFunction<F>
where
    T: Scalar,
    F: CostFunction<T>,
{
    fn cost(&self, point: &[T]) -> Result<T> {
        self.cost_count.set(self.cost_count.get() + 1);
        self.inner.cost(point)
    }
}

/// Checks that a point has the dimension a cost function expects.
pub fn check_dimension<T: Scalar>(point: &[T], expected: usize) -> Result<()> {
    if point.len() == expected {
        Ok(())
    } else {
        Err(OptimizerError::dimension_mismatch(expected, point.len()))
    }
}
