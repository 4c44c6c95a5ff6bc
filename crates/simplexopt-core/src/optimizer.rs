//! Core optimizer types for simplex optimization.
//!
//! This module provides the structures shared by the driver and its
//! callers: the result of a run, the reasons a run may stop, the stopping
//! criteria themselves, and the per-run bookkeeping consulted by the
//! convergence checker.
//!
//! # Key Components
//!
//! - **OptimizationResult**: Encapsulates the result of an optimization run
//! - **StoppingCriterion**: Iteration cap, spread tolerance and optional budgets
//! - **ConvergenceChecker**: Logic for checking termination conditions
//! - **Optimizer**: Interface shared by optimization drivers

use crate::{
    cost_function::CostFunction,
    error::Result,
    types::{constants, Point, Scalar},
};
use std::fmt::Debug;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of an optimization run.
///
/// Contains the best point, its objective value, and metadata about the
/// optimization process. A run that hits its iteration cap still produces a
/// result, with `converged` set to `false`.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The best point found by the optimizer
    pub point: Point<T>,

    /// The objective value at the best point
    pub value: T,

    /// Number of iterations performed
    pub iterations: usize,

    /// Number of function evaluations
    pub function_evaluations: usize,

    /// L2 distance between the best and worst vertices at termination
    pub spread: T,

    /// Total optimization time
    pub duration: Duration,

    /// Reason for termination
    pub termination_reason: TerminationReason,

    /// Whether the optimization converged successfully
    pub converged: bool,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        point: Point<T>,
        value: T,
        iterations: usize,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        let converged = matches!(termination_reason, TerminationReason::Converged);

        Self {
            point,
            value,
            iterations,
            function_evaluations: 0,
            spread: T::zero(),
            duration,
            termination_reason,
            converged,
        }
    }

    /// Sets the function evaluation count.
    pub fn with_function_evaluations(mut self, count: usize) -> Self {
        self.function_evaluations = count;
        self
    }

    /// Sets the final simplex spread.
    pub fn with_spread(mut self, spread: T) -> Self {
        self.spread = spread;
        self
    }

    /// Returns the coordinates of the best point as a plain vector.
    pub fn into_vec(self) -> Vec<T> {
        self.point.as_slice().to_vec()
    }
}

/// Reason for termination of the optimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// The simplex collapsed below the spread tolerance
    Converged,
    /// Maximum iterations reached
    MaxIterations,
    /// Maximum time exceeded
    MaxTime,
    /// Maximum function evaluations reached
    MaxFunctionEvaluations,
    /// User requested termination
    UserTerminated,
}

impl TerminationReason {
    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Converged => "simplex spread below tolerance",
            Self::MaxIterations => "iteration cap reached",
            Self::MaxTime => "time budget exhausted",
            Self::MaxFunctionEvaluations => "evaluation budget exhausted",
            Self::UserTerminated => "terminated by callback",
        }
    }
}

/// Stopping criteria for the simplex driver.
///
/// The defaults reproduce the classic fixed limits: one million iterations
/// and a best-to-worst spread of `1e-8` (for `f64`).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StoppingCriterion<T>
where
    T: Scalar,
{
    /// Hard iteration cap
    pub max_iterations: usize,

    /// Spread below which the simplex is considered converged
    pub spread_tolerance: T,

    /// Maximum number of function evaluations
    pub max_function_evaluations: Option<usize>,

    /// Maximum optimization time
    pub max_time: Option<Duration>,
}

impl<T> Default for StoppingCriterion<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: constants::DEFAULT_MAX_ITERATIONS,
            spread_tolerance: constants::spread_tolerance(),
            max_function_evaluations: None,
            max_time: None,
        }
    }
}

impl<T> StoppingCriterion<T>
where
    T: Scalar,
{
    /// Creates a new stopping criterion with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Sets the spread tolerance.
    pub fn with_spread_tolerance(mut self, tol: T) -> Self {
        self.spread_tolerance = tol;
        self
    }

    /// Sets the maximum number of function evaluations.
    pub fn with_max_function_evaluations(mut self, max_evals: usize) -> Self {
        self.max_function_evaluations = Some(max_evals);
        self
    }

    /// Sets the maximum optimization time.
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }
}

/// Bookkeeping for a single optimization run.
#[derive(Debug, Clone)]
pub struct OptimizerState<T>
where
    T: Scalar,
{
    /// Objective value of the current best vertex
    pub best_value: T,

    /// Current best-to-worst spread
    pub spread: T,

    /// Number of completed iterations
    pub iteration: usize,

    /// Number of function evaluations so far
    pub function_evaluations: usize,

    /// Start time of optimization
    pub start_time: Instant,
}

impl<T> OptimizerState<T>
where
    T: Scalar,
{
    /// Creates the state of a run whose initial simplex cost `evaluations`.
    pub fn new(best_value: T, spread: T, evaluations: usize) -> Self {
        Self {
            best_value,
            spread,
            iteration: 0,
            function_evaluations: evaluations,
            start_time: Instant::now(),
        }
    }

    /// Records a completed iteration.
    pub fn update(&mut self, best_value: T, spread: T, evaluations: usize) {
        self.best_value = best_value;
        self.spread = spread;
        self.iteration += 1;
        self.function_evaluations += evaluations;
    }

    /// Gets the elapsed time since optimization started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Convergence checker for the simplex driver.
pub struct ConvergenceChecker;

impl ConvergenceChecker {
    /// Checks if any stopping criterion has been met.
    ///
    /// The spread test runs first so that a simplex which collapses on the
    /// last permitted iteration is still reported as converged.
    ///
    /// # Returns
    ///
    /// The termination reason if any criterion is met, otherwise None.
    pub fn check<T>(
        state: &OptimizerState<T>,
        criterion: &StoppingCriterion<T>,
    ) -> Option<TerminationReason>
    where
        T: Scalar,
    {
        if state.iteration > 0 && state.spread < criterion.spread_tolerance {
            return Some(TerminationReason::Converged);
        }

        if state.iteration >= criterion.max_iterations {
            return Some(TerminationReason::MaxIterations);
        }

        if let Some(max_evals) = criterion.max_function_evaluations {
            if state.function_evaluations >= max_evals {
                return Some(TerminationReason::MaxFunctionEvaluations);
            }
        }

        if let Some(max_time) = criterion.max_time {
            if state.elapsed() >= max_time {
                return Some(TerminationReason::MaxTime);
            }
        }

        None
    }
}

/// Trait for optimization drivers.
pub trait Optimizer<T>: Debug
where
    T: Scalar,
{
    /// Human-readable name of the algorithm, used in logs.
    fn name(&self) -> &str;

    /// Minimizes `cost_fn` starting around `initial_point`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, a mismatched initial
    /// point, or a failing cost function. Hitting a stopping criterion other
    /// than convergence is not an error.
    fn optimize<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &Point<T>,
        stopping_criterion: &StoppingCriterion<T>,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T>;
}
