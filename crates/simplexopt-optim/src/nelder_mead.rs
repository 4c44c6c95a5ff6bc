//! Nelder-Mead simplex optimizer.
//!
//! The driver owns no geometry of its own: it orders a [`Simplex`], asks it
//! for a reflected candidate and classifies that candidate against the best,
//! second-worst and worst vertices. Exactly one move is applied per
//! iteration:
//!
//! | condition | move |
//! |---|---|
//! | `f_best ≤ f(xr) < f_second_worst` | accept `xr` |
//! | `f(xr) < f_best` | expand; keep the better of `xe` and `xr` |
//! | `f_second_worst ≤ f(xr) < f_worst` | outside contraction, else shrink |
//! | `f(xr) ≥ f_worst` | inside contraction, else shrink |
//!
//! After every move the simplex is re-ordered and the best-to-worst spread is
//! compared against the [`StoppingCriterion`].
//!
//! # Example
//!
//! ```rust
//! use simplexopt_core::{cost_function::FnCost, optimizer::StoppingCriterion, types::DVector};
//! use simplexopt_optim::{NelderMead, NelderMeadConfig};
//!
//! let sphere = FnCost::new(|x: &[f64]| -> f64 { x.iter().map(|v| v * v).sum() });
//! let mut optimizer = NelderMead::new(NelderMeadConfig::new().with_seed(42));
//! let result = optimizer
//!     .optimize(&sphere, &DVector::zeros(2), &StoppingCriterion::new())
//!     .unwrap();
//! assert!(result.converged);
//! assert!(result.point.norm() < 1e-4);
//! ```

use crate::simplex::{Coefficients, ContractionKind, ShrinkAnchor, Simplex, Vertex};
use rand::{rngs::StdRng, SeedableRng};
use simplexopt_core::{
    callback::{CallbackInfo, NoOpCallback, OptimizationCallback},
    cost_function::{CostFunction, CountingCostFunction},
    error::{OptimizerError, Result},
    optimizer::{
        ConvergenceChecker, OptimizationResult, Optimizer, OptimizerState, StoppingCriterion,
        TerminationReason,
    },
    types::{constants, Point, Scalar},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The move applied by a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplexMove {
    /// The reflected point replaced the worst vertex
    Reflection,
    /// The expanded point replaced the worst vertex
    Expansion,
    /// The outside contraction replaced the worst vertex
    OutsideContraction,
    /// The inside contraction replaced the worst vertex
    InsideContraction,
    /// Every non-anchor vertex moved toward the anchor
    Shrink,
}

/// How often each move was applied during the last run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveCounts {
    /// Accepted reflections, including rejected expansions
    pub reflections: usize,
    /// Accepted expansions
    pub expansions: usize,
    /// Accepted outside contractions
    pub outside_contractions: usize,
    /// Accepted inside contractions
    pub inside_contractions: usize,
    /// Shrinks
    pub shrinks: usize,
}

impl MoveCounts {
    /// Counts one application of `applied`.
    pub fn record(&mut self, applied: SimplexMove) {
        match applied {
            SimplexMove::Reflection => self.reflections += 1,
            SimplexMove::Expansion => self.expansions += 1,
            SimplexMove::OutsideContraction => self.outside_contractions += 1,
            SimplexMove::InsideContraction => self.inside_contractions += 1,
            SimplexMove::Shrink => self.shrinks += 1,
        }
    }

    /// Total number of moves, one per iteration.
    pub fn total(&self) -> usize {
        self.reflections
            + self.expansions
            + self.outside_contractions
            + self.inside_contractions
            + self.shrinks
    }
}

/// Configuration for the Nelder-Mead optimizer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NelderMeadConfig<T>
where
    T: Scalar,
{
    /// Reflection, expansion, contraction and shrink coefficients
    pub coefficients: Coefficients<T>,

    /// Vertex the simplex shrinks toward
    pub shrink_anchor: ShrinkAnchor,

    /// Half-width of the uniform perturbation around the initial point
    pub initial_spread: T,

    /// Seed for the initial simplex; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl<T> Default for NelderMeadConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            coefficients: Coefficients::default(),
            shrink_anchor: ShrinkAnchor::default(),
            initial_spread: constants::initial_spread(),
            seed: None,
        }
    }
}

impl<T> NelderMeadConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all four coefficients.
    pub fn with_coefficients(mut self, coefficients: Coefficients<T>) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Sets the reflection coefficient α.
    pub fn with_reflection(mut self, reflection: T) -> Self {
        self.coefficients.reflection = reflection;
        self
    }

    /// Sets the expansion coefficient γ.
    pub fn with_expansion(mut self, expansion: T) -> Self {
        self.coefficients.expansion = expansion;
        self
    }

    /// Sets the contraction coefficient ρ.
    pub fn with_contraction(mut self, contraction: T) -> Self {
        self.coefficients.contraction = contraction;
        self
    }

    /// Sets the shrink coefficient σ.
    pub fn with_shrink(mut self, shrink: T) -> Self {
        self.coefficients.shrink = shrink;
        self
    }

    /// Sets the shrink anchor.
    pub fn with_shrink_anchor(mut self, anchor: ShrinkAnchor) -> Self {
        self.shrink_anchor = anchor;
        self
    }

    /// Sets the half-width of the initial perturbation.
    pub fn with_initial_spread(mut self, spread: T) -> Self {
        self.initial_spread = spread;
        self
    }

    /// Fixes the seed of the initial simplex.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the coefficients and the initial spread.
    pub fn validate(&self) -> Result<()> {
        self.coefficients.validate()?;
        let spread = self.initial_spread;
        if !num_traits::Float::is_finite(spread) || spread <= T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "must be positive and finite",
                "initial_spread",
                spread.to_string(),
            ));
        }
        Ok(())
    }
}

/// Nelder-Mead simplex optimizer.
#[derive(Debug)]
pub struct NelderMead<T>
where
    T: Scalar,
{
    config: NelderMeadConfig<T>,
    move_counts: MoveCounts,
}

impl<T> Default for NelderMead<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::new(NelderMeadConfig::default())
    }
}

impl<T> NelderMead<T>
where
    T: Scalar,
{
    /// Creates a new optimizer with the given configuration.
    pub fn new(config: NelderMeadConfig<T>) -> Self {
        Self {
            config,
            move_counts: MoveCounts::default(),
        }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &NelderMeadConfig<T> {
        &self.config
    }

    /// Returns the optimizer name.
    pub fn name(&self) -> &str {
        "Nelder-Mead"
    }

    /// Moves applied since the last run started.
    pub fn move_counts(&self) -> &MoveCounts {
        &self.move_counts
    }

    /// Builds the random starting simplex around `initial_point`.
    pub fn initial_simplex<C>(&self, cost_fn: &C, initial_point: &Point<T>) -> Result<Simplex<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        self.config.validate()?;
        if initial_point.is_empty() {
            return Err(OptimizerError::invalid_configuration(
                "a simplex needs at least one dimension",
                "dimension",
                "0",
            ));
        }

        let coefficients = self.config.coefficients;
        let spread = self.config.initial_spread;
        match self.config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Simplex::random(initial_point, spread, coefficients, cost_fn, &mut rng)
            }
            None => Simplex::random(
                initial_point,
                spread,
                coefficients,
                cost_fn,
                &mut rand::thread_rng(),
            ),
        }
    }

    /// Performs a single iteration on `simplex` and reports the move applied.
    ///
    /// The simplex is ordered first, so any simplex may be passed in. It is
    /// left unordered afterwards.
    pub fn step<C>(&mut self, simplex: &mut Simplex<T>, cost_fn: &C) -> Result<SimplexMove>
    where
        C: CostFunction<T> + ?Sized,
    {
        simplex.order();
        let f_best = simplex.best().value;
        let f_second_worst = simplex.second_worst().value;
        let f_worst = simplex.worst().value;

        let reflected = Vertex::evaluate(simplex.reflection()?, cost_fn)?;
        let f_xr = reflected.value;

        let applied = if f_best <= f_xr && f_xr < f_second_worst {
            simplex.replace_worst(reflected)?;
            SimplexMove::Reflection
        } else if f_xr < f_best {
            let expanded = Vertex::evaluate(simplex.expansion(&reflected.point)?, cost_fn)?;
            if expanded.value < f_xr {
                simplex.replace_worst(expanded)?;
                SimplexMove::Expansion
            } else {
                simplex.replace_worst(reflected)?;
                SimplexMove::Reflection
            }
        } else if f_xr < f_worst {
            let contracted = Vertex::evaluate(
                simplex.contraction(&reflected.point, ContractionKind::Outside)?,
                cost_fn,
            )?;
            if contracted.value < f_xr {
                simplex.replace_worst(contracted)?;
                SimplexMove::OutsideContraction
            } else {
                simplex.shrink(self.config.shrink_anchor, cost_fn)?;
                SimplexMove::Shrink
            }
        } else {
            let contracted = Vertex::evaluate(
                simplex.contraction(&reflected.point, ContractionKind::Inside)?,
                cost_fn,
            )?;
            if contracted.value < f_worst {
                simplex.replace_worst(contracted)?;
                SimplexMove::InsideContraction
            } else {
                simplex.shrink(self.config.shrink_anchor, cost_fn)?;
                SimplexMove::Shrink
            }
        };

        self.move_counts.record(applied);
        Ok(applied)
    }

    /// Optimizes the given cost function from a random simplex.
    ///
    /// # Arguments
    ///
    /// * `cost_fn` - The cost function to minimize
    /// * `initial_point` - Center of the initial simplex; its length fixes `d`
    /// * `stopping_criterion` - Conditions for terminating optimization
    ///
    /// # Returns
    ///
    /// An `OptimizationResult` containing the best vertex and metadata.
    pub fn optimize<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &Point<T>,
        stopping_criterion: &StoppingCriterion<T>,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        self.optimize_with_callback(cost_fn, initial_point, stopping_criterion, &mut NoOpCallback)
    }

    /// Same as [`NelderMead::optimize`], reporting every iteration to `callback`.
    pub fn optimize_with_callback<C, CB>(
        &mut self,
        cost_fn: &C,
        initial_point: &Point<T>,
        stopping_criterion: &StoppingCriterion<T>,
        callback: &mut CB,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
        CB: OptimizationCallback<T> + ?Sized,
    {
        let simplex = self.initial_simplex(cost_fn, initial_point)?;
        self.optimize_simplex(simplex, cost_fn, stopping_criterion, callback)
    }

    /// Runs the optimizer from an already evaluated simplex.
    ///
    /// The `d + 1` evaluations that built `simplex` are included in the
    /// reported evaluation count.
    pub fn optimize_simplex<C, CB>(
        &mut self,
        mut simplex: Simplex<T>,
        cost_fn: &C,
        stopping_criterion: &StoppingCriterion<T>,
        callback: &mut CB,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
        CB: OptimizationCallback<T> + ?Sized,
    {
        let counting = CountingCostFunction::new(cost_fn);
        self.move_counts = MoveCounts::default();

        callback.on_optimization_start()?;

        simplex.order();
        let mut state = OptimizerState::new(simplex.best().value, simplex.spread(), simplex.len());
        tracing::debug!(
            "Starting {} in {} dimensions (initial best = {}, spread = {})",
            self.name(),
            simplex.dimension(),
            state.best_value,
            state.spread
        );

        let mut keep_going = true;
        let termination = loop {
            if let Some(reason) = ConvergenceChecker::check(&state, stopping_criterion) {
                break reason;
            }
            if !keep_going {
                break TerminationReason::UserTerminated;
            }

            let before = counting.count();
            let applied = self.step(&mut simplex, &counting)?;
            simplex.order();
            state.update(
                simplex.best().value,
                simplex.spread(),
                counting.count() - before,
            );
            tracing::trace!(
                "Iteration {}: {:?}, best = {}, spread = {}",
                state.iteration,
                applied,
                state.best_value,
                state.spread
            );

            let info = CallbackInfo {
                iteration: state.iteration,
                best_point: &simplex.best().point,
                best_value: state.best_value,
                spread: state.spread,
                function_evaluations: state.function_evaluations,
                elapsed: state.elapsed(),
            };
            keep_going = callback.on_iteration_end(&info)?;
        };

        match termination {
            TerminationReason::Converged => tracing::info!(
                "{} converged after {} iterations (best = {}, spread = {})",
                self.name(),
                state.iteration,
                state.best_value,
                state.spread
            ),
            TerminationReason::UserTerminated => tracing::info!(
                "{} stopped by callback after {} iterations",
                self.name(),
                state.iteration
            ),
            reason => tracing::warn!(
                "{} did not converge: {} after {} iterations (spread = {})",
                self.name(),
                reason.description(),
                state.iteration,
                state.spread
            ),
        }

        let best = simplex.best();
        let info = CallbackInfo {
            iteration: state.iteration,
            best_point: &best.point,
            best_value: best.value,
            spread: state.spread,
            function_evaluations: state.function_evaluations,
            elapsed: state.elapsed(),
        };
        callback.on_optimization_end(&info)?;

        Ok(OptimizationResult::new(
            best.point.clone(),
            best.value,
            state.iteration,
            state.elapsed(),
            termination,
        )
        .with_function_evaluations(state.function_evaluations)
        .with_spread(state.spread))
    }
}

impl<T> Optimizer<T> for NelderMead<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        NelderMead::name(self)
    }

    fn optimize<C>(
        &mut self,
        cost_fn: &C,
        initial_point: &Point<T>,
        stopping_criterion: &StoppingCriterion<T>,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T>,
    {
        NelderMead::optimize(self, cost_fn, initial_point, stopping_criterion)
    }
}
