//! Callback support for optimization algorithms.
//!
//! Callbacks observe a run once per iteration and may stop it early. They
//! never influence which geometric move the driver picks.

use crate::{
    error::Result,
    types::{Point, Scalar},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Information passed to callbacks during optimization.
#[derive(Clone, Debug)]
pub struct CallbackInfo<'a, T: Scalar> {
    /// Number of completed iterations
    pub iteration: usize,

    /// Current best vertex
    pub best_point: &'a Point<T>,

    /// Objective value at the best vertex
    pub best_value: T,

    /// Best-to-worst spread of the simplex
    pub spread: T,

    /// Number of function evaluations so far
    pub function_evaluations: usize,

    /// Elapsed time since optimization start
    pub elapsed: Duration,
}

/// Trait for optimization callbacks.
///
/// Callbacks allow monitoring and controlling the optimization process.
/// They can be used for logging, early stopping or cancellation.
pub trait OptimizationCallback<T: Scalar> {
    /// Called at the start of optimization.
    fn on_optimization_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called at the end of each iteration.
    ///
    /// Returns `true` to continue optimization, `false` to stop early.
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<bool> {
        let _ = info;
        Ok(true)
    }

    /// Called at the end of optimization.
    fn on_optimization_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<()> {
        let _ = info;
        Ok(())
    }
}

/// A no-op callback that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCallback;

impl<T: Scalar> OptimizationCallback<T> for NoOpCallback {}

/// A callback that logs progress through `tracing`.
#[derive(Debug, Clone)]
pub struct LogProgressCallback {
    log_every: usize,
}

impl LogProgressCallback {
    /// Create a callback logging every `log_every` iterations.
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }
}

impl<T: Scalar> OptimizationCallback<T> for LogProgressCallback {
    fn on_optimization_start(&mut self) -> Result<()> {
        tracing::info!("Starting Nelder-Mead optimization");
        Ok(())
    }

    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<bool> {
        if info.iteration % self.log_every == 0 {
            tracing::info!(
                "Iteration {}: best = {}, spread = {}, evaluations = {}",
                info.iteration,
                info.best_value,
                info.spread,
                info.function_evaluations
            );
        }
        Ok(true)
    }

    fn on_optimization_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<()> {
        tracing::info!(
            "Optimization complete after {} iterations ({:.2?}). Final cost: {}",
            info.iteration,
            info.elapsed,
            info.best_value
        );
        Ok(())
    }
}

/// A callback that stops the run once a shared flag is raised.
///
/// The flag can be cloned into another thread or a signal handler; the
/// driver checks it once per iteration.
#[derive(Debug, Clone, Default)]
pub struct CancellationCallback {
    cancelled: Arc<AtomicBool>,
}

impl CancellationCallback {
    /// Creates a callback with a fresh, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a callback observing an existing flag.
    pub fn from_flag(cancelled: Arc<AtomicBool>) -> Self {
        Self { cancelled }
    }

    /// Returns a handle to the underlying flag.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl<T: Scalar> OptimizationCallback<T> for CancellationCallback {
    fn on_iteration_end(&mut self, _info: &CallbackInfo<'_, T>) -> Result<bool> {
        Ok(!self.is_cancelled())
    }
}

impl<T, C> OptimizationCallback<T> for &mut C
where
    T: Scalar,
    C: OptimizationCallback<T> + ?Sized,
{
    fn on_optimization_start(&mut self) -> Result<()> {
        (**self).on_optimization_start()
    }

    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<bool> {
        (**self).on_iteration_end(info)
    }

    fn on_optimization_end(&mut self, info: &CallbackInfo<'_, T>) -> Result<()> {
        (**self).on_optimization_end(info)
    }
}
