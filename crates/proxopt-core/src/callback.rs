//! Callback support for optimization runs.
//!
//! This module provides the trait used to monitor and control the
//! optimization process from user code.

use crate::{
    error::OptimizerResult,
    metadata::IterationRecord,
    types::{Point, Scalar},
};

/// Information passed to callbacks after each iteration.
#[derive(Clone, Debug)]
pub struct CallbackInfo<'a, T: Scalar> {
    /// Current consensus iterate, in the shape of the initial point
    pub theta: &'a Point<T>,

    /// Row just appended to the metadata table
    pub record: &'a IterationRecord<T>,
}

/// Trait for optimization callbacks.
///
/// Callbacks allow monitoring and controlling the optimization process.
/// They can be used for logging, visualization, early stopping, etc.
pub trait OptimizationCallback<T: Scalar>: Send {
    /// Called at the start of optimization.
    fn on_optimization_start(&mut self) -> OptimizerResult<()> {
        Ok(())
    }

    /// Called at the end of each iteration.
    ///
    /// Returns `true` to continue optimization, `false` to stop early.
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        let _ = info;
        Ok(true)
    }

    /// Called at the end of optimization with the final iterate.
    fn on_optimization_end(&mut self, theta: &Point<T>) -> OptimizerResult<()> {
        let _ = theta;
        Ok(())
    }
}

/// A no-op callback that does nothing.
pub struct NoOpCallback;

impl<T: Scalar> OptimizationCallback<T> for NoOpCallback {}

/// Adapts a closure `FnMut(&Point<T>, &IterationRecord<T>)` into a callback
/// that never stops the run.
pub struct FnCallback<F> {
    function: F,
}

impl<F> FnCallback<F> {
    /// Wraps `function`.
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<T, F> OptimizationCallback<T> for FnCallback<F>
where
    T: Scalar,
    F: FnMut(&Point<T>, &IterationRecord<T>) + Send,
{
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        (self.function)(info.theta, info.record);
        Ok(true)
    }
}

/// Stops the run once the primal residual falls below a threshold.
pub struct EarlyStopping<T> {
    threshold: T,
}

impl<T: Scalar> EarlyStopping<T> {
    /// Creates a callback stopping when `primal_residual < threshold`.
    pub fn new(threshold: T) -> Self {
        Self { threshold }
    }
}

impl<T: Scalar> OptimizationCallback<T> for EarlyStopping<T> {
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> OptimizerResult<bool> {
        Ok(info.record.primal_residual >= self.threshold)
    }
}
