//! Outcome types of an optimization run.
//!
//! # Termination
//!
//! A run stops for exactly one of the reasons in [`TerminationReason`]:
//!
//! - **Converged**: both ADMM residuals fell below the tolerance
//! - **MaxIterations**: the iteration budget was exhausted
//! - **CallbackRequest**: a callback asked to stop early

use crate::{
    metadata::MetadataTable,
    types::{Point, Scalar},
};
use std::time::Duration;

/// Reasons for an optimization run to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Primal and dual residuals are both below the tolerance
    Converged,
    /// Maximum iteration count exhausted without convergence
    MaxIterations,
    /// Progress callback requested early termination
    CallbackRequest,
}

/// Result of a `minimize()` run.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// Final consensus iterate, in the shape of the initial point
    pub theta: Point<T>,

    /// One row per iteration performed
    pub metadata: MetadataTable<T>,

    /// Number of iterations performed
    pub iterations: usize,

    /// Wall-clock time of the run
    pub duration: Duration,

    /// Why the run stopped
    pub termination_reason: TerminationReason,

    /// True if the residual tolerance was met
    pub converged: bool,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a new optimization result.
    pub fn new(
        theta: Point<T>,
        metadata: MetadataTable<T>,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            theta,
            iterations: metadata.len(),
            metadata,
            duration,
            termination_reason,
            converged: termination_reason == TerminationReason::Converged,
        }
    }

    /// Splits the result into the solution and its metadata table.
    pub fn into_parts(self) -> (Point<T>, MetadataTable<T>) {
        (self.theta, self.metadata)
    }
}
