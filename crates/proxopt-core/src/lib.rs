//! Core traits and types for proximal optimization.
//!
//! This crate provides the foundational pieces shared by the operator library
//! and the ADMM optimizer: the scalar and point types, the proximal operator
//! interface, configuration, error types and the per-iteration metadata
//! table together with its progress reporter.
//!
//! # Modules
//!
//! - [`callback`]: Hooks invoked after every iteration
//! - [`config`]: Optimizer configuration and penalty schedule
//! - [`error`]: Error types for operators and optimization runs
//! - [`metadata`]: Per-iteration metadata table and its tracker
//! - [`operator`]: The `ProximalOperator` trait
//! - [`optimizer`]: Result and termination types
//! - [`reporter`]: Console progress output
//! - [`types`]: Scalar trait and matrix aliases

pub mod callback;
pub mod config;
pub mod error;
pub mod metadata;
pub mod operator;
pub mod optimizer;
pub mod reporter;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, OptimizerResult, ProximalError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use proxopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callback::{
        CallbackInfo, EarlyStopping, FnCallback, NoOpCallback, OptimizationCallback,
    };
    pub use crate::config::{OptimizerConfig, PenaltySchedule, Verbosity, DEFAULT_MAX_ITER};
    pub use crate::error::{OptimizerError, OptimizerResult, ProximalError, Result};
    pub use crate::metadata::{ConvergenceTracker, IterationRecord, MetadataTable};
    pub use crate::operator::{FunctionOperator, ProxFn, ProximalOperator};
    pub use crate::optimizer::{OptimizationResult, TerminationReason};
    pub use crate::reporter::ProgressReporter;
    pub use crate::types::{column, DMatrix, DVector, Point, Scalar};
}
