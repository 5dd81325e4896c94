//! Proxopt Optimization - Consensus ADMM over proximal operators.
//!
//! This crate provides the [`Optimizer`], which minimizes a sum of terms
//! registered by name, closure or operator type, and records one row of
//! metadata per iteration.
//!
//! # Examples
//!
//! ```rust
//! use proxopt_core::{config::OptimizerConfig, types::column};
//! use proxopt_operators::{soft_threshold, Regularizer};
//! use proxopt_optim::Optimizer;
//!
//! let mut optimizer = Optimizer::new(OptimizerConfig::new().with_max_iter(200));
//! optimizer.add_regularizer("nonneg").unwrap();
//! optimizer
//!     .add_regularizer(Regularizer::function(|x: &proxopt_core::types::Point<f64>, rho: f64| {
//!         soft_threshold(x, 0.5 / rho)
//!     }))
//!     .unwrap();
//!
//! let result = optimizer.minimize(&column(&[1.0, -2.0, 3.0])).unwrap();
//! assert!(result.theta.iter().all(|v| *v >= -1e-2));
//! ```

pub mod admm;

pub use admm::Optimizer;

// Re-export commonly used items from core
pub use proxopt_core::{
    callback::{CallbackInfo, EarlyStopping, FnCallback, OptimizationCallback},
    config::{OptimizerConfig, PenaltySchedule, Verbosity},
    optimizer::{OptimizationResult, TerminationReason},
    reporter::ProgressReporter,
};
