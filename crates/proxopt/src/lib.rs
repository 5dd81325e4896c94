//! Proximal optimization with consensus ADMM.
//!
//! `proxopt` minimizes sums of terms that are each described by their
//! proximal operator. Terms are registered through a single entry point,
//! either by the name of a built-in penalty or as a user-supplied function,
//! and every run produces a table with one row of convergence metadata per
//! iteration.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`proxopt_core`]: scalar and point types, errors, configuration, metadata
//! - [`proxopt_operators`]: built-in proximal operators and the registry
//! - [`proxopt_optim`]: the ADMM optimizer
//!
//! # Example
//!
//! ```rust
//! use proxopt::prelude::*;
//!
//! let x_obs = column(&[2.0, -0.1, 0.4, -3.0]);
//! let config = OptimizerConfig::new().with_max_iter(500).with_tolerance(1e-6);
//! let mut optimizer = Optimizer::new(config)
//!     .with_objective(Regularizer::named(
//!         "squared_error",
//!         RegularizerParams::new().with_matrix("x_obs", x_obs.clone()),
//!     ))?;
//! optimizer.add_regularizer(Regularizer::named("sparse", RegularizerParams::with_gamma(0.5)))?;
//!
//! let result = optimizer.minimize(&DMatrix::zeros(4, 1))?;
//! let lasso = soft_threshold(&x_obs, 0.5);
//! assert!((result.theta - lasso).amax() < 1e-3);
//! # Ok::<(), OptimizerError>(())
//! ```

pub use nalgebra;

pub use proxopt_core;
pub use proxopt_operators;
pub use proxopt_optim;

pub use proxopt_operators::{Regularizer, RegularizerParams, RegularizerRegistry};
pub use proxopt_optim::Optimizer;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use proxopt::prelude::*;
/// ```
pub mod prelude {
    pub use proxopt_core::prelude::*;
    pub use proxopt_operators::prelude::*;
    pub use proxopt_optim::Optimizer;
}
