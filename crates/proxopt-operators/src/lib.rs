//! Proxopt Operators - Built-in proximal operators.
//!
//! This crate implements the penalties that can be registered by name with
//! the ADMM optimizer, together with the registry that resolves names,
//! closures and user types into a single list of operators.
//!
//! | Name            | Penalty                          | Parameters      |
//! |-----------------|----------------------------------|-----------------|
//! | `sparse`        | `gamma * ||x||_1`                | `gamma`         |
//! | `nonneg`        | indicator of `x >= 0`            |                 |
//! | `squared_error` | `0.5 * ||x - x_obs||^2`          | `x_obs`         |
//! | `nucnorm`       | `gamma * ||x||_*`                | `gamma`         |
//! | `smooth`        | `gamma / 2 * x^T L x`            | `gamma`         |
//! | `tvd`           | `gamma * TV(x)`                  | `gamma`         |
//! | `linsys`        | `0.5 * x^T P x - q^T x`          | `P`, `q`        |
//! | `poissreg`      | Poisson negative log-likelihood  | `x`, `y`        |

pub mod bfgs;
pub mod linsys;
pub mod nonneg;
pub mod nucnorm;
pub mod params;
pub mod registry;
pub mod smooth;
pub mod sparse;
pub mod squared_error;
pub mod tvd;

// Re-export main operators for convenience
pub use bfgs::{BfgsSettings, SmoothProx};
pub use linsys::LinearSystem;
pub use nonneg::NonNegative;
pub use nucnorm::NuclearNorm;
pub use params::RegularizerParams;
pub use registry::{builtin, Regularizer, RegularizerRegistry, BUILTIN_NAMES};
pub use smooth::LaplacianSmoothing;
pub use sparse::{soft_threshold, Sparse};
pub use squared_error::SquaredError;
pub use tvd::{TotalVariation, TvSettings};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        builtin, soft_threshold, BfgsSettings, LaplacianSmoothing, LinearSystem, NonNegative,
        NuclearNorm, Regularizer, RegularizerParams, RegularizerRegistry, SmoothProx, Sparse,
        SquaredError, TotalVariation, TvSettings, BUILTIN_NAMES,
    };
}
