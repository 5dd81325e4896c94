//! Optimizer configuration.
//!
//! [`OptimizerConfig`] is built once with `with_*` builders and stays
//! read-only for the duration of a run.

use crate::{
    error::{OptimizerError, OptimizerResult},
    types::Scalar,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default iteration cap of `minimize()`.
pub const DEFAULT_MAX_ITER: usize = 50;

/// Amount of progress output written during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Verbosity {
    /// No output.
    #[default]
    Quiet,
    /// One line per iteration.
    Summary,
    /// A table of residuals and penalty values.
    Detailed,
}

impl Verbosity {
    /// Maps the legacy integer display levels (0, 1, 2+) to a verbosity.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Quiet,
            1 => Self::Summary,
            _ => Self::Detailed,
        }
    }
}

/// Adaptive schedule of the ADMM penalty parameter `rho`.
///
/// After each iteration the primal residual `r` and dual residual `s` are
/// compared: if `r > balance * s` the penalty is multiplied by `increase`,
/// if `s > balance * r` it is divided by `decrease`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PenaltySchedule<T> {
    /// Initial penalty value
    pub rho_init: T,
    /// Residual ratio that triggers an update
    pub balance: T,
    /// Multiplicative increase factor
    pub increase: T,
    /// Multiplicative decrease factor
    pub decrease: T,
}

impl<T: Scalar> Default for PenaltySchedule<T> {
    fn default() -> Self {
        Self {
            rho_init: <T as Scalar>::from_f64(10.0),
            balance: <T as Scalar>::from_f64(10.0),
            increase: <T as Scalar>::from_f64(2.0),
            decrease: <T as Scalar>::from_f64(2.0),
        }
    }
}

impl<T: Scalar> PenaltySchedule<T> {
    /// Creates a schedule from `(rho_init, increase, decrease)`, using
    /// `rho_init` as the residual balance as well.
    pub fn from_tau(rho_init: T, increase: T, decrease: T) -> Self {
        Self {
            rho_init,
            balance: rho_init,
            increase,
            decrease,
        }
    }

    /// A schedule that keeps `rho` fixed at `rho`.
    pub fn constant(rho: T) -> Self {
        Self {
            rho_init: rho,
            balance: <T as Scalar>::from_f64(10.0),
            increase: T::one(),
            decrease: T::one(),
        }
    }

    /// Returns the penalty to use after an iteration with the given residuals.
    pub fn next_rho(&self, rho: T, primal_residual: T, dual_residual: T) -> T {
        if primal_residual > self.balance * dual_residual {
            rho * self.increase
        } else if dual_residual > self.balance * primal_residual {
            rho / self.decrease
        } else {
            rho
        }
    }

    fn validate(&self) -> OptimizerResult<()> {
        for (name, value) in [("rho_init", self.rho_init), ("balance", self.balance)] {
            if !value.is_finite() || value <= T::zero() {
                return Err(OptimizerError::invalid_configuration(
                    format!("penalty {name} must be positive and finite"),
                    name,
                    value.to_string(),
                ));
            }
        }
        for (name, value) in [("increase", self.increase), ("decrease", self.decrease)] {
            if !value.is_finite() || value < T::one() {
                return Err(OptimizerError::invalid_configuration(
                    format!("penalty {name} factor must be at least 1"),
                    name,
                    value.to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Configuration of an optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizerConfig<T> {
    /// Maximum number of iterations
    pub max_iter: usize,

    /// Both residuals must drop below this value to declare convergence
    pub tolerance: T,

    /// Penalty parameter schedule
    pub penalty: PenaltySchedule<T>,

    /// Progress output level
    pub verbosity: Verbosity,
}

impl<T: Scalar> Default for OptimizerConfig<T> {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            tolerance: T::DEFAULT_TOLERANCE,
            penalty: PenaltySchedule::default(),
            verbosity: Verbosity::Quiet,
        }
    }
}

impl<T: Scalar> OptimizerConfig<T> {
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the iteration cap.
    #[deprecated(since = "0.1.0", note = "renamed to `with_max_iter`")]
    pub fn with_num_iter(self, num_iter: usize) -> Self {
        self.with_max_iter(num_iter)
    }

    /// Sets the residual tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the penalty schedule.
    pub fn with_penalty(mut self, penalty: PenaltySchedule<T>) -> Self {
        self.penalty = penalty;
        self
    }

    /// Sets the progress output level.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> OptimizerResult<()> {
        if self.max_iter == 0 {
            return Err(OptimizerError::invalid_configuration(
                "max_iter must be positive",
                "max_iter",
                "0",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "tolerance must be positive and finite",
                "tolerance",
                self.tolerance.to_string(),
            ));
        }
        self.penalty.validate()
    }
}
