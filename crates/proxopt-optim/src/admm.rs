//! Consensus ADMM over a sum of proximal operators.
//!
//! The optimizer minimizes `f_1(x) + ... + f_N(x)` where every term is only
//! accessed through its proximal operator. Each term keeps a primal copy
//! `x_i` and a scaled dual `u_i`; the consensus iterate `z` is their average.
//!
//! # Algorithm Overview
//!
//! One iteration with penalty `rho` performs:
//! 1. `x_i = prox_i(z - u_i, rho)` for every registered term
//! 2. `z = mean(x_i)`
//! 3. `u_i += x_i - z`
//! 4. primal residual `r = sum ||x_i - z||` and dual residual
//!    `s = rho * sqrt(N) * ||z - z_prev||`
//! 5. penalty adaptation from the residual balance, rescaling the duals
//!    whenever `rho` changes
//!
//! The run stops once both residuals are below the tolerance, when the
//! iteration cap is reached, or when a callback asks to stop.
//!
//! # Example
//!
//! ```
//! use proxopt_core::{config::OptimizerConfig, types::column};
//! use proxopt_operators::{Regularizer, RegularizerParams};
//! use proxopt_optim::Optimizer;
//!
//! let x_obs = column(&[3.0, -0.2, 0.5]);
//! let mut optimizer = Optimizer::new(OptimizerConfig::new())
//!     .with_objective(Regularizer::named(
//!         "squared_error",
//!         RegularizerParams::new().with_matrix("x_obs", x_obs.clone()),
//!     ))
//!     .unwrap();
//! optimizer
//!     .add_regularizer(Regularizer::named("sparse", RegularizerParams::with_gamma(0.3)))
//!     .unwrap();
//!
//! let result = optimizer.minimize(&column(&[0.0, 0.0, 0.0])).unwrap();
//! assert!(result.iterations <= 50);
//! assert_eq!(optimizer.metadata().map(|m| m.len()), Some(result.iterations));
//! ```

use proxopt_core::{
    callback::{CallbackInfo, NoOpCallback, OptimizationCallback},
    config::OptimizerConfig,
    error::{OptimizerError, OptimizerResult, ProximalError},
    metadata::{ConvergenceTracker, MetadataTable},
    operator::ProximalOperator,
    optimizer::{OptimizationResult, TerminationReason},
    reporter::ProgressReporter,
    types::{Point, Scalar},
};
use proxopt_operators::{Regularizer, RegularizerRegistry};
use std::fmt;
use std::time::Instant;

/// Outcome of the last run, kept for inspection after `minimize()`.
#[derive(Debug, Clone)]
struct RunState<T: Scalar> {
    theta: Point<T>,
    metadata: MetadataTable<T>,
    converged: bool,
}

/// Consensus ADMM optimizer.
pub struct Optimizer<T: Scalar> {
    config: OptimizerConfig<T>,
    registry: RegularizerRegistry<T>,
    callback: Box<dyn OptimizationCallback<T>>,
    reporter: Option<ProgressReporter>,
    state: Option<RunState<T>>,
}

impl<T: Scalar> fmt::Debug for Optimizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("config", &self.config)
            .field("terms", &self.registry.identifiers())
            .field("reporter", &self.reporter)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> Default for Optimizer<T> {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl<T: Scalar> Optimizer<T> {
    /// Creates an optimizer without any term.
    pub fn new(config: OptimizerConfig<T>) -> Self {
        Self {
            config,
            registry: RegularizerRegistry::new(),
            callback: Box::new(NoOpCallback),
            reporter: None,
            state: None,
        }
    }

    /// Registers the objective term.
    ///
    /// The objective is an ordinary term of the sum; registering it first
    /// makes it the first column of every average.
    pub fn with_objective<R: Into<Regularizer<T>>>(
        mut self,
        objective: R,
    ) -> OptimizerResult<Self> {
        self.registry.add(objective.into())?;
        Ok(self)
    }

    /// Registers a regularizer given by name, closure or operator type.
    ///
    /// An identifier that is already registered is replaced in place.
    pub fn add_regularizer<R: Into<Regularizer<T>>>(
        &mut self,
        regularizer: R,
    ) -> OptimizerResult<&mut Self> {
        self.registry.add(regularizer.into())?;
        Ok(self)
    }

    /// Installs a callback invoked after every iteration.
    pub fn set_callback<C: OptimizationCallback<T> + 'static>(&mut self, callback: C) -> &mut Self {
        self.callback = Box::new(callback);
        self
    }

    /// Installs a progress reporter, replacing the stdout reporter built
    /// from the configured verbosity.
    pub fn set_reporter(&mut self, reporter: ProgressReporter) -> &mut Self {
        self.reporter = Some(reporter);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &OptimizerConfig<T> {
        &self.config
    }

    /// Registered terms.
    pub fn registry(&self) -> &RegularizerRegistry<T> {
        &self.registry
    }

    /// Metadata table of the last run.
    pub fn metadata(&self) -> Option<&MetadataTable<T>> {
        self.state.as_ref().map(|s| &s.metadata)
    }

    /// Solution of the last run.
    pub fn theta(&self) -> Option<&Point<T>> {
        self.state.as_ref().map(|s| &s.theta)
    }

    /// Whether the last run met the tolerance.
    pub fn converged(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.converged)
    }

    /// Drops every registered term and the state of the last run.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.state = None;
    }

    /// Runs ADMM from `theta_init` with the configured iteration cap and
    /// tolerance.
    pub fn minimize(&mut self, theta_init: &Point<T>) -> OptimizerResult<OptimizationResult<T>> {
        let config = self.config.clone();
        self.run_with(theta_init, &config)
    }

    /// Runs ADMM from `theta_init`, overriding the iteration cap and
    /// tolerance for this run only.
    pub fn minimize_with(
        &mut self,
        theta_init: &Point<T>,
        max_iter: usize,
        tolerance: T,
    ) -> OptimizerResult<OptimizationResult<T>> {
        let config = self
            .config
            .clone()
            .with_max_iter(max_iter)
            .with_tolerance(tolerance);
        self.run_with(theta_init, &config)
    }

    fn run_with(
        &mut self,
        theta_init: &Point<T>,
        config: &OptimizerConfig<T>,
    ) -> OptimizerResult<OptimizationResult<T>> {
        // a failed run leaves no results behind
        self.state = None;
        config.validate()?;
        if self.registry.is_empty() {
            return Err(OptimizerError::NoObjectives);
        }

        let custom_reporter = self.reporter.is_some();
        let mut reporter = self
            .reporter
            .take()
            .unwrap_or_else(|| ProgressReporter::new(config.verbosity));
        let mut callback = std::mem::replace(&mut self.callback, Box::new(NoOpCallback));

        let outcome = self.iterate(theta_init, config, callback.as_mut(), &mut reporter);

        self.callback = callback;
        if custom_reporter {
            self.reporter = Some(reporter);
        }

        let result = outcome?;
        self.state = Some(RunState {
            theta: result.theta.clone(),
            metadata: result.metadata.clone(),
            converged: result.converged,
        });
        Ok(result)
    }

    fn iterate(
        &self,
        theta_init: &Point<T>,
        config: &OptimizerConfig<T>,
        callback: &mut dyn OptimizationCallback<T>,
        reporter: &mut ProgressReporter,
    ) -> OptimizerResult<OptimizationResult<T>> {
        let (rows, cols) = theta_init.shape();
        let terms: Vec<(&str, &dyn ProximalOperator<T>)> = self.registry.iter().collect();
        let n = <T as Scalar>::from_usize(terms.len());
        let sqrt_n = n.sqrt();
        let penalty = &config.penalty;
        let tolerance = config.tolerance;

        let mut rho = penalty.rho_init;
        let mut z = theta_init.clone();
        let mut primals = vec![theta_init.clone(); terms.len()];
        let mut duals = vec![Point::<T>::zeros(rows, cols); terms.len()];
        let mut tracker = ConvergenceTracker::with_capacity(config.max_iter.min(1024));
        let mut reason = TerminationReason::MaxIterations;
        let start = Instant::now();

        tracing::debug!(
            terms = terms.len(),
            rows,
            cols,
            max_iter = config.max_iter,
            "starting ADMM"
        );
        callback.on_optimization_start()?;

        for _ in 0..config.max_iter {
            for ((identifier, op), (x, u)) in terms.iter().zip(primals.iter_mut().zip(&duals)) {
                let step = op.prox(&(&z - u), rho)?;
                if step.shape() != (rows, cols) {
                    return Err(ProximalError::dimension_mismatch(
                        format!("{identifier} output of shape {rows}x{cols}"),
                        format!("{}x{}", step.nrows(), step.ncols()),
                    )
                    .into());
                }
                *x = step;
            }

            let z_new = primals
                .iter()
                .fold(Point::zeros(rows, cols), |acc, x| acc + x)
                / n;

            let mut primal_residual = T::zero();
            for (x, u) in primals.iter().zip(duals.iter_mut()) {
                let gap = x - &z_new;
                primal_residual += gap.norm();
                *u += gap;
            }
            let dual_residual = rho * sqrt_n * (&z_new - &z).norm();
            z = z_new;

            if !primal_residual.is_finite() || !dual_residual.is_finite() {
                return Err(ProximalError::numerical_error(format!(
                    "non-finite residuals at iteration {}",
                    tracker.len() + 1
                ))
                .into());
            }

            let next_rho = penalty.next_rho(rho, primal_residual, dual_residual);
            if next_rho != rho {
                let scale = rho / next_rho;
                for u in &mut duals {
                    *u *= scale;
                }
                rho = next_rho;
            }

            let objective = terms
                .iter()
                .try_fold(T::zero(), |acc, (_, op)| op.value(&z).map(|v| acc + v));

            let record = tracker.record(
                primal_residual,
                dual_residual,
                rho,
                objective,
                start.elapsed(),
            );
            tracing::debug!(
                iteration = record.iteration,
                primal_residual = %primal_residual,
                dual_residual = %dual_residual,
                rho = %rho,
                "ADMM iteration"
            );

            let keep_going = callback.on_iteration_end(&CallbackInfo { theta: &z, record })?;
            reporter.report_iteration(record);

            if primal_residual <= tolerance && dual_residual <= tolerance {
                reason = TerminationReason::Converged;
                break;
            }
            if !keep_going {
                reason = TerminationReason::CallbackRequest;
                break;
            }
        }

        let duration = start.elapsed();
        callback.on_optimization_end(&z)?;

        let metadata = tracker.finish();
        let converged = reason == TerminationReason::Converged;
        reporter.report_end(converged, metadata.len());
        tracing::info!(
            iterations = metadata.len(),
            converged,
            reason = ?reason,
            elapsed_s = duration.as_secs_f64(),
            "ADMM finished"
        );

        Ok(OptimizationResult::new(z, metadata, duration, reason))
    }
}
