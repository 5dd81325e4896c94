//! Proximal operators of smooth functions, solved numerically with BFGS.
//!
//! For a differentiable `f` with known gradient the proximal step minimizes
//! `g(x) = f(x) + rho / 2 * ||x - x0||^2` with a dense BFGS quasi-Newton
//! method and an Armijo backtracking line search. Poisson regression is
//! provided as a ready-made instance.

use proxopt_core::{
    error::{ProximalError, Result},
    operator::ProximalOperator,
    types::{DMatrix, DVector, Point, Scalar},
};
use std::fmt;
use std::sync::Arc;

/// Objective closure of a [`SmoothProx`].
pub type ObjectiveFn<T> = dyn Fn(&Point<T>) -> T + Send + Sync;

/// Gradient closure of a [`SmoothProx`].
pub type GradientFn<T> = dyn Fn(&Point<T>) -> Point<T> + Send + Sync;

/// Settings of the inner BFGS solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BfgsSettings<T> {
    /// Convergence tolerance on the gradient norm of `g`
    pub grad_tol: T,
    /// Maximum number of BFGS iterations
    pub max_iter: usize,
    /// Armijo condition parameter (sufficient decrease)
    pub armijo_c1: T,
    /// Backtracking contraction factor
    pub armijo_shrink: T,
    /// Maximum line search iterations
    pub max_ls_iter: usize,
}

impl<T: Scalar> Default for BfgsSettings<T> {
    fn default() -> Self {
        Self {
            grad_tol: T::DEFAULT_GRADIENT_TOLERANCE,
            max_iter: 200,
            armijo_c1: <T as Scalar>::from_f64(1e-4),
            armijo_shrink: <T as Scalar>::from_f64(0.5),
            max_ls_iter: 40,
        }
    }
}

/// Proximal operator of a smooth function `f` given by closures.
#[derive(Clone)]
pub struct SmoothProx<T: Scalar> {
    name: String,
    objective: Arc<ObjectiveFn<T>>,
    gradient: Arc<GradientFn<T>>,
    settings: BfgsSettings<T>,
}

impl<T: Scalar> fmt::Debug for SmoothProx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothProx")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> SmoothProx<T> {
    /// Creates the operator from `f` and its gradient.
    pub fn new<F, G>(objective: F, gradient: G) -> Self
    where
        F: Fn(&Point<T>) -> T + Send + Sync + 'static,
        G: Fn(&Point<T>) -> Point<T> + Send + Sync + 'static,
    {
        Self {
            name: "bfgs".to_string(),
            objective: Arc::new(objective),
            gradient: Arc::new(gradient),
            settings: BfgsSettings::default(),
        }
    }

    /// Poisson regression negative log-likelihood
    /// `f(w) = mean(exp(X w) - y * (X w))` for a design matrix `x` (n x k)
    /// and responses `y` (n x 1).
    pub fn poisson_regression(x: DMatrix<T>, y: DMatrix<T>) -> Result<Self> {
        if y.nrows() != x.nrows() || y.ncols() != 1 {
            return Err(ProximalError::dimension_mismatch(
                format!("y of shape {}x1", x.nrows()),
                format!("y of shape {}x{}", y.nrows(), y.ncols()),
            ));
        }
        if x.nrows() == 0 {
            return Err(ProximalError::invalid_parameter(
                "poissreg",
                "x",
                "design matrix has no rows",
            ));
        }
        let n = <T as Scalar>::from_usize(x.nrows());
        let x = Arc::new(x);
        let y = Arc::new(y);

        let (fx, fy) = (Arc::clone(&x), Arc::clone(&y));
        let objective = move |w: &Point<T>| {
            let xw = fx.as_ref() * w;
            xw.iter()
                .zip(fy.iter())
                .fold(T::zero(), |acc, (a, b)| acc + a.exp() - *b * *a)
                / n
        };
        let gradient = move |w: &Point<T>| {
            let rate = (x.as_ref() * w).map(|v| v.exp());
            x.tr_mul(&(rate - y.as_ref())) / n
        };

        let mut op = Self::new(objective, gradient);
        op.name = "poissreg".to_string();
        Ok(op)
    }

    /// Overrides the inner solver settings.
    pub fn with_settings(mut self, settings: BfgsSettings<T>) -> Self {
        self.settings = settings;
        self
    }

    /// Overrides the reported name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Minimizes `f(x) + rho / 2 * ||x - x0||^2` starting from `x0`.
    fn minimize_prox_objective(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        let (rows, cols) = x0.shape();
        let dim = rows * cols;
        let half_rho = rho * <T as Scalar>::from_f64(0.5);

        let reshape = |v: &DVector<T>| Point::from_column_slice(rows, cols, v.as_slice());
        let flatten = |m: &Point<T>| DVector::from_vec(m.as_slice().to_vec());

        let g = |v: &DVector<T>| -> Result<T> {
            let x = reshape(v);
            let value = (self.objective)(&x) + half_rho * (&x - x0).norm_squared();
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ProximalError::numerical_error(format!(
                    "{}: objective is not finite",
                    self.name
                )))
            }
        };
        let dg = |v: &DVector<T>| -> Result<DVector<T>> {
            let x = reshape(v);
            let grad = (self.gradient)(&x);
            if grad.shape() != x0.shape() {
                return Err(ProximalError::shape_mismatch(x0.shape(), grad.shape()));
            }
            Ok(flatten(&(grad + (&x - x0) * rho)))
        };

        let mut x = flatten(x0);
        let mut fx = g(&x)?;
        let mut grad = dg(&x)?;
        let mut h = DMatrix::<T>::identity(dim, dim);

        for _ in 0..self.settings.max_iter {
            if grad.norm() < self.settings.grad_tol {
                break;
            }

            let mut p = -(&h * &grad);
            let mut slope = grad.dot(&p);
            if slope >= T::zero() {
                h = DMatrix::identity(dim, dim);
                p = -grad.clone();
                slope = -grad.norm_squared();
            }

            // Armijo backtracking
            let mut alpha = T::one();
            let mut accepted = None;
            for _ in 0..self.settings.max_ls_iter {
                let candidate = &x + &p * alpha;
                if let Ok(f_new) = g(&candidate) {
                    if f_new <= fx + self.settings.armijo_c1 * alpha * slope {
                        accepted = Some((candidate, f_new));
                        break;
                    }
                }
                alpha *= self.settings.armijo_shrink;
            }
            let Some((x_new, f_new)) = accepted else {
                tracing::debug!(name = %self.name, "line search stalled, keeping current iterate");
                break;
            };

            let grad_new = dg(&x_new)?;
            let s = &x_new - &x;
            let y = &grad_new - &grad;
            let ys = y.dot(&s);
            if ys > T::EPSILON {
                let inv = T::one() / ys;
                let hy = &h * &y;
                let factor = (T::one() + inv * y.dot(&hy)) * inv;
                h += &s * s.transpose() * factor
                    - (&hy * s.transpose() + &s * hy.transpose()) * inv;
            }

            x = x_new;
            fx = f_new;
            grad = grad_new;
        }

        Ok(reshape(&x))
    }
}

impl<T: Scalar> ProximalOperator<T> for SmoothProx<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        self.minimize_prox_objective(x0, rho)
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        Some((self.objective)(x))
    }
}
