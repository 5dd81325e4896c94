//! Total variation denoising.
//!
//! The penalty is the isotropic total variation of the iterate seen as an
//! image, `gamma * sum_ij |grad x|_ij`. A column vector is a 1-D signal. The
//! proximal step uses Chambolle's dual projection algorithm with weight
//! `lambda = gamma / rho`:
//!
//! ```text
//! p <- (p + tau * grad(div p - x0 / lambda)) / (1 + tau * |grad(div p - x0 / lambda)|)
//! x  = x0 - lambda * div p
//! ```

use crate::params::check_weight;
use proxopt_core::{
    error::Result,
    operator::ProximalOperator,
    types::{DMatrix, Point, Scalar},
};

/// Settings of the inner dual projection loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TvSettings<T> {
    /// Maximum number of dual iterations
    pub max_iter: usize,
    /// Stop when the largest dual update falls below this value
    pub tolerance: T,
}

impl<T: Scalar> Default for TvSettings<T> {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tolerance: <T as Scalar>::from_f64(1e-6),
        }
    }
}

/// `gamma * TV(x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalVariation<T> {
    gamma: T,
    settings: TvSettings<T>,
}

impl<T: Scalar> TotalVariation<T> {
    /// Creates the penalty with weight `gamma >= 0`.
    pub fn new(gamma: T) -> Result<Self> {
        check_weight("tvd", gamma)?;
        Ok(Self {
            gamma,
            settings: TvSettings::default(),
        })
    }

    /// Overrides the inner loop settings.
    pub fn with_settings(mut self, settings: TvSettings<T>) -> Self {
        self.settings = settings;
        self
    }
}

/// Forward differences along rows and columns, zero at the far boundary.
fn gradient<T: Scalar>(u: &DMatrix<T>) -> (DMatrix<T>, DMatrix<T>) {
    let (m, n) = u.shape();
    let gx = DMatrix::from_fn(m, n, |i, j| {
        if i + 1 < m {
            u[(i + 1, j)] - u[(i, j)]
        } else {
            T::zero()
        }
    });
    let gy = DMatrix::from_fn(m, n, |i, j| {
        if j + 1 < n {
            u[(i, j + 1)] - u[(i, j)]
        } else {
            T::zero()
        }
    });
    (gx, gy)
}

/// Negative adjoint of [`gradient`].
fn divergence<T: Scalar>(px: &DMatrix<T>, py: &DMatrix<T>) -> DMatrix<T> {
    let (m, n) = px.shape();
    DMatrix::from_fn(m, n, |i, j| {
        let mut d = T::zero();
        if i + 1 < m {
            d += px[(i, j)];
        }
        if i > 0 {
            d -= px[(i - 1, j)];
        }
        if j + 1 < n {
            d += py[(i, j)];
        }
        if j > 0 {
            d -= py[(i, j - 1)];
        }
        d
    })
}

impl<T: Scalar> ProximalOperator<T> for TotalVariation<T> {
    fn name(&self) -> &str {
        "tvd"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        let lambda = self.gamma / rho;
        if lambda <= T::zero() {
            return Ok(x0.clone());
        }

        let tau = <T as Scalar>::from_f64(0.125);
        let (m, n) = x0.shape();
        let mut px = DMatrix::zeros(m, n);
        let mut py = DMatrix::zeros(m, n);
        let scaled = x0 / lambda;

        for _ in 0..self.settings.max_iter {
            let (gx, gy) = gradient(&(divergence(&px, &py) - &scaled));
            let mut largest_update = T::zero();
            for idx in 0..m * n {
                let norm = (gx[idx] * gx[idx] + gy[idx] * gy[idx]).sqrt();
                let denom = T::one() + tau * norm;
                let new_x = (px[idx] + tau * gx[idx]) / denom;
                let new_y = (py[idx] + tau * gy[idx]) / denom;
                largest_update = largest_update
                    .max((new_x - px[idx]).abs())
                    .max((new_y - py[idx]).abs());
                px[idx] = new_x;
                py[idx] = new_y;
            }
            if largest_update < self.settings.tolerance {
                break;
            }
        }

        Ok(x0 - divergence(&px, &py) * lambda)
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        let (gx, gy) = gradient(x);
        let tv = gx
            .iter()
            .zip(gy.iter())
            .fold(T::zero(), |acc, (a, b)| acc + (*a * *a + *b * *b).sqrt());
        Some(self.gamma * tv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proxopt_core::types::column;

    #[test]
    fn test_divergence_is_negative_adjoint() {
        let u = DMatrix::from_fn(3, 4, |i, j| ((i * 4 + j) as f64).sin());
        let px = DMatrix::from_fn(3, 4, |i, j| ((i + 2 * j) as f64).cos());
        let py = DMatrix::from_fn(3, 4, |i, j| (i as f64) - (j as f64));

        let (gx, gy) = gradient(&u);
        let lhs = gx.dot(&px) + gy.dot(&py);
        let rhs = -u.dot(&divergence(&px, &py));
        assert_relative_eq!(lhs, rhs, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_signal_is_fixed_point() {
        let x0 = column(&[2.0, 2.0, 2.0, 2.0]);
        let op = TotalVariation::new(1.0).unwrap();
        let out = op.prox(&x0, 1.0).unwrap();
        assert_relative_eq!(out, x0, epsilon = 1e-8);
        assert_relative_eq!(op.value(&x0).unwrap(), 0.0);
    }

    #[test]
    fn test_denoising_lowers_total_variation() {
        let x0 = DMatrix::from_fn(6, 6, |i, j| if (i + j) % 2 == 0 { 1.0 } else { 0.0 });
        let op = TotalVariation::new(0.5).unwrap();
        let out = op.prox(&x0, 1.0).unwrap();

        assert_eq!(out.shape(), (6, 6));
        assert!(op.value(&out).unwrap() < op.value(&x0).unwrap());
        // mean is preserved by the dual projection
        assert_relative_eq!(out.mean(), x0.mean(), epsilon = 1e-8);
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let x0 = column(&[1.0, -1.0, 3.0]);
        let op = TotalVariation::new(0.0).unwrap();
        assert_eq!(op.prox(&x0, 1.0).unwrap(), x0);
    }
}
