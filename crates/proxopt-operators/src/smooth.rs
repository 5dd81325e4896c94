//! Smoothness penalty based on the discrete Laplacian.
//!
//! Each column of the iterate is treated as a 1-D signal. With
//! `L = tridiag(-1, 2, -1)` the penalty is `gamma / 2 * x^T L x`, so the
//! proximal step solves the tridiagonal system
//!
//! ```text
//! (gamma * L + rho * I) x = rho * x0
//! ```

use crate::params::check_weight;
use proxopt_core::{
    error::{ProximalError, Result},
    operator::ProximalOperator,
    types::{DVector, Point, Scalar},
};

/// Laplacian smoothing penalty `gamma / 2 * x^T L x` applied column-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplacianSmoothing<T> {
    gamma: T,
}

impl<T: Scalar> LaplacianSmoothing<T> {
    /// Creates the penalty with weight `gamma >= 0`.
    pub fn new(gamma: T) -> Result<Self> {
        check_weight("smooth", gamma)?;
        Ok(Self { gamma })
    }
}

/// Solves a symmetric tridiagonal Toeplitz system with constant `diag` and
/// `off` entries, in place over `rhs` (Thomas algorithm).
fn solve_tridiagonal<T: Scalar>(diag: T, off: T, rhs: &mut [T]) -> Result<()> {
    let n = rhs.len();
    if n == 0 {
        return Ok(());
    }
    let mut c_prime = vec![T::zero(); n];

    let mut denom = diag;
    for i in 0..n {
        if i > 0 {
            denom = diag - off * c_prime[i - 1];
            rhs[i] = rhs[i] - off * rhs[i - 1];
        }
        if denom.abs() <= T::EPSILON {
            return Err(ProximalError::numerical_error(
                "smooth: singular tridiagonal system",
            ));
        }
        c_prime[i] = off / denom;
        rhs[i] /= denom;
    }

    for i in (0..n - 1).rev() {
        rhs[i] = rhs[i] - c_prime[i] * rhs[i + 1];
    }
    Ok(())
}

impl<T: Scalar> ProximalOperator<T> for LaplacianSmoothing<T> {
    fn name(&self) -> &str {
        "smooth"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        let two = <T as Scalar>::from_f64(2.0);
        let diag = two * self.gamma + rho;
        let off = -self.gamma;

        let mut out = x0 * rho;
        for j in 0..out.ncols() {
            let mut signal: Vec<T> = out.column(j).iter().copied().collect();
            solve_tridiagonal(diag, off, &mut signal)?;
            out.set_column(j, &DVector::from_vec(signal));
        }
        Ok(out)
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        let two = <T as Scalar>::from_f64(2.0);
        let mut quad = T::zero();
        for col in x.column_iter() {
            for i in 0..col.len() {
                quad += two * col[i] * col[i];
                if i + 1 < col.len() {
                    quad -= two * col[i] * col[i + 1];
                }
            }
        }
        Some(self.gamma * quad / two)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proxopt_core::types::{column, DMatrix};

    fn dense_system(n: usize, gamma: f64, rho: f64) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                2.0 * gamma + rho
            } else if i.abs_diff(j) == 1 {
                -gamma
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_matches_dense_solve() {
        let (gamma, rho) = (0.7, 1.3);
        let x0 = column(&[1.0, -2.0, 3.0, 0.5, 4.0]);
        let op = LaplacianSmoothing::new(gamma).unwrap();
        let out = op.prox(&x0, rho).unwrap();

        let expected = dense_system(5, gamma, rho)
            .lu()
            .solve(&(&x0 * rho))
            .unwrap();
        assert_relative_eq!(out, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_reduces_roughness() {
        let x0 = column(&[0.0, 5.0, 0.0, 5.0, 0.0, 5.0]);
        let op = LaplacianSmoothing::new(1.0).unwrap();
        let out = op.prox(&x0, 1.0).unwrap();
        assert!(op.value(&out).unwrap() < op.value(&x0).unwrap());
    }

    #[test]
    fn test_columns_are_independent() {
        let x0 = DMatrix::from_column_slice(3, 2, &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        let op = LaplacianSmoothing::new(0.5).unwrap();
        let out = op.prox(&x0, 2.0).unwrap();
        assert!(out.column(1).iter().all(|v| *v == 0.0));
        assert_eq!(out.shape(), (3, 2));
    }

    #[test]
    fn test_value_of_constant_signal() {
        // only the boundary terms remain: gamma / 2 * (x_0^2 + x_{n-1}^2)
        let op = LaplacianSmoothing::new(2.0).unwrap();
        assert_relative_eq!(op.value(&column(&[1.0, 1.0, 1.0])).unwrap(), 2.0);
    }
}
