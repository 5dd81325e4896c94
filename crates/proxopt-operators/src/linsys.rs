//! Least squares fit of a linear system `A x = b`.
//!
//! The penalty `0.5 * ||A x - b||^2` is handled through its normal equations
//! `P = A^T A`, `q = A^T b`; up to a constant it equals
//! `0.5 * x^T P x - q^T x`, and its proximal step solves
//!
//! ```text
//! (rho * I + P) x = rho * x0 + q
//! ```

use proxopt_core::{
    error::{ProximalError, Result},
    operator::ProximalOperator,
    types::{DMatrix, Point, Scalar},
};

/// Quadratic penalty `0.5 * x^T P x - q^T x` with symmetric `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<T: Scalar> {
    p: DMatrix<T>,
    q: DMatrix<T>,
}

impl<T: Scalar> LinearSystem<T> {
    /// Creates the penalty from `P = A^T A` and `q = A^T b`.
    pub fn new(p: DMatrix<T>, q: DMatrix<T>) -> Result<Self> {
        if !p.is_square() {
            return Err(ProximalError::invalid_parameter(
                "linsys",
                "P",
                format!("must be square, got {}x{}", p.nrows(), p.ncols()),
            ));
        }
        if q.nrows() != p.nrows() {
            return Err(ProximalError::dimension_mismatch(
                format!("q with {} rows", p.nrows()),
                format!("q with {} rows", q.nrows()),
            ));
        }
        Ok(Self { p, q })
    }

    /// Creates the penalty `0.5 * ||A x - b||^2` from `A` and `b`.
    pub fn from_system(a: &DMatrix<T>, b: &DMatrix<T>) -> Result<Self> {
        if a.nrows() != b.nrows() {
            return Err(ProximalError::dimension_mismatch(
                format!("b with {} rows", a.nrows()),
                format!("b with {} rows", b.nrows()),
            ));
        }
        Self::new(a.tr_mul(a), a.tr_mul(b))
    }

    fn check_shape(&self, x: &Point<T>) -> Result<()> {
        if x.shape() != self.q.shape() {
            return Err(ProximalError::shape_mismatch(self.q.shape(), x.shape()));
        }
        Ok(())
    }
}

impl<T: Scalar> ProximalOperator<T> for LinearSystem<T> {
    fn name(&self) -> &str {
        "linsys"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        self.check_shape(x0)?;
        let n = self.p.nrows();
        let system = DMatrix::identity(n, n) * rho + &self.p;
        let rhs = x0 * rho + &self.q;

        if let Some(chol) = system.clone().cholesky() {
            return Ok(chol.solve(&rhs));
        }
        system
            .lu()
            .solve(&rhs)
            .ok_or_else(|| ProximalError::numerical_error("linsys: rho * I + P is singular"))
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        self.check_shape(x).ok()?;
        let half = <T as Scalar>::from_f64(0.5);
        Some(half * x.dot(&(&self.p * x)) - self.q.dot(x))
    }
}
