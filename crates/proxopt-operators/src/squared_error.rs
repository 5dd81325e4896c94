//! Squared Frobenius distance to an observed matrix.

use proxopt_core::{
    error::{ProximalError, Result},
    operator::ProximalOperator,
    types::{DMatrix, Point, Scalar},
};

/// `0.5 * ||x - x_obs||_F^2`.
///
/// The proximal step is the weighted average
/// `(x0 + x_obs / rho) / (1 + 1 / rho)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaredError<T: Scalar> {
    x_obs: DMatrix<T>,
}

impl<T: Scalar> SquaredError<T> {
    /// Creates the penalty around `x_obs`.
    pub fn new(x_obs: DMatrix<T>) -> Self {
        Self { x_obs }
    }

    /// The observation the iterate is pulled towards.
    pub fn observation(&self) -> &DMatrix<T> {
        &self.x_obs
    }

    fn check_shape(&self, x: &Point<T>) -> Result<()> {
        if x.shape() != self.x_obs.shape() {
            return Err(ProximalError::shape_mismatch(self.x_obs.shape(), x.shape()));
        }
        Ok(())
    }
}

impl<T: Scalar> ProximalOperator<T> for SquaredError<T> {
    fn name(&self) -> &str {
        "squared_error"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        self.check_shape(x0)?;
        let inv = T::one() / rho;
        Ok((x0 + &self.x_obs * inv) / (T::one() + inv))
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        self.check_shape(x).ok()?;
        Some((x - &self.x_obs).norm_squared() * <T as Scalar>::from_f64(0.5))
    }
}
