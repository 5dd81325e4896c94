//! Nuclear norm penalty (sum of singular values), which favors low rank.

use crate::params::check_weight;
use proxopt_core::{
    error::{ProximalError, Result},
    operator::ProximalOperator,
    types::{Point, Scalar},
};

/// `gamma * ||x||_*`.
///
/// The proximal step soft-thresholds the singular values of `x0` at
/// `gamma / rho` and recomposes the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuclearNorm<T> {
    gamma: T,
}

impl<T: Scalar> NuclearNorm<T> {
    /// Creates the penalty with weight `gamma >= 0`.
    pub fn new(gamma: T) -> Result<Self> {
        check_weight("nucnorm", gamma)?;
        Ok(Self { gamma })
    }
}

impl<T: Scalar> ProximalOperator<T> for NuclearNorm<T> {
    fn name(&self) -> &str {
        "nucnorm"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        let threshold = self.gamma / rho;
        let mut svd = x0.clone().svd(true, true);
        svd.singular_values
            .apply(|s| *s = (*s - threshold).max(T::zero()));
        svd.recompose()
            .map_err(|reason| ProximalError::numerical_error(format!("nucnorm: {reason}")))
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        Some(self.gamma * x.singular_values().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proxopt_core::types::DMatrix;

    #[test]
    fn test_thresholds_singular_values() {
        let x0 = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![3.0, 1.0, 0.5]));
        let op = NuclearNorm::new(2.0).unwrap();
        let out = op.prox(&x0, 2.0).unwrap();

        let mut sv: Vec<f64> = out.singular_values().iter().copied().collect();
        sv.sort_by(|a, b| b.total_cmp(a));
        assert_relative_eq!(sv[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(sv[1], 0.0, epsilon = 1e-10);
        assert_relative_eq!(sv[2], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rectangular_input_keeps_shape() {
        let x0 = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let op = NuclearNorm::new(0.1).unwrap();
        let out = op.prox(&x0, 1.0).unwrap();
        assert_eq!(out.shape(), (2, 3));
    }

    #[test]
    fn test_zero_weight_is_identity() {
        let x0 = DMatrix::from_row_slice(2, 2, &[1.0, -2.0, 0.5, 4.0]);
        let op = NuclearNorm::new(0.0).unwrap();
        assert_relative_eq!(op.prox(&x0, 1.0).unwrap(), x0, epsilon = 1e-10);
        assert_relative_eq!(op.value(&x0).unwrap(), 0.0);
    }
}
