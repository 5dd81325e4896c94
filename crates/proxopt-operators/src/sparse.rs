//! The l1 norm penalty, which induces sparsity.
//!
//! For `f(x) = gamma * ||x||_1` the proximal operator is the elementwise soft
//! threshold at `gamma / rho`.

use crate::params::check_weight;
use proxopt_core::{
    error::Result,
    operator::ProximalOperator,
    types::{Point, Scalar},
};

/// Elementwise soft thresholding.
///
/// Values with magnitude at most `threshold` become zero, the others move
/// `threshold` towards zero.
pub fn soft_threshold<T: Scalar>(x: &Point<T>, threshold: T) -> Point<T> {
    x.map(|v| {
        if v >= threshold {
            v - threshold
        } else if v <= -threshold {
            v + threshold
        } else {
            T::zero()
        }
    })
}

/// `gamma * ||x||_1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparse<T> {
    gamma: T,
}

impl<T: Scalar> Sparse<T> {
    /// Creates the penalty with weight `gamma >= 0`.
    pub fn new(gamma: T) -> Result<Self> {
        check_weight("sparse", gamma)?;
        Ok(Self { gamma })
    }

    /// Penalty weight.
    pub fn gamma(&self) -> T {
        self.gamma
    }
}

impl<T: Scalar> ProximalOperator<T> for Sparse<T> {
    fn name(&self) -> &str {
        "sparse"
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        Ok(soft_threshold(x0, self.gamma / rho))
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        Some(self.gamma * x.iter().fold(T::zero(), |acc, v| acc + v.abs()))
    }
}
