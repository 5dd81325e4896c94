//! Indicator of the non-negative orthant.

use proxopt_core::{
    error::Result,
    operator::ProximalOperator,
    types::{Point, Scalar},
};

/// Indicator of `{x : x >= 0}`; its proximal operator is the projection
/// `max(x, 0)` and does not depend on `rho`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonNegative;

impl<T: Scalar> ProximalOperator<T> for NonNegative {
    fn name(&self) -> &str {
        "nonneg"
    }

    fn prox(&self, x0: &Point<T>, _rho: T) -> Result<Point<T>> {
        Ok(x0.map(|v| if v > T::zero() { v } else { T::zero() }))
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        if x.iter().all(|v| *v >= T::zero()) {
            Some(T::zero())
        } else {
            Some(<T as Scalar>::infinity())
        }
    }
}
