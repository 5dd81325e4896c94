//! Type definitions and aliases for proximal optimization.
//!
//! This module provides the scalar trait shared by every crate in the
//! workspace along with the matrix aliases used to represent iterates.

use nalgebra::{Dyn, OMatrix, OVector, RealField};
use std::fmt::{Debug, Display, LowerExp};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the necessary numeric traits required
/// by the proximal operators and the ADMM loop.
pub trait Scalar:
    RealField + Display + LowerExp + Debug + Default + Copy + Send + Sync + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default convergence tolerance on the ADMM residuals.
    const DEFAULT_TOLERANCE: Self;

    /// Default gradient tolerance for inner smooth solvers.
    const DEFAULT_GRADIENT_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    fn from_f64(v: f64) -> Self;

    /// Convert to f64 (for logging/display).
    fn to_f64(self) -> f64;

    /// Convert from usize (for term and iteration counts).
    fn from_usize(v: usize) -> Self;

    /// Positive infinity, used for indicator penalties.
    fn infinity() -> Self;
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-3;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-4;

    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_usize(v: usize) -> Self {
        v as f32
    }

    fn infinity() -> Self {
        f32::INFINITY
    }
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-3;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-8;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_usize(v: usize) -> Self {
        v as f64
    }

    fn infinity() -> Self {
        f64::INFINITY
    }
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// An iterate of the optimizer.
///
/// Parameters are always stored as dense matrices; a parameter vector of
/// length `n` is an `n x 1` matrix.
pub type Point<T> = DMatrix<T>;

/// Builds an `n x 1` point from a slice.
pub fn column<T: Scalar>(values: &[T]) -> Point<T> {
    Point::from_column_slice(values.len(), 1, values)
}
