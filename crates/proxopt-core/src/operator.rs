//! Proximal operator interface.
//!
//! Every term of an objective handled by the optimizer, whether it is the
//! data-fit objective or a regularizer, is represented by its proximal
//! operator:
//!
//! ```text
//! prox_{f, rho}(x0) = argmin_x ( f(x) + (rho / 2) ||x - x0||_F^2 )
//! ```
//!
//! Larger values of `rho` keep the result closer to `x0`.

use crate::{error::Result, types::{Point, Scalar}};
use std::fmt::{self, Debug};

/// A penalty term known through its proximal operator.
pub trait ProximalOperator<T>: Debug + Send + Sync
where
    T: Scalar,
{
    /// Returns a human-readable name for the term.
    fn name(&self) -> &str;

    /// Evaluates the proximal operator at `x0` with penalty `rho`.
    ///
    /// The returned point must have the same shape as `x0`.
    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>>;

    /// Evaluates the penalty itself at `x`, when it is cheap to do so.
    ///
    /// Returns `None` for terms that only know their proximal step, such as
    /// user-supplied closures.
    fn value(&self, x: &Point<T>) -> Option<T> {
        let _ = x;
        None
    }
}

impl<T: Scalar> ProximalOperator<T> for Box<dyn ProximalOperator<T>> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        (**self).prox(x0, rho)
    }

    fn value(&self, x: &Point<T>) -> Option<T> {
        (**self).value(x)
    }
}

/// Signature of a user-supplied proximal step.
pub type ProxFn<T> = dyn Fn(&Point<T>, T) -> Point<T> + Send + Sync;

/// Wraps a closure computing a proximal step as a [`ProximalOperator`].
pub struct FunctionOperator<T: Scalar> {
    name: String,
    function: Box<ProxFn<T>>,
}

impl<T: Scalar> FunctionOperator<T> {
    /// Creates a new operator from a label and a closure.
    pub fn new<S, F>(name: S, function: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Point<T>, T) -> Point<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Box::new(function),
        }
    }

    /// Creates a new operator from an already boxed closure.
    pub fn from_boxed<S: Into<String>>(name: S, function: Box<ProxFn<T>>) -> Self {
        Self {
            name: name.into(),
            function,
        }
    }
}

impl<T: Scalar> Debug for FunctionOperator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionOperator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> ProximalOperator<T> for FunctionOperator<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn prox(&self, x0: &Point<T>, rho: T) -> Result<Point<T>> {
        Ok((self.function)(x0, rho))
    }
}
