//! Unified regularizer registration.
//!
//! A [`Regularizer`] is either the name of a built-in penalty together with
//! its parameters, a closure computing a proximal step, or any type
//! implementing [`ProximalOperator`]. Every variant is resolved at
//! registration time into a boxed operator, so the optimizer only sees a
//! single representation.
//!
//! ```
//! use proxopt_core::types::Point;
//! use proxopt_operators::{Regularizer, RegularizerParams, RegularizerRegistry};
//!
//! let mut registry = RegularizerRegistry::<f64>::new();
//! registry.add(Regularizer::named("sparse", RegularizerParams::with_gamma(0.1))).unwrap();
//! registry.add(Regularizer::function(|x: &Point<f64>, _rho: f64| x.clone())).unwrap();
//! assert_eq!(registry.identifiers(), vec!["sparse", "custom-1"]);
//! ```

use crate::{
    bfgs::SmoothProx, linsys::LinearSystem, nonneg::NonNegative, nucnorm::NuclearNorm,
    params::RegularizerParams, smooth::LaplacianSmoothing, sparse::Sparse,
    squared_error::SquaredError, tvd::TotalVariation,
};
use proxopt_core::{
    error::{ProximalError, Result},
    operator::{FunctionOperator, ProxFn, ProximalOperator},
    types::{Point, Scalar},
};
use std::fmt;

/// Names accepted by [`Regularizer::named`].
pub const BUILTIN_NAMES: [&str; 8] = [
    "sparse",
    "nonneg",
    "squared_error",
    "nucnorm",
    "smooth",
    "tvd",
    "linsys",
    "poissreg",
];

/// Instantiates the built-in penalty called `name`.
///
/// Only the first whitespace-separated token of `name` is used for the
/// lookup, so `"sparse"` and `"sparse coarse"` resolve to the same penalty.
pub fn builtin<T: Scalar>(
    name: &str,
    params: &RegularizerParams<T>,
) -> Result<Box<dyn ProximalOperator<T>>> {
    let key = name.split_whitespace().next().unwrap_or_default();
    let op: Box<dyn ProximalOperator<T>> = match key {
        "sparse" => Box::new(Sparse::new(params.require_gamma(key)?)?),
        "nonneg" => Box::new(NonNegative),
        "squared_error" => Box::new(SquaredError::new(
            params.require_matrix(key, "x_obs")?.clone(),
        )),
        "nucnorm" => Box::new(NuclearNorm::new(params.require_gamma(key)?)?),
        "smooth" => Box::new(LaplacianSmoothing::new(params.require_gamma(key)?)?),
        "tvd" => Box::new(TotalVariation::new(params.require_gamma(key)?)?),
        "linsys" => Box::new(LinearSystem::new(
            params.require_matrix(key, "P")?.clone(),
            params.require_matrix(key, "q")?.clone(),
        )?),
        "poissreg" => Box::new(SmoothProx::poisson_regression(
            params.require_matrix(key, "x")?.clone(),
            params.require_matrix(key, "y")?.clone(),
        )?),
        _ => return Err(ProximalError::unknown_regularizer(name, &BUILTIN_NAMES)),
    };
    Ok(op)
}

/// A regularizer to register, by name or by function.
pub enum Regularizer<T: Scalar> {
    /// A built-in penalty looked up by name
    Named {
        /// Identifier; its first token selects the built-in
        identifier: String,
        /// Parameters of the built-in
        params: RegularizerParams<T>,
    },

    /// A closure computing the proximal step `(x0, rho) -> x`
    Function {
        /// Optional identifier; generated when absent
        identifier: Option<String>,
        /// The proximal step
        function: Box<ProxFn<T>>,
    },

    /// A user type implementing the proximal operator trait
    Operator {
        /// Optional identifier; derived from the operator name when absent
        identifier: Option<String>,
        /// The operator
        op: Box<dyn ProximalOperator<T>>,
    },
}

impl<T: Scalar> Regularizer<T> {
    /// A built-in penalty with parameters.
    pub fn named<S: Into<String>>(identifier: S, params: RegularizerParams<T>) -> Self {
        Self::Named {
            identifier: identifier.into(),
            params,
        }
    }

    /// A built-in penalty without parameters (such as `nonneg`).
    pub fn name<S: Into<String>>(identifier: S) -> Self {
        Self::named(identifier, RegularizerParams::new())
    }

    /// An anonymous proximal step.
    pub fn function<F>(function: F) -> Self
    where
        F: Fn(&Point<T>, T) -> Point<T> + Send + Sync + 'static,
    {
        Self::Function {
            identifier: None,
            function: Box::new(function),
        }
    }

    /// A proximal step registered under `identifier`.
    pub fn labelled_function<S, F>(identifier: S, function: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Point<T>, T) -> Point<T> + Send + Sync + 'static,
    {
        Self::Function {
            identifier: Some(identifier.into()),
            function: Box::new(function),
        }
    }

    /// Any proximal operator, registered under its own name.
    ///
    /// When that name is taken, a suffix is appended (`linsys-2`, ...) so
    /// that several operators of the same type form distinct terms.
    pub fn operator<O: ProximalOperator<T> + 'static>(op: O) -> Self {
        Self::Operator {
            identifier: None,
            op: Box::new(op),
        }
    }

    /// A proximal operator registered under `identifier`.
    pub fn labelled_operator<S, O>(identifier: S, op: O) -> Self
    where
        S: Into<String>,
        O: ProximalOperator<T> + 'static,
    {
        Self::Operator {
            identifier: Some(identifier.into()),
            op: Box::new(op),
        }
    }
}

impl<T: Scalar> fmt::Debug for Regularizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { identifier, params } => f
                .debug_struct("Named")
                .field("identifier", identifier)
                .field("params", params)
                .finish(),
            Self::Function { identifier, .. } => f
                .debug_struct("Function")
                .field("identifier", identifier)
                .finish_non_exhaustive(),
            Self::Operator { identifier, op } => f
                .debug_struct("Operator")
                .field("identifier", identifier)
                .field("op", op)
                .finish(),
        }
    }
}

impl<T: Scalar> From<&str> for Regularizer<T> {
    fn from(identifier: &str) -> Self {
        Self::name(identifier)
    }
}

impl<T: Scalar> From<String> for Regularizer<T> {
    fn from(identifier: String) -> Self {
        Self::name(identifier)
    }
}

impl<T: Scalar> From<Box<dyn ProximalOperator<T>>> for Regularizer<T> {
    fn from(op: Box<dyn ProximalOperator<T>>) -> Self {
        Self::Operator {
            identifier: None,
            op,
        }
    }
}

/// Ordered set of proximal operators, one per identifier.
#[derive(Debug)]
pub struct RegularizerRegistry<T: Scalar> {
    entries: Vec<(String, Box<dyn ProximalOperator<T>>)>,
    anonymous: usize,
}

impl<T: Scalar> Default for RegularizerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> RegularizerRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            anonymous: 0,
        }
    }

    /// Resolves and registers a regularizer, returning its identifier.
    ///
    /// Registering an identifier that already exists replaces the previous
    /// operator in place. Generated identifiers never collide with existing
    /// ones.
    pub fn add(&mut self, regularizer: Regularizer<T>) -> Result<String> {
        let (identifier, op) = match regularizer {
            Regularizer::Named { identifier, params } => {
                let identifier = identifier.trim().to_string();
                let op = builtin(&identifier, &params)?;
                (identifier, op)
            }
            Regularizer::Function {
                identifier,
                function,
            } => {
                let identifier = identifier.unwrap_or_else(|| self.next_anonymous());
                let op: Box<dyn ProximalOperator<T>> =
                    Box::new(FunctionOperator::from_boxed(identifier.clone(), function));
                (identifier, op)
            }
            Regularizer::Operator { identifier, op } => {
                let identifier = identifier.unwrap_or_else(|| self.unused_label(op.name()));
                (identifier, op)
            }
        };

        if let Some(slot) = self.entries.iter_mut().find(|(id, _)| *id == identifier) {
            tracing::warn!(identifier = %identifier, "replacing registered regularizer");
            slot.1 = op;
        } else {
            tracing::debug!(identifier = %identifier, "registered regularizer");
            self.entries.push((identifier.clone(), op));
        }
        Ok(identifier)
    }

    fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|(id, _)| id == identifier)
    }

    /// Next `custom-k` label not already in use.
    fn next_anonymous(&mut self) -> String {
        loop {
            self.anonymous += 1;
            let label = format!("custom-{}", self.anonymous);
            if !self.contains(&label) {
                return label;
            }
        }
    }

    /// `base` if unused, otherwise the first free `base-k` with `k >= 2`.
    fn unused_label(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|k| format!("{base}-{k}"))
            .find(|label| !self.contains(label))
            .unwrap_or_else(|| base.to_string())
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no operator is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in registration order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Operator registered under `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&dyn ProximalOperator<T>> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, op)| op.as_ref())
    }

    /// Removes and returns the operator registered under `identifier`.
    pub fn remove(&mut self, identifier: &str) -> Option<Box<dyn ProximalOperator<T>>> {
        let index = self.entries.iter().position(|(id, _)| id == identifier)?;
        Some(self.entries.remove(index).1)
    }

    /// Removes every operator.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.anonymous = 0;
    }

    /// Iterates over `(identifier, operator)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn ProximalOperator<T>)> + '_ {
        self.entries.iter().map(|(id, op)| (id.as_str(), op.as_ref()))
    }

    /// Operators in registration order.
    pub fn operators(&self) -> impl Iterator<Item = &dyn ProximalOperator<T>> + '_ {
        self.entries.iter().map(|(_, op)| op.as_ref())
    }
}
