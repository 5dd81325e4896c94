//! Named parameters for built-in regularizers.

use proxopt_core::{
    error::{ProximalError, Result},
    types::{DMatrix, Scalar},
};
use std::collections::BTreeMap;

/// Scalar and matrix parameters passed to a built-in regularizer by name.
///
/// ```
/// use proxopt_operators::RegularizerParams;
///
/// let params = RegularizerParams::<f64>::new().with_scalar("gamma", 0.1);
/// assert_eq!(params.scalar("gamma"), Some(0.1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizerParams<T: Scalar> {
    scalars: BTreeMap<String, T>,
    matrices: BTreeMap<String, DMatrix<T>>,
}

impl<T: Scalar> Default for RegularizerParams<T> {
    fn default() -> Self {
        Self {
            scalars: BTreeMap::new(),
            matrices: BTreeMap::new(),
        }
    }
}

impl<T: Scalar> RegularizerParams<T> {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a parameter set holding only `gamma`.
    pub fn with_gamma(gamma: T) -> Self {
        Self::new().with_scalar("gamma", gamma)
    }

    /// Adds a scalar parameter.
    pub fn with_scalar<S: Into<String>>(mut self, name: S, value: T) -> Self {
        self.scalars.insert(name.into(), value);
        self
    }

    /// Adds a matrix parameter.
    pub fn with_matrix<S: Into<String>>(mut self, name: S, value: DMatrix<T>) -> Self {
        self.matrices.insert(name.into(), value);
        self
    }

    /// Looks up a scalar parameter.
    pub fn scalar(&self, name: &str) -> Option<T> {
        self.scalars.get(name).copied()
    }

    /// Looks up a matrix parameter.
    pub fn matrix(&self, name: &str) -> Option<&DMatrix<T>> {
        self.matrices.get(name)
    }

    /// Whether no parameter was supplied.
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.matrices.is_empty()
    }

    pub(crate) fn require_scalar(&self, regularizer: &str, name: &str) -> Result<T> {
        self.scalar(name)
            .ok_or_else(|| ProximalError::missing_parameter(regularizer, name))
    }

    pub(crate) fn require_matrix(&self, regularizer: &str, name: &str) -> Result<&DMatrix<T>> {
        self.matrix(name)
            .ok_or_else(|| ProximalError::missing_parameter(regularizer, name))
    }

    /// Reads `gamma`, which must be finite and non-negative.
    pub(crate) fn require_gamma(&self, regularizer: &str) -> Result<T> {
        let gamma = self.require_scalar(regularizer, "gamma")?;
        check_weight(regularizer, gamma)?;
        Ok(gamma)
    }
}

/// Rejects negative or non-finite penalty weights.
pub(crate) fn check_weight<T: Scalar>(regularizer: &str, gamma: T) -> Result<()> {
    if !gamma.is_finite() || gamma < T::zero() {
        return Err(ProximalError::invalid_parameter(
            regularizer,
            "gamma",
            format!("must be finite and non-negative, got {gamma}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let params = RegularizerParams::<f64>::with_gamma(0.5)
            .with_matrix("x_obs", DMatrix::from_element(2, 2, 1.0));
        assert_eq!(params.scalar("gamma"), Some(0.5));
        assert_eq!(params.matrix("x_obs").map(|m| m.shape()), Some((2, 2)));
        assert!(params.scalar("rho").is_none());
        assert!(!params.is_empty());
    }

    #[test]
    fn test_missing_and_invalid() {
        let params = RegularizerParams::<f64>::new();
        assert!(matches!(
            params.require_gamma("sparse"),
            Err(ProximalError::MissingParameter { .. })
        ));

        let params = RegularizerParams::with_gamma(-1.0);
        assert!(matches!(
            params.require_gamma("sparse"),
            Err(ProximalError::InvalidParameter { .. })
        ));

        let params = RegularizerParams::<f64>::new();
        assert!(params.require_matrix("linsys", "P").is_err());
    }
}
