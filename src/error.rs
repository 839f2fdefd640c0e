//! Error types for network model operations.
//!
//! Every fallible call in the crate reports one of three failure kinds:
//! a shape mismatch, an out-of-domain parameter, or a read of state that
//! has not been set yet. Errors are raised at the call that detects them
//! and never leave the model partially mutated.

use std::fmt;

/// Main error type for network model operations.
///
/// # Examples
///
/// ```
/// use weighted_networks::error::NetworkError;
///
/// let err = NetworkError::InvalidDimension {
///     expected: "3x2".to_string(),
///     actual: "3x3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Shape mismatch between N, D, B and a supplied array.
    InvalidDimension {
        /// Expected shape description
        expected: String,
        /// Actual shape found
        actual: String,
    },

    /// Parameter outside its admissible domain.
    InvalidParameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// State read before it was set.
    Uninitialized {
        /// Name of the missing state
        what: String,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::InvalidDimension { expected, actual } => {
                write!(f, "Invalid dimension: expected {expected}, got {actual}")
            }
            NetworkError::InvalidParameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter: {param} = {value}, expected {constraint}"
                )
            }
            NetworkError::Uninitialized { what } => {
                write!(f, "Uninitialized: {what} has not been set")
            }
        }
    }
}

impl std::error::Error for NetworkError {}

impl NetworkError {
    /// Create a dimension error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidDimension {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create a dimension error for a two-dimensional shape
    #[must_use]
    pub fn shape_mismatch(
        context: &str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        Self::InvalidDimension {
            expected: format!("{context}={}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create a parameter error
    #[must_use]
    pub fn invalid_parameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an uninitialized-state error
    #[must_use]
    pub fn uninitialized(what: &str) -> Self {
        Self::Uninitialized {
            what: what.to_string(),
        }
    }

    /// Returns true for [`NetworkError::InvalidDimension`].
    #[must_use]
    pub fn is_invalid_dimension(&self) -> bool {
        matches!(self, Self::InvalidDimension { .. })
    }

    /// Returns true for [`NetworkError::InvalidParameter`].
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true for [`NetworkError::Uninitialized`].
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, NetworkError>;
