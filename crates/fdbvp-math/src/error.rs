//! Error types for numerical kernels.

use thiserror::Error;

/// A specialized Result type for numerical kernels.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur in the linear solvers and the polynomial fitter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A pivot fell below the tolerance during elimination.
    ///
    /// For the Thomas sweep `step` is the row being eliminated; for the dense
    /// LU factorization it is the column whose best pivot was too small.
    #[error("Singular system: pivot {pivot:.3e} at step {step} is below tolerance")]
    SingularSystem {
        /// Zero-based elimination step where the pivot vanished.
        step: usize,
        /// The offending pivot value.
        pivot: f64,
    },

    /// The least-squares normal-equations matrix is not invertible.
    #[error(
        "Singular normal equations: cannot fit degree {degree} through {points} distinct points"
    )]
    SingularNormalEquations {
        /// Requested polynomial degree.
        degree: usize,
        /// Number of distinct nodes available.
        points: usize,
    },

    /// Sequences that must have equal length do not.
    #[error("Dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which sequence had the wrong length.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a singular system error.
    #[must_use]
    pub fn singular_system(step: usize, pivot: f64) -> Self {
        Self::SingularSystem { step, pivot }
    }

    /// Creates a singular normal-equations error.
    #[must_use]
    pub fn singular_normal_equations(degree: usize, points: usize) -> Self {
        Self::SingularNormalEquations { degree, points }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Returns true if this error reports a numerically singular matrix.
    pub fn is_singular(&self) -> bool {
        matches!(
            self,
            Self::SingularSystem { .. } | Self::SingularNormalEquations { .. }
        )
    }
}
