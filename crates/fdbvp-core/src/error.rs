//! Error types for boundary-value solves.

use fdbvp_math::MathError;
use thiserror::Error;

/// A specialized Result type for boundary-value solves.
pub type BvpResult<T> = Result<T, BvpError>;

/// Errors that can occur while setting up or solving a boundary-value problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BvpError {
    /// The grid cannot be built: `n < 1`, a degenerate interval, or
    /// non-finite endpoints.
    #[error("Invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },

    /// Solver settings are invalid or could not be read.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// A numerical kernel failed (singular system, singular normal
    /// equations, dimension mismatch).
    #[error(transparent)]
    Math(#[from] MathError),
}

impl BvpError {
    /// Creates an invalid grid error.
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns the underlying kernel error, if any.
    pub fn as_math(&self) -> Option<&MathError> {
        match self {
            Self::Math(e) => Some(e),
            _ => None,
        }
    }
}
