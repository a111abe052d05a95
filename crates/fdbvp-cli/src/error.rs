//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A coefficient list could not be parsed.
    #[error("Invalid coefficient list '{0}'. Use comma-separated numbers, lowest power first (e.g. 0,-1).")]
    InvalidCoefficients(String),

    /// Too few points requested for sampling.
    #[error("Invalid sample count: {0}. Must be at least 2.")]
    InvalidSampleCount(usize),

    /// Settings could not be loaded.
    #[error("Invalid settings: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
