//! Solver settings.
//!
//! Settings are plain serde data so they can come from a TOML file:
//!
//! ```toml
//! method = "dense"
//! pivot_tolerance = 1e-14
//! max_fit_degree = 5
//! display_precision = 4
//! ```
//!
//! Missing keys take their defaults.

use std::path::Path;

use fdbvp_math::linear_algebra::{SolveMethod, DEFAULT_PIVOT_TOLERANCE};
use fdbvp_math::polynomial::{PolynomialFormat, DEFAULT_DISPLAY_PRECISION, DEFAULT_MAX_FIT_DEGREE};
use serde::{Deserialize, Serialize};

use crate::error::{BvpError, BvpResult};

/// Largest accepted display precision.
pub const MAX_DISPLAY_PRECISION: usize = 15;

/// Settings shared by every solve and fit of a [`BvpSolver`](crate::BvpSolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Default linear solver.
    #[serde(default)]
    pub method: SolveMethod,

    /// Absolute pivot tolerance for both solvers.
    #[serde(default = "default_pivot_tolerance")]
    pub pivot_tolerance: f64,

    /// Cap on the fitted degree when none is requested.
    #[serde(default = "default_max_fit_degree")]
    pub max_fit_degree: usize,

    /// Decimals when rendering fitted polynomials.
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,
}

fn default_pivot_tolerance() -> f64 {
    DEFAULT_PIVOT_TOLERANCE
}

fn default_max_fit_degree() -> usize {
    DEFAULT_MAX_FIT_DEGREE
}

fn default_display_precision() -> usize {
    DEFAULT_DISPLAY_PRECISION
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: SolveMethod::default(),
            pivot_tolerance: default_pivot_tolerance(),
            max_fit_degree: default_max_fit_degree(),
            display_precision: default_display_precision(),
        }
    }
}

impl SolverSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> BvpResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| BvpError::config(format!("invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads and validates settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> BvpResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BvpError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Renders the settings as TOML.
    pub fn to_toml_string(&self) -> BvpResult<String> {
        toml::to_string(self).map_err(|e| BvpError::config(format!("cannot serialize settings: {e}")))
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> BvpResult<()> {
        let mut problems = Vec::new();

        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance <= 0.0 {
            problems.push(format!(
                "pivot_tolerance must be finite and positive, got {}",
                self.pivot_tolerance
            ));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            problems.push(format!(
                "display_precision must be at most {MAX_DISPLAY_PRECISION}, got {}",
                self.display_precision
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BvpError::config(problems.join("; ")))
        }
    }

    /// Sets the default method.
    #[must_use]
    pub fn with_method(mut self, method: SolveMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the pivot tolerance.
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Sets the default-degree cap.
    #[must_use]
    pub fn with_max_fit_degree(mut self, degree: usize) -> Self {
        self.max_fit_degree = degree;
        self
    }

    /// Sets the display precision.
    #[must_use]
    pub fn with_display_precision(mut self, precision: usize) -> Self {
        self.display_precision = precision;
        self
    }

    /// Polynomial format matching `display_precision`.
    pub fn polynomial_format(&self) -> PolynomialFormat {
        PolynomialFormat::with_precision(self.display_precision)
    }
}
