//! Polynomials in the canonical (monomial) basis.
//!
//! - [`Polynomial`]: coefficients `a_0..a_d` of `a_0 + a_1·x + ... + a_d·x^d`
//! - [`PolynomialFitter`]: least-squares fit through a set of nodes
//! - [`interpolate_canonical`]: the unique interpolant through distinct nodes
//! - [`PolynomialFormat`]: human-readable rendering

mod fit;
mod format;

pub use fit::{
    distinct_nodes, fit_least_squares, interpolate_canonical, PolynomialFitter,
    DEFAULT_MAX_FIT_DEGREE,
};
pub use format::{render_polynomial, PolynomialFormat, DEFAULT_DISPLAY_PRECISION};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A polynomial stored as increasing-power coefficients.
///
/// # Example
///
/// ```rust
/// use fdbvp_math::polynomial::Polynomial;
///
/// // 1 + 2x + 3x²
/// let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(p.degree(), 2);
/// assert_eq!(p.evaluate(2.0), 17.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from increasing-power coefficients.
    ///
    /// An empty coefficient list is the zero polynomial.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self::zero();
        }
        Self { coefficients }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coefficients: vec![0.0],
        }
    }

    /// Increasing-power coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Consumes the polynomial, returning its coefficients.
    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    /// Nominal degree (number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &a| acc * x + a)
    }

    /// Evaluates the polynomial at `count` evenly spaced points of `[x0, xk]`,
    /// endpoints included.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InsufficientData`] if `count < 2`.
    pub fn sample(&self, x0: f64, xk: f64, count: usize) -> MathResult<Vec<(f64, f64)>> {
        if count < 2 {
            return Err(MathError::insufficient_data(2, count));
        }
        let step = (xk - x0) / (count - 1) as f64;
        Ok((0..count)
            .map(|i| {
                let x = if i == count - 1 { xk } else { x0 + i as f64 * step };
                (x, self.evaluate(x))
            })
            .collect())
    }

    /// Largest `|P(x_i) - y_i|` over the given points.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] if `xs` and `ys` differ in length.
    pub fn max_residual(&self, xs: &[f64], ys: &[f64]) -> MathResult<f64> {
        if xs.len() != ys.len() {
            return Err(MathError::dimension_mismatch("ys", xs.len(), ys.len()));
        }
        Ok(xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (self.evaluate(x) - y).abs())
            .fold(0.0, f64::max))
    }

    /// Renders the polynomial with the given format.
    pub fn render(&self, format: &PolynomialFormat) -> String {
        render_polynomial(&self.coefficients, format)
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&PolynomialFormat::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horner_matches_naive() {
        let p = Polynomial::new(vec![0.5, -1.0, 0.25, 2.0]);
        for &x in &[-2.0, -0.3, 0.0, 1.0, 3.7] {
            let naive: f64 = p
                .coefficients()
                .iter()
                .enumerate()
                .map(|(k, a)| a * f64::powi(x, k as i32))
                .sum();
            assert_relative_eq!(p.evaluate(x), naive, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_is_zero() {
        let p = Polynomial::new(vec![]);
        assert_eq!(p, Polynomial::zero());
        assert_eq!(p.degree(), 0);
        assert_eq!(p.evaluate(42.0), 0.0);
    }

    #[test]
    fn test_sample_includes_endpoints() {
        let p = Polynomial::new(vec![0.0, 1.0]);
        let points = p.sample(1.0, 2.0, 5).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], (1.0, 1.0));
        assert_eq!(points[4], (2.0, 2.0));
        assert_relative_eq!(points[2].0, 1.5);

        assert!(p.sample(1.0, 2.0, 1).is_err());
    }

    #[test]
    fn test_max_residual() {
        let p = Polynomial::new(vec![1.0, 1.0]);
        let r = p.max_residual(&[0.0, 1.0, 2.0], &[1.0, 2.5, 3.0]).unwrap();
        assert_relative_eq!(r, 0.5);
        assert!(p.max_residual(&[0.0], &[]).is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let p = Polynomial::new(vec![1.0, -2.0]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.0,-2.0]");
    }
}
