//! Human-readable rendering of canonical polynomials.

/// Default number of decimals when rendering coefficients.
pub const DEFAULT_DISPLAY_PRECISION: usize = 4;

/// Controls how [`render_polynomial`] prints coefficients.
///
/// Terms whose coefficient magnitude is below `threshold` are omitted. The
/// leading printed term carries a sign only when it is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFormat {
    /// Decimals per coefficient.
    pub precision: usize,
    /// Magnitude below which a term is suppressed.
    pub threshold: f64,
    /// Strip trailing zeros (and a dangling decimal point) from coefficients.
    pub trim_zeros: bool,
    /// Optional left-hand side, rendered as `"{label} = ..."`.
    pub label: Option<String>,
}

impl Default for PolynomialFormat {
    fn default() -> Self {
        Self::with_precision(DEFAULT_DISPLAY_PRECISION)
    }
}

impl PolynomialFormat {
    /// Fixed-decimal format whose threshold is `10^-(precision + 1)`.
    #[must_use]
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision,
            threshold: 10f64.powi(-(precision as i32) - 1),
            trim_zeros: false,
            label: None,
        }
    }

    /// Sets the suppression threshold.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Strips trailing zeros from printed coefficients.
    #[must_use]
    pub fn trimmed(mut self) -> Self {
        self.trim_zeros = true;
        self
    }

    /// Prefixes the expression with `"{label} = "`.
    #[must_use]
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn number(&self, value: f64) -> String {
        let text = format!("{:.*}", self.precision, value);
        if !self.trim_zeros || !text.contains('.') {
            return text;
        }
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Renders increasing-power coefficients as `a0 + a1 * x + a2 * x^2 ...`.
///
/// # Example
///
/// ```rust
/// use fdbvp_math::polynomial::{render_polynomial, PolynomialFormat};
///
/// let text = render_polynomial(&[1.0, 0.0, -2.5], &PolynomialFormat::with_precision(2));
/// assert_eq!(text, "1.00 - 2.50 * x^2");
///
/// let text = render_polynomial(&[-1.0, 0.5], &PolynomialFormat::default().trimmed().labeled("P(x)"));
/// assert_eq!(text, "P(x) = -1 + 0.5 * x");
/// ```
pub fn render_polynomial(coefficients: &[f64], format: &PolynomialFormat) -> String {
    let mut out = String::new();

    for (power, &a) in coefficients.iter().enumerate() {
        if a.abs() < format.threshold {
            continue;
        }

        let value = if out.is_empty() {
            format.number(a)
        } else {
            out.push_str(if a >= 0.0 { " + " } else { " - " });
            format.number(a.abs())
        };

        match power {
            0 => out.push_str(&value),
            1 => {
                out.push_str(&value);
                out.push_str(" * x");
            }
            _ => {
                out.push_str(&value);
                out.push_str(" * x^");
                out.push_str(&power.to_string());
            }
        }
    }

    if out.is_empty() {
        out.push('0');
    }

    match &format.label {
        Some(label) => format!("{label} = {out}"),
        None => out,
    }
}
