//! Problem definition: `y'' + p(x)·y' + q(x)·y = f(x)` on `[x0, xk]`.

use fdbvp_math::polynomial::Polynomial;
use serde::{Deserialize, Serialize};

/// A coefficient function `ℝ → ℝ`, evaluated pointwise at grid nodes.
///
/// Implemented for every `Fn(f64) -> f64` and for [`Polynomial`].
pub trait Coefficient {
    /// Value of the coefficient at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl<F> Coefficient for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

impl Coefficient for Polynomial {
    fn eval(&self, x: f64) -> f64 {
        self.evaluate(x)
    }
}

/// Dirichlet boundary values `y(x0) = y0`, `y(xk) = yk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryValues {
    /// Value at the left boundary.
    pub y0: f64,
    /// Value at the right boundary.
    pub yk: f64,
}

impl BoundaryValues {
    /// Creates a boundary value pair.
    #[must_use]
    pub fn new(y0: f64, yk: f64) -> Self {
        Self { y0, yk }
    }
}

/// A linear second-order two-point boundary-value problem.
///
/// # Example
///
/// ```rust
/// use fdbvp_core::LinearBvp;
///
/// // y'' - x·y' + x²·y = 2x + 1, y(1) = 0, y(2) = 2
/// let problem = LinearBvp::new(|x: f64| -x, |x: f64| x * x, |x: f64| 2.0 * x + 1.0)
///     .on_interval(1.0, 2.0)
///     .with_boundary(0.0, 2.0);
/// assert_eq!(problem.x0, 1.0);
/// assert_eq!(problem.boundary.yk, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearBvp<P, Q, F> {
    /// Coefficient of `y'`.
    pub p: P,
    /// Coefficient of `y`.
    pub q: Q,
    /// Right-hand side.
    pub f: F,
    /// Left end of the interval.
    pub x0: f64,
    /// Right end of the interval.
    pub xk: f64,
    /// Dirichlet values at both ends.
    pub boundary: BoundaryValues,
}

impl<P, Q, F> LinearBvp<P, Q, F>
where
    P: Coefficient,
    Q: Coefficient,
    F: Coefficient,
{
    /// Creates a problem on `[0, 1]` with homogeneous boundary values.
    #[must_use]
    pub fn new(p: P, q: Q, f: F) -> Self {
        Self {
            p,
            q,
            f,
            x0: 0.0,
            xk: 1.0,
            boundary: BoundaryValues::new(0.0, 0.0),
        }
    }

    /// Sets the interval `[x0, xk]`.
    #[must_use]
    pub fn on_interval(mut self, x0: f64, xk: f64) -> Self {
        self.x0 = x0;
        self.xk = xk;
        self
    }

    /// Sets the Dirichlet values `y(x0) = y0`, `y(xk) = yk`.
    #[must_use]
    pub fn with_boundary(mut self, y0: f64, yk: f64) -> Self {
        self.boundary = BoundaryValues::new(y0, yk);
        self
    }
}
