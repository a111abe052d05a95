//! Thomas algorithm (tridiagonal matrix algorithm).

use log::{debug, trace};

use super::{TridiagonalSolver, TridiagonalSystem, DEFAULT_PIVOT_TOLERANCE};
use crate::error::{MathError, MathResult};

/// Normalized coefficients produced by the forward sweep.
///
/// After the sweep each row reads `x[i] + alpha[i]·x[i+1] = beta[i]`.
/// `alpha` of the last row is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ThomasSweep {
    /// Normalized super-diagonal.
    pub alpha: Vec<f64>,
    /// Normalized right-hand side.
    pub beta: Vec<f64>,
}

/// Forward elimination pass of the Thomas algorithm.
///
/// The pivot of row `i` is `b[i] - a[i]·alpha[i-1]`. The sweep stops at the
/// first pivot whose magnitude is below `tolerance`.
///
/// # Errors
///
/// Returns [`MathError::SingularSystem`] with the failing row index.
pub fn forward_sweep(system: &TridiagonalSystem, tolerance: f64) -> MathResult<ThomasSweep> {
    let a = system.sub_diagonal();
    let b = system.diagonal();
    let c = system.super_diagonal();
    let d = system.rhs();
    let m = system.len();

    let mut alpha = vec![0.0; m];
    let mut beta = vec![0.0; m];

    for i in 0..m {
        let (alpha_prev, beta_prev) = if i == 0 {
            (0.0, 0.0)
        } else {
            (alpha[i - 1], beta[i - 1])
        };

        let denom = b[i] - a[i] * alpha_prev;
        if denom.abs() < tolerance || !denom.is_finite() {
            debug!("thomas sweep: pivot {denom:e} at row {i} is below {tolerance:e}");
            return Err(MathError::singular_system(i, denom));
        }

        if i < m - 1 {
            alpha[i] = c[i] / denom;
        }
        beta[i] = (d[i] - a[i] * beta_prev) / denom;
    }

    Ok(ThomasSweep { alpha, beta })
}

/// Back substitution pass of the Thomas algorithm.
pub fn back_substitute(sweep: &ThomasSweep) -> Vec<f64> {
    let m = sweep.beta.len();
    if m == 0 {
        return Vec::new();
    }

    let mut x = vec![0.0; m];
    x[m - 1] = sweep.beta[m - 1];
    for i in (0..m - 1).rev() {
        x[i] = sweep.beta[i] - sweep.alpha[i] * x[i + 1];
    }
    x
}

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// The system has the form:
/// ```text
/// | b[0]  c[0]   0    ...    0     | | x[0]   |   | d[0]   |
/// | a[1]  b[1]  c[1]  ...    0     | | x[1]   |   | d[1]   |
/// |  0    a[2]  b[2]  ...    0     | | x[2]   | = | d[2]   |
/// | ...   ...   ...   ...   ...    | | ...    |   | ...    |
/// |  0     0     0   a[m-1] b[m-1] | | x[m-1] |   | d[m-1] |
/// ```
///
/// # Errors
///
/// Returns [`MathError::SingularSystem`] if a pivot magnitude falls below
/// `tolerance`.
pub fn solve_tridiagonal(system: &TridiagonalSystem, tolerance: f64) -> MathResult<Vec<f64>> {
    let sweep = forward_sweep(system, tolerance)?;
    trace!("thomas sweep finished for {} unknowns", system.len());
    Ok(back_substitute(&sweep))
}

/// Thomas algorithm solver.
///
/// # Example
///
/// ```rust
/// use fdbvp_math::linear_algebra::{ThomasSolver, TridiagonalSolver, TridiagonalSystem};
///
/// let system = TridiagonalSystem::new(
///     vec![0.0, 1.0],
///     vec![4.0, 4.0],
///     vec![1.0, 0.0],
///     vec![5.0, 5.0],
/// )
/// .unwrap();
///
/// let x = ThomasSolver::default().solve(&system).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThomasSolver {
    tolerance: f64,
}

impl Default for ThomasSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl ThomasSolver {
    /// Creates a solver with the given pivot tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns the pivot tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl TridiagonalSolver for ThomasSolver {
    fn solve(&self, system: &TridiagonalSystem) -> MathResult<Vec<f64>> {
        solve_tridiagonal(system, self.tolerance)
    }

    fn name(&self) -> &'static str {
        "thomas"
    }
}
