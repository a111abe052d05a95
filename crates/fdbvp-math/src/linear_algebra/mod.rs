//! Linear algebra for finite-difference systems.
//!
//! A second-order stencil produces a tridiagonal matrix. Two solvers are
//! provided behind the [`TridiagonalSolver`] trait:
//!
//! - [`ThomasSolver`]: O(m) forward sweep and back substitution
//! - [`DenseSolver`]: expands the system to an `m×m` matrix and solves it by
//!   LU factorization with partial pivoting, O(m³)
//!
//! Both must agree on any well-posed system; the dense path exists as a
//! cross-check and as a fallback when a Thomas pivot vanishes on a matrix
//! that is nonetheless invertible.
//!
//! # Example
//!
//! ```rust
//! use fdbvp_math::linear_algebra::{SolveMethod, TridiagonalSystem};
//!
//! let system = TridiagonalSystem::new(
//!     vec![0.0, 1.0, 1.0],
//!     vec![2.0, 2.0, 2.0],
//!     vec![1.0, 1.0, 0.0],
//!     vec![1.0, 2.0, 3.0],
//! )
//! .unwrap();
//!
//! let thomas = SolveMethod::Thomas.solver(1e-14).solve(&system).unwrap();
//! let dense = SolveMethod::Dense.solver(1e-14).solve(&system).unwrap();
//! for (t, d) in thomas.iter().zip(dense.iter()) {
//!     assert!((t - d).abs() < 1e-12);
//! }
//! ```

mod dense;
mod tridiagonal;

pub use dense::{solve_linear_system, DenseSolver, LuDecomposition};
pub use tridiagonal::{back_substitute, forward_sweep, solve_tridiagonal, ThomasSolver, ThomasSweep};

use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default absolute pivot tolerance for both solvers.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-14;

/// A tridiagonal linear system over `m` unknowns.
///
/// All four sequences have length `m`. Row `k` reads
/// `a[k]·x[k-1] + b[k]·x[k] + c[k]·x[k+1] = rhs[k]`, so `a[0]` and `c[m-1]`
/// couple to values outside the system. Solvers ignore them; in a
/// boundary-value problem they carry the boundary coupling that is folded
/// into the right-hand side before solving.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// Creates a system from sub-diagonal, diagonal, super-diagonal and
    /// right-hand side.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] unless all four sequences
    /// have the same length.
    pub fn new(a: Vec<f64>, b: Vec<f64>, c: Vec<f64>, rhs: Vec<f64>) -> MathResult<Self> {
        let m = b.len();
        if a.len() != m {
            return Err(MathError::dimension_mismatch("sub-diagonal", m, a.len()));
        }
        if c.len() != m {
            return Err(MathError::dimension_mismatch("super-diagonal", m, c.len()));
        }
        if rhs.len() != m {
            return Err(MathError::dimension_mismatch("rhs", m, rhs.len()));
        }
        Ok(Self { a, b, c, rhs })
    }

    /// Returns a system with no unknowns.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
            rhs: Vec::new(),
        }
    }

    /// Returns a copy of this system with a different right-hand side.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] if `rhs` has the wrong length.
    pub fn with_rhs(&self, rhs: Vec<f64>) -> MathResult<Self> {
        Self::new(self.a.clone(), self.b.clone(), self.c.clone(), rhs)
    }

    /// Number of unknowns.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    /// Returns true if the system has no unknowns.
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Sub-diagonal coefficients.
    pub fn sub_diagonal(&self) -> &[f64] {
        &self.a
    }

    /// Diagonal coefficients.
    pub fn diagonal(&self) -> &[f64] {
        &self.b
    }

    /// Super-diagonal coefficients.
    pub fn super_diagonal(&self) -> &[f64] {
        &self.c
    }

    /// Right-hand side.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Expands the system into its full `m×m` matrix.
    ///
    /// `b` goes on the diagonal, `a[1..]` below it and `c[..m-1]` above it.
    /// Everything else is zero.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let m = self.len();
        let mut matrix = DMatrix::zeros(m, m);
        for i in 0..m {
            matrix[(i, i)] = self.b[i];
            if i > 0 {
                matrix[(i, i - 1)] = self.a[i];
            }
            if i + 1 < m {
                matrix[(i, i + 1)] = self.c[i];
            }
        }
        matrix
    }

    /// Maximum absolute residual `|A·x - rhs|` of a candidate solution.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] if `x` has the wrong length.
    pub fn max_residual(&self, x: &[f64]) -> MathResult<f64> {
        let m = self.len();
        if x.len() != m {
            return Err(MathError::dimension_mismatch("solution", m, x.len()));
        }

        let mut worst: f64 = 0.0;
        for i in 0..m {
            let mut lhs = self.b[i] * x[i];
            if i > 0 {
                lhs += self.a[i] * x[i - 1];
            }
            if i + 1 < m {
                lhs += self.c[i] * x[i + 1];
            }
            worst = worst.max((lhs - self.rhs[i]).abs());
        }
        Ok(worst)
    }
}

/// A solver for [`TridiagonalSystem`]s.
pub trait TridiagonalSolver: Send + Sync {
    /// Solves the system, returning one value per unknown.
    ///
    /// An empty system yields an empty solution.
    fn solve(&self, system: &TridiagonalSystem) -> MathResult<Vec<f64>>;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Selects which [`TridiagonalSolver`] handles a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveMethod {
    /// Thomas algorithm (sweep method).
    #[default]
    Thomas,
    /// Dense LU factorization of the expanded matrix.
    #[serde(alias = "matrix")]
    Dense,
}

impl SolveMethod {
    /// Both methods, fast path first.
    pub const ALL: [SolveMethod; 2] = [SolveMethod::Thomas, SolveMethod::Dense];

    /// Builds the solver for this method.
    #[must_use]
    pub fn solver(self, tolerance: f64) -> Box<dyn TridiagonalSolver> {
        match self {
            SolveMethod::Thomas => Box::new(ThomasSolver::new(tolerance)),
            SolveMethod::Dense => Box::new(DenseSolver::new(tolerance)),
        }
    }

    /// Returns the lower-case name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveMethod::Thomas => "thomas",
            SolveMethod::Dense => "dense",
        }
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolveMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thomas" | "tdma" | "sweep" => Ok(SolveMethod::Thomas),
            "dense" | "matrix" | "lu" => Ok(SolveMethod::Dense),
            other => Err(MathError::invalid_input(format!(
                "unknown solve method '{other}', expected 'thomas' or 'dense'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_system() -> TridiagonalSystem {
        TridiagonalSystem::new(
            vec![0.0, -1.0, -1.0, -1.0],
            vec![2.0, 2.0, 2.0, 2.0],
            vec![-1.0, -1.0, -1.0, 0.0],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_unequal_lengths() {
        let err = TridiagonalSystem::new(vec![0.0; 3], vec![1.0; 3], vec![0.0; 2], vec![1.0; 3])
            .unwrap_err();
        assert_eq!(err, MathError::dimension_mismatch("super-diagonal", 3, 2));

        let err = TridiagonalSystem::new(vec![0.0; 3], vec![1.0; 3], vec![0.0; 3], vec![1.0; 4])
            .unwrap_err();
        assert!(matches!(err, MathError::DimensionMismatch { what: "rhs", .. }));
    }

    #[test]
    fn test_to_dense_layout() {
        let system = TridiagonalSystem::new(
            vec![9.0, 1.0, 2.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
            vec![0.0; 3],
        )
        .unwrap();
        let m = system.to_dense();

        // a[0] and c[2] are boundary coupling and never enter the matrix
        let expected = DMatrix::from_row_slice(3, 3, &[4.0, 7.0, 0.0, 1.0, 5.0, 8.0, 0.0, 2.0, 6.0]);
        assert_eq!(m, expected);
    }

    #[test]
    fn test_methods_agree() {
        let system = sample_system();
        let thomas = SolveMethod::Thomas.solver(DEFAULT_PIVOT_TOLERANCE).solve(&system).unwrap();
        let dense = SolveMethod::Dense.solver(DEFAULT_PIVOT_TOLERANCE).solve(&system).unwrap();

        // 1D Laplacian with unit ends: solution is all ones
        for (t, d) in thomas.iter().zip(dense.iter()) {
            assert_relative_eq!(*t, 1.0, epsilon = 1e-12);
            assert_relative_eq!(*t, *d, epsilon = 1e-12);
        }
        assert!(system.max_residual(&thomas).unwrap() < 1e-12);
    }

    #[test]
    fn test_empty_system() {
        let system = TridiagonalSystem::empty();
        assert!(system.is_empty());
        for method in SolveMethod::ALL {
            assert!(method.solver(DEFAULT_PIVOT_TOLERANCE).solve(&system).unwrap().is_empty());
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("thomas".parse::<SolveMethod>().unwrap(), SolveMethod::Thomas);
        assert_eq!("Matrix".parse::<SolveMethod>().unwrap(), SolveMethod::Dense);
        assert!("cholesky".parse::<SolveMethod>().is_err());
        assert_eq!(SolveMethod::Dense.to_string(), "dense");
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&SolveMethod::Dense).unwrap();
        assert_eq!(json, "\"dense\"");
        let parsed: SolveMethod = serde_json::from_str("\"matrix\"").unwrap();
        assert_eq!(parsed, SolveMethod::Dense);
    }
}
