//! Dense LU factorization with partial pivoting.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use super::{TridiagonalSolver, TridiagonalSystem, DEFAULT_PIVOT_TOLERANCE};
use crate::error::{MathError, MathResult};

/// LU factorization `P·A = L·U` of a square matrix.
///
/// `L` (unit lower triangular, diagonal not stored) and `U` share one
/// matrix. `permutation[i]` is the original row now sitting at row `i`.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: DMatrix<f64>,
    permutation: Vec<usize>,
}

impl LuDecomposition {
    /// Factors `matrix`, choosing the largest available pivot in each column.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidInput`] for a non-square matrix and
    /// [`MathError::SingularSystem`] if the best pivot of some column has
    /// magnitude below `tolerance`; `step` is that column.
    pub fn new(matrix: &DMatrix<f64>, tolerance: f64) -> MathResult<Self> {
        let n = matrix.nrows();
        if n != matrix.ncols() {
            return Err(MathError::invalid_input(
                "Matrix must be square for LU decomposition",
            ));
        }

        let mut lu = matrix.clone();
        let mut permutation: Vec<usize> = (0..n).collect();

        for k in 0..n {
            let mut pivot_row = k;
            for i in k + 1..n {
                if lu[(i, k)].abs() > lu[(pivot_row, k)].abs() {
                    pivot_row = i;
                }
            }

            let pivot = lu[(pivot_row, k)];
            if pivot.abs() < tolerance || !pivot.is_finite() {
                debug!("dense LU: pivot {pivot:e} in column {k} is below {tolerance:e}");
                return Err(MathError::singular_system(k, pivot));
            }

            if pivot_row != k {
                lu.swap_rows(k, pivot_row);
                permutation.swap(k, pivot_row);
            }

            for i in k + 1..n {
                let factor = lu[(i, k)] / lu[(k, k)];
                lu[(i, k)] = factor;
                for j in k + 1..n {
                    lu[(i, j)] -= factor * lu[(k, j)];
                }
            }
        }

        Ok(Self { lu, permutation })
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Row permutation applied during factorization.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Solves `A·x = b` with the stored factors.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] if `b` has the wrong length.
    pub fn solve(&self, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        let n = self.dim();
        if b.len() != n {
            return Err(MathError::dimension_mismatch("rhs", n, b.len()));
        }

        // Solve Ly = Pb (forward substitution)
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut sum = b[self.permutation[i]];
            for j in 0..i {
                sum -= self.lu[(i, j)] * y[j];
            }
            y[i] = sum;
        }

        // Solve Ux = y (back substitution)
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in i + 1..n {
                sum -= self.lu[(i, j)] * x[j];
            }
            x[i] = sum / self.lu[(i, i)];
        }

        Ok(x)
    }
}

/// Solves a linear system `A·x = b` using LU decomposition with partial
/// pivoting.
pub fn solve_linear_system(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    tolerance: f64,
) -> MathResult<DVector<f64>> {
    let n = a.nrows();
    if n != b.len() {
        return Err(MathError::dimension_mismatch("rhs", n, b.len()));
    }
    LuDecomposition::new(a, tolerance)?.solve(b)
}

/// Dense solver: expands the tridiagonal system and factors it.
#[derive(Debug, Clone, Copy)]
pub struct DenseSolver {
    tolerance: f64,
}

impl Default for DenseSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl DenseSolver {
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

impl TridiagonalSolver for DenseSolver {
    fn solve(&self, system: &TridiagonalSystem) -> MathResult<Vec<f64>> {
        if system.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = system.to_dense();
        let rhs = DVector::from_column_slice(system.rhs());
        let x = solve_linear_system(&matrix, &rhs, self.tolerance)?;
        trace!("dense LU solve finished for {} unknowns", system.len());
        Ok(x.iter().copied().collect())
    }

    fn name(&self) -> &'static str {
        "dense"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_algebra::ThomasSolver;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_linear_system() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 5.0]);

        let x = solve_linear_system(&a, &b, DEFAULT_PIVOT_TOLERANCE).unwrap();

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pivoting_handles_zero_leading_entry() {
        // Plain LU without pivoting divides by zero here
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 0.0, 3.0]);
        let b = DVector::from_vec(vec![2.0, 3.0, 4.0]);

        let lu = LuDecomposition::new(&a, DEFAULT_PIVOT_TOLERANCE).unwrap();
        assert_ne!(lu.permutation()[0], 0);

        let x = lu.solve(&b).unwrap();
        let residual = &a * &x - &b;
        assert!(residual.amax() < 1e-12);
    }

    #[test]
    fn test_singular_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);

        match solve_linear_system(&a, &b, DEFAULT_PIVOT_TOLERANCE) {
            Err(MathError::SingularSystem { step, .. }) => assert_eq!(step, 1),
            other => panic!("expected singular system, got {other:?}"),
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let a = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            LuDecomposition::new(&a, DEFAULT_PIVOT_TOLERANCE),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rhs_length_checked() {
        let a = DMatrix::<f64>::identity(3, 3);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(
            solve_linear_system(&a, &b, DEFAULT_PIVOT_TOLERANCE).unwrap_err(),
            MathError::dimension_mismatch("rhs", 3, 2)
        );
    }

    #[test]
    fn test_dense_solver_zero_system() {
        let system = TridiagonalSystem::new(vec![0.0], vec![0.0], vec![0.0], vec![1.0]).unwrap();
        let err = DenseSolver::default().solve(&system).unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_dense_survives_vanishing_thomas_pivot() {
        // Thomas fails at row 0 (b[0] = 0) but the matrix [[0, 1], [1, 0]] is invertible
        let system =
            TridiagonalSystem::new(vec![0.0, 1.0], vec![0.0, 0.0], vec![1.0, 0.0], vec![2.0, 3.0])
                .unwrap();

        assert!(ThomasSolver::default().solve(&system).is_err());

        let x = DenseSolver::default().solve(&system).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }
}
