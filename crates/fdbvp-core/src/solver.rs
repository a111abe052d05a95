//! End-to-end solve: grid, assembly, boundary folding, linear solve, fit.

use fdbvp_math::linear_algebra::SolveMethod;
use fdbvp_math::polynomial::{Polynomial, PolynomialFitter};
use serde::Serialize;
use tracing::{debug, warn};

use crate::assembly::assemble;
use crate::boundary::fold_dirichlet;
use crate::config::SolverSettings;
use crate::error::BvpResult;
use crate::grid::Grid;
use crate::problem::{Coefficient, LinearBvp};

/// Grid values of a solved boundary-value problem.
///
/// `values[0]` and `values[n]` are the boundary values, copied exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BvpSolution {
    grid: Grid,
    values: Vec<f64>,
    method: SolveMethod,
}

impl BvpSolution {
    /// The grid the solution lives on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid nodes `x_0..x_n`.
    pub fn nodes(&self) -> &[f64] {
        self.grid.nodes()
    }

    /// Solution values `y_0..y_n`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Computed values `y_1..y_{n-1}`.
    pub fn interior_values(&self) -> &[f64] {
        &self.values[1..self.values.len() - 1]
    }

    /// Method that produced the interior values.
    pub fn method(&self) -> SolveMethod {
        self.method
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a solution has at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(x_i, y_i)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.grid
            .nodes()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Consumes the solution, returning `(nodes, values)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.grid.into_nodes(), self.values)
    }
}

/// Thomas and dense solutions of the same problem side by side.
#[derive(Debug, Clone, Serialize)]
pub struct MethodComparison {
    /// Thomas-algorithm solution.
    pub thomas: BvpSolution,
    /// Dense LU solution.
    pub dense: BvpSolution,
    /// Largest absolute difference over interior values.
    pub max_abs_diff: f64,
    /// Largest relative difference over interior values.
    pub max_rel_diff: f64,
}

impl MethodComparison {
    fn new(thomas: BvpSolution, dense: BvpSolution) -> Self {
        let mut max_abs_diff: f64 = 0.0;
        let mut max_rel_diff: f64 = 0.0;
        for (&t, &d) in thomas.values().iter().zip(dense.values()) {
            let diff = (t - d).abs();
            let scale = t.abs().max(d.abs()).max(f64::MIN_POSITIVE);
            max_abs_diff = max_abs_diff.max(diff);
            max_rel_diff = max_rel_diff.max(diff / scale);
        }
        Self {
            thomas,
            dense,
            max_abs_diff,
            max_rel_diff,
        }
    }

    /// True if every value agrees within `relative` tolerance, or within
    /// `relative` absolutely for values near zero.
    pub fn agrees_within(&self, relative: f64) -> bool {
        self.thomas
            .values()
            .iter()
            .zip(self.dense.values())
            .all(|(&t, &d)| (t - d).abs() <= relative * t.abs().max(d.abs()).max(1.0))
    }
}

/// Finite-difference boundary-value solver.
///
/// # Example
///
/// ```rust
/// use fdbvp_core::{BvpSolver, LinearBvp};
///
/// // y'' = 0 with y(0) = 1, y(1) = 3: the straight line 1 + 2x
/// let problem = LinearBvp::new(|_: f64| 0.0, |_: f64| 0.0, |_: f64| 0.0)
///     .on_interval(0.0, 1.0)
///     .with_boundary(1.0, 3.0);
///
/// let solver = BvpSolver::default();
/// let solution = solver.solve(&problem, 4).unwrap();
/// assert_eq!(solution.values()[0], 1.0);
/// assert_eq!(solution.values()[4], 3.0);
/// assert!((solution.values()[2] - 2.0).abs() < 1e-12);
///
/// let poly = solver.fit(&solution, Some(1)).unwrap();
/// assert!((poly.coefficients()[1] - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BvpSolver {
    settings: SolverSettings,
}

impl BvpSolver {
    /// Creates a solver with validated settings.
    pub fn new(settings: SolverSettings) -> BvpResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the settings.
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Solves on an `n`-interval grid with the configured method.
    pub fn solve<P, Q, F>(&self, problem: &LinearBvp<P, Q, F>, n: usize) -> BvpResult<BvpSolution>
    where
        P: Coefficient,
        Q: Coefficient,
        F: Coefficient,
    {
        self.solve_with(problem, n, self.settings.method)
    }

    /// Solves on an `n`-interval grid with an explicit method.
    ///
    /// # Errors
    ///
    /// - [`BvpError::InvalidGrid`](crate::BvpError::InvalidGrid) for `n < 1`
    ///   or a degenerate interval
    /// - [`MathError::SingularSystem`](fdbvp_math::MathError::SingularSystem)
    ///   when a pivot vanishes
    pub fn solve_with<P, Q, F>(
        &self,
        problem: &LinearBvp<P, Q, F>,
        n: usize,
        method: SolveMethod,
    ) -> BvpResult<BvpSolution>
    where
        P: Coefficient,
        Q: Coefficient,
        F: Coefficient,
    {
        let grid = Grid::uniform(problem.x0, problem.xk, n)?;
        let system = assemble(&grid, &problem.p, &problem.q, &problem.f)?;
        let folded = system.with_rhs(fold_dirichlet(&system, &problem.boundary))?;

        let solver = method.solver(self.settings.pivot_tolerance);
        let interior = solver.solve(&folded).map_err(|e| {
            warn!(method = solver.name(), n, error = %e, "linear solve failed");
            e
        })?;

        let mut values = Vec::with_capacity(grid.len());
        values.push(problem.boundary.y0);
        values.extend(interior);
        values.push(problem.boundary.yk);

        debug!(method = %method, n, unknowns = folded.len(), "boundary-value problem solved");
        Ok(BvpSolution {
            grid,
            values,
            method,
        })
    }

    /// Solves with both methods and measures their disagreement.
    pub fn compare<P, Q, F>(&self, problem: &LinearBvp<P, Q, F>, n: usize) -> BvpResult<MethodComparison>
    where
        P: Coefficient,
        Q: Coefficient,
        F: Coefficient,
    {
        let thomas = self.solve_with(problem, n, SolveMethod::Thomas)?;
        let dense = self.solve_with(problem, n, SolveMethod::Dense)?;
        let comparison = MethodComparison::new(thomas, dense);
        debug!(
            max_abs_diff = comparison.max_abs_diff,
            max_rel_diff = comparison.max_rel_diff,
            "compared thomas and dense"
        );
        Ok(comparison)
    }

    /// Fits a canonical polynomial through the solution.
    ///
    /// Without `degree` the fitter uses `min(max_fit_degree, distinct - 1)`.
    pub fn fit(&self, solution: &BvpSolution, degree: Option<usize>) -> BvpResult<Polynomial> {
        fit_with(solution.nodes(), solution.values(), degree, self.settings.max_fit_degree)
    }

    /// Renders a polynomial as `P(x) = ...` with the configured precision.
    pub fn render(&self, polynomial: &Polynomial) -> String {
        polynomial.render(&self.settings.polynomial_format().labeled("P(x)"))
    }
}

fn fit_with(
    nodes: &[f64],
    values: &[f64],
    degree: Option<usize>,
    max_degree: usize,
) -> BvpResult<Polynomial> {
    let polynomial = PolynomialFitter::new(max_degree).fit(nodes, values, degree)?;
    debug!(degree = polynomial.degree(), points = nodes.len(), "fitted polynomial");
    Ok(polynomial)
}

/// Solves `y'' + p·y' + q·y = f`, `y(x0) = y0`, `y(xk) = yk` on `n` intervals
/// with default settings.
#[allow(clippy::too_many_arguments)]
pub fn solve<P, Q, F>(
    p: P,
    q: Q,
    f: F,
    x0: f64,
    xk: f64,
    y0: f64,
    yk: f64,
    n: usize,
    method: SolveMethod,
) -> BvpResult<BvpSolution>
where
    P: Coefficient,
    Q: Coefficient,
    F: Coefficient,
{
    let problem = LinearBvp::new(p, q, f)
        .on_interval(x0, xk)
        .with_boundary(y0, yk);
    BvpSolver::default().solve_with(&problem, n, method)
}

/// Least-squares canonical polynomial through `(grid, solution)`.
///
/// Uses the default degree cap when `degree` is `None`.
pub fn fit(grid: &[f64], solution: &[f64], degree: Option<usize>) -> BvpResult<Polynomial> {
    fit_with(
        grid,
        solution,
        degree,
        SolverSettings::default().max_fit_degree,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BvpError;
    use approx::assert_relative_eq;
    use fdbvp_math::MathError;

    fn zero(_: f64) -> f64 {
        0.0
    }

    #[test]
    fn test_linear_solution_is_exact() {
        for method in SolveMethod::ALL {
            let solution = solve(zero, zero, zero, 0.0, 2.0, -1.0, 3.0, 10, method).unwrap();
            for (x, y) in solution.points() {
                assert_relative_eq!(y, -1.0 + 2.0 * x, epsilon = 1e-12);
            }
            assert_eq!(solution.method(), method);
        }
    }

    #[test]
    fn test_boundaries_copied_exactly() {
        let solution = solve(
            |x: f64| x.sin(),
            |x: f64| -1.0 - x,
            |x: f64| x.exp(),
            0.3,
            1.7,
            0.1,
            0.2,
            7,
            SolveMethod::Thomas,
        )
        .unwrap();
        assert_eq!(solution.values()[0], 0.1);
        assert_eq!(solution.values()[7], 0.2);
        assert_eq!(solution.interior_values().len(), 6);
    }

    #[test]
    fn test_single_interval() {
        let solution = solve(zero, zero, zero, 0.0, 1.0, 5.0, 6.0, 1, SolveMethod::Dense).unwrap();
        assert_eq!(solution.values(), &[5.0, 6.0]);
        assert!(solution.interior_values().is_empty());
    }

    #[test]
    fn test_invalid_grid_propagates() {
        let err = solve(zero, zero, zero, 0.0, 1.0, 0.0, 1.0, 0, SolveMethod::Thomas).unwrap_err();
        assert!(matches!(err, BvpError::InvalidGrid { .. }));
    }

    #[test]
    fn test_singular_pivot_propagates() {
        // n = 2, h = 1: b = -2 + q, so q = 2 zeroes the only pivot
        let err = solve(zero, |_: f64| 2.0, zero, 0.0, 2.0, 0.0, 1.0, 2, SolveMethod::Thomas)
            .unwrap_err();
        assert_eq!(err.as_math(), Some(&MathError::singular_system(0, 0.0)));

        let err = solve(zero, |_: f64| 2.0, zero, 0.0, 2.0, 0.0, 1.0, 2, SolveMethod::Dense)
            .unwrap_err();
        assert!(err.as_math().is_some_and(MathError::is_singular));
    }

    #[test]
    fn test_compare_agrees() {
        let problem = LinearBvp::new(|x: f64| -x, |x: f64| x * x, |x: f64| 2.0 * x + 1.0)
            .on_interval(1.0, 2.0)
            .with_boundary(0.0, 2.0);
        let comparison = BvpSolver::default().compare(&problem, 16).unwrap();
        assert!(comparison.agrees_within(1e-10));
        assert!(comparison.max_abs_diff < 1e-10);
    }

    #[test]
    fn test_solver_uses_configured_method() {
        let settings = SolverSettings::default().with_method(SolveMethod::Dense);
        let solver = BvpSolver::new(settings).unwrap();
        let problem = LinearBvp::new(zero, zero, zero).with_boundary(0.0, 1.0);
        assert_eq!(solver.solve(&problem, 4).unwrap().method(), SolveMethod::Dense);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = SolverSettings::default().with_pivot_tolerance(0.0);
        assert!(matches!(BvpSolver::new(settings), Err(BvpError::Config { .. })));
    }

    #[test]
    fn test_fit_and_render() {
        let solver = BvpSolver::default();
        let problem = LinearBvp::new(zero, zero, zero)
            .on_interval(0.0, 1.0)
            .with_boundary(1.0, 3.0);
        let solution = solver.solve(&problem, 4).unwrap();

        // Five nodes: default degree 4, but the data is a line
        let poly = solver.fit(&solution, None).unwrap();
        assert_eq!(poly.degree(), 4);
        assert_eq!(solver.render(&poly), "P(x) = 1.0000 + 2.0000 * x");
    }

    #[test]
    fn test_fit_free_function_reports_singular_normal_equations() {
        let err = fit(&[0.0, 1.0], &[1.0, 2.0], Some(2)).unwrap_err();
        assert_eq!(
            err.as_math(),
            Some(&MathError::singular_normal_equations(2, 2))
        );
    }
}
