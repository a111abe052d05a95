//! Least-squares and exact polynomial fitting in the canonical basis.

use std::collections::HashSet;

use log::debug;
use nalgebra::{DMatrix, DVector};

use super::Polynomial;
use crate::error::{MathError, MathResult};
use crate::linear_algebra::LuDecomposition;

/// Default cap on the fitted degree when the caller does not choose one.
pub const DEFAULT_MAX_FIT_DEGREE: usize = 5;

/// Removes nodes whose `x` repeats an earlier node, keeping the first.
///
/// Repeated abscissae make the normal-equations matrix singular.
///
/// # Errors
///
/// Returns [`MathError::DimensionMismatch`] if `xs` and `ys` differ in length.
pub fn distinct_nodes(xs: &[f64], ys: &[f64]) -> MathResult<(Vec<f64>, Vec<f64>)> {
    if xs.len() != ys.len() {
        return Err(MathError::dimension_mismatch("ys", xs.len(), ys.len()));
    }

    let mut seen = HashSet::with_capacity(xs.len());
    let mut kept_x = Vec::with_capacity(xs.len());
    let mut kept_y = Vec::with_capacity(ys.len());
    for (&x, &y) in xs.iter().zip(ys) {
        // -0.0 and 0.0 are the same node
        let key = if x == 0.0 { 0.0_f64.to_bits() } else { x.to_bits() };
        if seen.insert(key) {
            kept_x.push(x);
            kept_y.push(y);
        }
    }
    Ok((kept_x, kept_y))
}

/// Monomial design matrix with rows `[1, x, x², ..., x^degree]`.
fn design_matrix(xs: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), degree + 1, |i, j| xs[i].powi(j as i32))
}

/// Column-equilibrated design matrix and the norm each column was divided by.
///
/// A zero column keeps a unit norm so it still shows up as a zero pivot.
fn scaled_design_matrix(xs: &[f64], degree: usize) -> (DMatrix<f64>, Vec<f64>) {
    let raw = design_matrix(xs, degree);
    let norms: Vec<f64> = raw
        .column_iter()
        .map(|column| {
            let norm = column.norm();
            if norm > 0.0 && norm.is_finite() {
                norm
            } else {
                1.0
            }
        })
        .collect();
    let scaled = DMatrix::from_fn(raw.nrows(), raw.ncols(), |i, j| raw[(i, j)] / norms[j]);
    (scaled, norms)
}

/// Undoes column scaling: `a_j = b_j / norm_j`.
fn unscale(solution: &DVector<f64>, norms: &[f64]) -> Vec<f64> {
    solution.iter().zip(norms).map(|(b, norm)| b / norm).collect()
}

/// Largest absolute diagonal entry, at least one.
fn diagonal_scale(matrix: &DMatrix<f64>) -> f64 {
    matrix.diagonal().iter().fold(1.0_f64, |acc, v| acc.max(v.abs()))
}

/// Least-squares fit of a degree-`degree` polynomial through distinct nodes.
///
/// Forms the normal equations `(XᵗX)·a = Xᵗy` over the monomial design
/// matrix `X` and solves them by LU factorization. Columns of `X` are scaled
/// to unit norm first, so singularity is judged independently of the size of
/// the interval.
///
/// # Errors
///
/// Returns [`MathError::SingularNormalEquations`] if `degree + 1` exceeds the
/// number of nodes or the normal-equations matrix is numerically singular.
pub fn fit_least_squares(xs: &[f64], ys: &[f64], degree: usize) -> MathResult<Polynomial> {
    if xs.len() != ys.len() {
        return Err(MathError::dimension_mismatch("ys", xs.len(), ys.len()));
    }
    let points = xs.len();
    if degree + 1 > points {
        return Err(MathError::singular_normal_equations(degree, points));
    }

    let (x, norms) = scaled_design_matrix(xs, degree);
    let y = DVector::from_column_slice(ys);
    let xt = x.transpose();
    let xtx = &xt * &x;
    let xty = &xt * &y;

    let tolerance = f64::EPSILON * diagonal_scale(&xtx);
    let lu = LuDecomposition::new(&xtx, tolerance).map_err(|e| match e {
        MathError::SingularSystem { .. } => MathError::singular_normal_equations(degree, points),
        other => other,
    })?;
    let coefficients = unscale(&lu.solve(&xty)?, &norms);

    debug!("least-squares fit: degree {degree} through {points} nodes");
    Ok(Polynomial::new(coefficients))
}

/// The unique polynomial of degree `k-1` through `k` distinct nodes.
///
/// Solves the square Vandermonde system directly.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] for no nodes and
/// [`MathError::SingularNormalEquations`] if nodes repeat or the Vandermonde
/// matrix is numerically singular.
pub fn interpolate_canonical(xs: &[f64], ys: &[f64]) -> MathResult<Polynomial> {
    if xs.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    let (distinct, _) = distinct_nodes(xs, ys)?;
    let degree = xs.len() - 1;
    if distinct.len() != xs.len() {
        return Err(MathError::singular_normal_equations(degree, distinct.len()));
    }

    let (vandermonde, norms) = scaled_design_matrix(xs, degree);
    let tolerance = f64::EPSILON * vandermonde.amax().max(1.0);
    let lu = LuDecomposition::new(&vandermonde, tolerance).map_err(|e| match e {
        MathError::SingularSystem { .. } => MathError::singular_normal_equations(degree, xs.len()),
        other => other,
    })?;
    let coefficients = lu.solve(&DVector::from_column_slice(ys))?;

    Ok(Polynomial::new(unscale(&coefficients, &norms)))
}

/// Fits canonical polynomials to grid solutions.
///
/// Duplicate nodes are dropped before fitting. Without an explicit degree the
/// fitter uses `min(max_degree, distinct_nodes - 1)`.
///
/// # Example
///
/// ```rust
/// use fdbvp_math::polynomial::PolynomialFitter;
///
/// let xs = [-1.0, 0.0, 1.0];
/// let ys = [2.0, 1.0, 2.0];
///
/// let p = PolynomialFitter::default().fit(&xs, &ys, None).unwrap();
/// assert_eq!(p.degree(), 2);
/// assert!((p.evaluate(0.0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PolynomialFitter {
    max_degree: usize,
}

impl Default for PolynomialFitter {
    fn default() -> Self {
        Self {
            max_degree: DEFAULT_MAX_FIT_DEGREE,
        }
    }
}

impl PolynomialFitter {
    /// Creates a fitter with the given default-degree cap.
    #[must_use]
    pub fn new(max_degree: usize) -> Self {
        Self { max_degree }
    }

    /// Returns the default-degree cap.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Degree used when the caller does not request one.
    pub fn default_degree(&self, distinct_points: usize) -> usize {
        self.max_degree.min(distinct_points.saturating_sub(1))
    }

    /// Fits a polynomial through `(xs, ys)`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::DimensionMismatch`] for unequal lengths,
    /// [`MathError::InsufficientData`] for no points, and
    /// [`MathError::SingularNormalEquations`] when the requested degree cannot
    /// be fitted through the distinct nodes.
    pub fn fit(&self, xs: &[f64], ys: &[f64], degree: Option<usize>) -> MathResult<Polynomial> {
        let (xs, ys) = distinct_nodes(xs, ys)?;
        if xs.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        let degree = degree.unwrap_or_else(|| self.default_degree(xs.len()));
        fit_least_squares(&xs, &ys, degree)
    }
}
