//! Central-difference discretization of `y'' + p·y' + q·y = f`.
//!
//! At interior node `x_i` the second derivative uses the stencil
//! `(y_{i-1} - 2·y_i + y_{i+1}) / h²` and the first derivative
//! `(y_{i+1} - y_{i-1}) / 2h`. Multiplying through by `h²` gives row `k = i - 1`:
//!
//! ```text
//! a[k]   = 1 - p(x_i)·h/2
//! b[k]   = -2 + h²·q(x_i)
//! c[k]   = 1 + p(x_i)·h/2
//! rhs[k] = h²·f(x_i)
//! ```

use fdbvp_math::linear_algebra::TridiagonalSystem;
use serde::Serialize;
use tracing::debug;

use crate::error::BvpResult;
use crate::grid::Grid;
use crate::problem::Coefficient;

/// `p`, `q` and `f` sampled once at every interior node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoefficientSamples {
    /// Interior nodes `x_1..x_{n-1}`.
    pub nodes: Vec<f64>,
    /// `p(x_i)`.
    pub p: Vec<f64>,
    /// `q(x_i)`.
    pub q: Vec<f64>,
    /// `f(x_i)`.
    pub f: Vec<f64>,
}

impl CoefficientSamples {
    /// Samples the coefficients at the interior nodes of `grid`.
    pub fn at_interior<P, Q, F>(grid: &Grid, p: &P, q: &Q, f: &F) -> Self
    where
        P: Coefficient + ?Sized,
        Q: Coefficient + ?Sized,
        F: Coefficient + ?Sized,
    {
        let nodes = grid.interior().to_vec();
        Self {
            p: nodes.iter().map(|&x| p.eval(x)).collect(),
            q: nodes.iter().map(|&x| q.eval(x)).collect(),
            f: nodes.iter().map(|&x| f.eval(x)).collect(),
            nodes,
        }
    }

    /// Number of sampled nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no interior nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the tridiagonal stencil system from sampled coefficients.
///
/// `step` is the grid step `h`.
pub fn assemble_from_samples(step: f64, samples: &CoefficientSamples) -> BvpResult<TridiagonalSystem> {
    let half_step = step / 2.0;
    let step_sq = step * step;

    let a = samples.p.iter().map(|&p| 1.0 - p * half_step).collect();
    let b = samples.q.iter().map(|&q| -2.0 + step_sq * q).collect();
    let c = samples.p.iter().map(|&p| 1.0 + p * half_step).collect();
    let rhs = samples.f.iter().map(|&f| step_sq * f).collect();

    Ok(TridiagonalSystem::new(a, b, c, rhs)?)
}

/// Samples `p`, `q`, `f` on `grid` and assembles the stencil system.
///
/// The system has one row per interior node; a one-interval grid gives an
/// empty system.
pub fn assemble<P, Q, F>(grid: &Grid, p: &P, q: &Q, f: &F) -> BvpResult<TridiagonalSystem>
where
    P: Coefficient + ?Sized,
    Q: Coefficient + ?Sized,
    F: Coefficient + ?Sized,
{
    let samples = CoefficientSamples::at_interior(grid, p, q, f);
    debug!(unknowns = samples.len(), step = grid.step(), "assembling stencil");
    assemble_from_samples(grid.step(), &samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stencil_coefficients() {
        let grid = Grid::uniform(1.0, 2.0, 4).unwrap();
        let system = assemble(&grid, &|x: f64| -x, &|x: f64| x * x, &|x: f64| 2.0 * x + 1.0).unwrap();
        let h = 0.25;

        assert_eq!(system.len(), 3);
        for (k, &x) in grid.interior().iter().enumerate() {
            assert_relative_eq!(system.sub_diagonal()[k], 1.0 + x * h / 2.0, epsilon = 1e-15);
            assert_relative_eq!(system.diagonal()[k], -2.0 + h * h * x * x, epsilon = 1e-15);
            assert_relative_eq!(system.super_diagonal()[k], 1.0 - x * h / 2.0, epsilon = 1e-15);
            assert_relative_eq!(system.rhs()[k], h * h * (2.0 * x + 1.0), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_samples_are_interior_only() {
        let grid = Grid::uniform(0.0, 1.0, 5).unwrap();
        let samples = CoefficientSamples::at_interior(&grid, &|x: f64| x, &|_: f64| 1.0, &|x: f64| -x);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples.nodes, grid.interior().to_vec());
        assert_eq!(samples.p, samples.nodes);
        assert!(samples.q.iter().all(|&q| q == 1.0));
    }

    #[test]
    fn test_single_interval_gives_empty_system() {
        let grid = Grid::uniform(0.0, 1.0, 1).unwrap();
        let system = assemble(&grid, &|_: f64| 1.0, &|_: f64| 1.0, &|_: f64| 1.0).unwrap();
        assert!(system.is_empty());
    }
}
