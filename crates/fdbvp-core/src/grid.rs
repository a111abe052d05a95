//! Uniform grids over the solution interval.

use serde::Serialize;

use crate::error::{BvpError, BvpResult};

/// A uniform partition of `[x0, xk]` into `n` intervals.
///
/// Holds the `n + 1` nodes `x_i = x0 + i·h` with `h = (xk - x0) / n`. The last
/// node is exactly `xk`. Nodes are strictly monotone: increasing when
/// `x0 < xk`, decreasing when the interval is given backwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    nodes: Vec<f64>,
    step: f64,
}

impl Grid {
    /// Builds the uniform grid with `n` intervals.
    ///
    /// # Errors
    ///
    /// Returns [`BvpError::InvalidGrid`] if `n < 1`, the endpoints are not
    /// finite, or `x0 == xk`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fdbvp_core::Grid;
    ///
    /// let grid = Grid::uniform(1.0, 2.0, 4).unwrap();
    /// assert_eq!(grid.nodes(), &[1.0, 1.25, 1.5, 1.75, 2.0]);
    /// assert_eq!(grid.step(), 0.25);
    /// ```
    pub fn uniform(x0: f64, xk: f64, n: usize) -> BvpResult<Self> {
        if n < 1 {
            return Err(BvpError::invalid_grid("n must be at least 1"));
        }
        if !x0.is_finite() || !xk.is_finite() {
            return Err(BvpError::invalid_grid(format!(
                "interval endpoints must be finite, got [{x0}, {xk}]"
            )));
        }
        if x0 == xk {
            return Err(BvpError::invalid_grid(format!(
                "degenerate interval: x0 == xk == {x0}"
            )));
        }

        let step = (xk - x0) / n as f64;
        let nodes = (0..=n)
            .map(|i| if i == n { xk } else { x0 + i as f64 * step })
            .collect();

        Ok(Self { nodes, step })
    }

    /// All nodes, boundaries included.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Grid step `h`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of intervals `n`.
    pub fn intervals(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of nodes `n + 1`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a grid has at least two nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Left boundary `x0`.
    pub fn start(&self) -> f64 {
        self.nodes[0]
    }

    /// Right boundary `xk`.
    pub fn end(&self) -> f64 {
        self.nodes[self.nodes.len() - 1]
    }

    /// Interior nodes `x_1..x_{n-1}`, one per unknown.
    pub fn interior(&self) -> &[f64] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Consumes the grid, returning its nodes.
    pub fn into_nodes(self) -> Vec<f64> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid() {
        let grid = Grid::uniform(1.0, 2.0, 8).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.intervals(), 8);
        assert_relative_eq!(grid.step(), 0.125);
        assert_eq!(grid.start(), 1.0);
        assert_eq!(grid.end(), 2.0);
        assert_eq!(grid.interior().len(), 7);
        assert!(grid.nodes().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_last_node_is_exact() {
        let grid = Grid::uniform(0.1, 0.7, 3).unwrap();
        assert_eq!(grid.end(), 0.7);
    }

    #[test]
    fn test_single_interval_has_no_interior() {
        let grid = Grid::uniform(0.0, 1.0, 1).unwrap();
        assert_eq!(grid.nodes(), &[0.0, 1.0]);
        assert!(grid.interior().is_empty());
    }

    #[test]
    fn test_reversed_interval() {
        let grid = Grid::uniform(2.0, 0.0, 4).unwrap();
        assert_relative_eq!(grid.step(), -0.5);
        assert!(grid.nodes().windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_invalid_grids() {
        assert!(matches!(
            Grid::uniform(0.0, 1.0, 0),
            Err(BvpError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::uniform(1.0, 1.0, 4),
            Err(BvpError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::uniform(f64::NAN, 1.0, 4),
            Err(BvpError::InvalidGrid { .. })
        ));
    }
}
