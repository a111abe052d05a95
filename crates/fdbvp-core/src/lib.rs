//! # fdbvp Core
//!
//! Finite-difference solver for linear two-point boundary-value problems
//!
//! ```text
//! y'' + p(x)·y' + q(x)·y = f(x),   y(x0) = y0,   y(xk) = yk
//! ```
//!
//! followed by a least-squares polynomial approximation of the discrete
//! solution.
//!
//! ## Pipeline
//!
//! 1. [`Grid::uniform`] partitions `[x0, xk]` into `n` equal intervals
//! 2. [`assemble`] samples `p`, `q`, `f` at the interior nodes and builds the
//!    central-difference tridiagonal system
//! 3. [`fold_dirichlet`] moves the boundary values to the right-hand side
//! 4. The Thomas algorithm or a dense LU solve produces the interior values
//! 5. [`BvpSolver::fit`] fits a canonical-basis polynomial through the nodes
//!
//! Every stage returns fresh buffers; a failure at any stage is returned to
//! the caller unchanged.
//!
//! ## Example
//!
//! ```rust
//! use fdbvp_core::prelude::*;
//!
//! let problem = LinearBvp::new(|x: f64| -x, |x: f64| x * x, |x: f64| 2.0 * x + 1.0)
//!     .on_interval(1.0, 2.0)
//!     .with_boundary(0.0, 2.0);
//!
//! let solver = BvpSolver::default();
//! let solution = solver.solve_with(&problem, 8, SolveMethod::Thomas).unwrap();
//! assert_eq!(solution.nodes()[8], 2.0);
//! assert_eq!(solution.values()[8], 2.0);
//!
//! let poly = solver.fit(&solution, None).unwrap();
//! assert_eq!(poly.degree(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

pub mod assembly;
pub mod boundary;
pub mod config;
pub mod error;
pub mod grid;
pub mod problem;
pub mod solver;

pub use assembly::{assemble, assemble_from_samples, CoefficientSamples};
pub use boundary::fold_dirichlet;
pub use config::SolverSettings;
pub use error::{BvpError, BvpResult};
pub use grid::Grid;
pub use problem::{BoundaryValues, Coefficient, LinearBvp};
pub use solver::{fit, solve, BvpSolution, BvpSolver, MethodComparison};

pub use fdbvp_math::linear_algebra::SolveMethod;
pub use fdbvp_math::polynomial::{Polynomial, PolynomialFormat};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::SolverSettings;
    pub use crate::error::{BvpError, BvpResult};
    pub use crate::grid::Grid;
    pub use crate::problem::{BoundaryValues, Coefficient, LinearBvp};
    pub use crate::solver::{BvpSolution, BvpSolver, MethodComparison};
    pub use fdbvp_math::linear_algebra::SolveMethod;
    pub use fdbvp_math::polynomial::{Polynomial, PolynomialFormat};
}
