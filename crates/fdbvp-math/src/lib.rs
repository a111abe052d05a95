//! # fdbvp Math
//!
//! Numerical kernels for the fdbvp finite-difference boundary-value solver.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: Tridiagonal systems, the Thomas algorithm, and dense
//!   LU factorization with partial pivoting
//! - **Polynomials**: Canonical-basis polynomials, least-squares fitting via
//!   normal equations, exact interpolation, and text rendering
//!
//! ## Design Philosophy
//!
//! - **Fail loudly**: a vanishing pivot is an error carrying its step index,
//!   never a silently degraded result
//! - **Interchangeable solvers**: both solvers sit behind one trait and are
//!   selected by [`SolveMethod`](linear_algebra::SolveMethod)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod linear_algebra;
pub mod polynomial;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        DenseSolver, SolveMethod, ThomasSolver, TridiagonalSolver, TridiagonalSystem,
        DEFAULT_PIVOT_TOLERANCE,
    };
    pub use crate::polynomial::{Polynomial, PolynomialFitter, PolynomialFormat};
}

pub use error::{MathError, MathResult};
