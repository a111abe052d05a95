//! Folding Dirichlet values into the assembled system.

use fdbvp_math::linear_algebra::TridiagonalSystem;

use crate::problem::BoundaryValues;

/// Moves the known boundary unknowns to the right-hand side.
///
/// The first interior equation couples to `y_0 = y0` through `a[0]` and the
/// last couples to `y_n = yk` through `c[m-1]`, so
/// `rhs[0] -= a[0]·y0` and `rhs[m-1] -= c[m-1]·yk`. With a single unknown
/// both adjustments land on the same row. Returns a new right-hand side and
/// leaves `system` untouched.
pub fn fold_dirichlet(system: &TridiagonalSystem, boundary: &BoundaryValues) -> Vec<f64> {
    let mut rhs = system.rhs().to_vec();
    let m = rhs.len();
    if m == 0 {
        return rhs;
    }

    rhs[0] -= system.sub_diagonal()[0] * boundary.y0;
    rhs[m - 1] -= system.super_diagonal()[m - 1] * boundary.yk;
    rhs
}
