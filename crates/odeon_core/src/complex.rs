//! Complex-plane helpers shared by the root finder and the clusterer.

use num_complex::Complex64;

use crate::{Result, SolveError};

/// Maximum Euclidean distance at which two numeric roots are considered the
/// same underlying root.
pub const CLUSTER_TOLERANCE: f64 = 1e-6;

/// Extensions over [`Complex64`] used throughout the solver pipeline.
pub trait ComplexOps: Sized {
    /// Division that fails instead of producing non-finite components when
    /// the divisor's squared magnitude has collapsed to numerical zero.
    fn try_div(self, rhs: Self) -> Result<Self>;

    /// Tolerance equality: Euclidean distance strictly below `tol`.
    fn approx_eq(self, other: Self, tol: f64) -> bool;
}

impl ComplexOps for Complex64 {
    fn try_div(self, rhs: Complex64) -> Result<Complex64> {
        if rhs.norm_sqr() <= f64::MIN_POSITIVE {
            return Err(SolveError::DivisionByZero);
        }
        Ok(self / rhs)
    }

    fn approx_eq(self, other: Complex64, tol: f64) -> bool {
        (self - other).norm() < tol
    }
}
