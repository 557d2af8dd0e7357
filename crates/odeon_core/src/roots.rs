//! Durand-Kerner simultaneous root iteration.
//!
//! All root estimates are refined together: each pass applies the
//! Weierstrass correction `p(r_i) / prod(r_i - r_j)` to every estimate in
//! turn, reading the already-updated positions of earlier estimates. The
//! iteration stops once the largest correction of a pass drops below the
//! configured tolerance or the pass budget runs out.

use num_complex::Complex64;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::complex::ComplexOps;
use crate::polynomial::Polynomial;
use crate::Result;

/// Settings controlling the Durand-Kerner iteration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DurandKernerSettings {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for DurandKernerSettings {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-12,
        }
    }
}

/// Outcome of a root-finding run. `roots` keeps the estimates in their
/// discovery order; no sorting or deduplication happens here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFindResult {
    pub roots: Vec<Complex64>,
    pub iterations: usize,
    pub converged: bool,
    /// Largest correction magnitude of the final pass.
    pub last_correction: f64,
}

/// Nudge applied to a root estimate that has collided with another.
/// Repeated roots can collapse two estimates onto one point mid-iteration;
/// moving one of them apart keeps the Weierstrass denominator nonzero while
/// staying far inside the clustering tolerance.
const COLLISION_NUDGE: Complex64 = Complex64::new(1e-8, 1e-8);

/// Finds all complex roots of `polynomial` by Durand-Kerner iteration.
///
/// Estimates start evenly spaced on the unit circle (estimate `k` at angle
/// `2 * pi * k / n`) and are refined in place. The returned roots are raw
/// numeric estimates; grouping into multiplicity clusters is a separate step.
pub fn find_roots(
    polynomial: &Polynomial,
    settings: DurandKernerSettings,
) -> Result<RootFindResult> {
    let monic = polynomial.monic()?;
    let n = monic.degree();

    let mut roots: Vec<Complex64> = (0..n)
        .map(|k| {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
            Complex64::new(angle.cos(), angle.sin())
        })
        .collect();

    let mut iterations = 0;
    let mut converged = false;
    let mut last_correction = 0.0f64;

    for _ in 0..settings.max_iterations {
        let mut max_delta = 0.0f64;
        for i in 0..n {
            let mut nudges = 0;
            let denom = loop {
                match separation_product(&roots, i) {
                    Some(product) => break product,
                    None if nudges == n => break Complex64::new(0.0, 0.0),
                    None => {
                        roots[i] += COLLISION_NUDGE;
                        nudges += 1;
                    }
                }
            };
            let delta = monic.eval(roots[i]).try_div(denom)?;
            roots[i] -= delta;
            max_delta = max_delta.max(delta.norm());
        }
        iterations += 1;
        last_correction = max_delta;
        if max_delta < settings.tolerance {
            converged = true;
            break;
        }
    }

    Ok(RootFindResult {
        roots,
        iterations,
        converged,
        last_correction,
    })
}

/// Product of the separations from estimate `i` to every other estimate.
/// `None` when some separation has collapsed to rounding noise: a few-ulp
/// gap turns evaluation noise into an O(1) correction, so collapse is
/// judged at the estimate's own scale, not against exact zero.
fn separation_product(roots: &[Complex64], i: usize) -> Option<Complex64> {
    let mut product = Complex64::one();
    let collapse = f64::EPSILON.powi(2) * (1.0 + roots[i].norm_sqr());
    for (j, &other) in roots.iter().enumerate() {
        if j == i {
            continue;
        }
        let factor = roots[i] - other;
        if factor.norm_sqr() <= collapse {
            return None;
        }
        product *= factor;
    }
    Some(product)
}
