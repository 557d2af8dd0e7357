//! Rational reconstruction of floating-point values for exact-looking
//! display, e.g. `1.5` as `3/2` and `0.1` as `1/10`.

use serde::{Deserialize, Serialize};

/// Settings for rational approximation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RationalSettings {
    /// Largest denominator a returned fraction may carry.
    pub max_denominator: i64,
    /// Absolute acceptance tolerance on `|numerator/denominator - x|`.
    pub tolerance: f64,
}

impl Default for RationalSettings {
    fn default() -> Self {
        Self {
            max_denominator: 1000,
            tolerance: 1e-10,
        }
    }
}

/// A fraction `numerator / denominator` with `denominator >= 1` and the sign
/// carried by the numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationalApproximation {
    pub numerator: i64,
    pub denominator: i64,
}

/// Values closer to an integer than this snap directly to `n/1`.
const INTEGER_SNAP: f64 = 1e-12;

/// Relative component of the acceptance tolerance, scaled by `|x|`.
const RELATIVE_EPSILON: f64 = 1e-12;

/// Upper bound on continued-fraction terms examined per value.
const MAX_PARTIAL_QUOTIENTS: usize = 20;

/// Finds a small fraction equal to `x` within tolerance, or `None` when no
/// denominator up to the limit reproduces it.
///
/// The search walks the continued-fraction expansion of `|x|`, testing each
/// convergent `p/q` until `q` exceeds the denominator limit. If no convergent
/// is accepted, every denominator up to the limit is tried directly with a
/// rounded numerator. The sign is restored on the numerator of the result.
pub fn approximate(x: f64, settings: RationalSettings) -> Option<RationalApproximation> {
    if !x.is_finite() {
        return None;
    }

    let rounded = x.round();
    if (x - rounded).abs() < INTEGER_SNAP {
        if rounded.abs() >= i64::MAX as f64 {
            return None;
        }
        return Some(RationalApproximation {
            numerator: rounded as i64,
            denominator: 1,
        });
    }

    let negative = x < 0.0;
    let magnitude = x.abs();
    let threshold = settings.tolerance.max(magnitude * RELATIVE_EPSILON);
    let accepted = |numerator: i64, denominator: i64| -> bool {
        (numerator as f64 / denominator as f64 - magnitude).abs() <= threshold
    };
    let signed = |numerator: i64, denominator: i64| -> RationalApproximation {
        RationalApproximation {
            numerator: if negative { -numerator } else { numerator },
            denominator,
        }
    };

    // Convergent recurrence p_k = a_k p_{k-1} + p_{k-2} (same for q), seeded
    // so the first pass yields p_0 = a_0, q_0 = 1. Partial quotients large
    // enough to overflow i64 end the walk; the cast below saturates rather
    // than wrapping, and the checked arithmetic catches it.
    let mut p_prev = 0i64;
    let mut q_prev = 1i64;
    let mut p_last = 1i64;
    let mut q_last = 0i64;
    let mut value = magnitude;

    for _ in 0..MAX_PARTIAL_QUOTIENTS {
        let quotient = value.floor();
        let a = quotient as i64;
        let p = match a.checked_mul(p_last).and_then(|v| v.checked_add(p_prev)) {
            Some(p) => p,
            None => break,
        };
        let q = match a.checked_mul(q_last).and_then(|v| v.checked_add(q_prev)) {
            Some(q) => q,
            None => break,
        };
        if q > settings.max_denominator {
            break;
        }
        if accepted(p, q) {
            return Some(signed(p, q));
        }
        p_prev = p_last;
        q_prev = q_last;
        p_last = p;
        q_last = q;

        let fractional = value - quotient;
        if fractional == 0.0 {
            break;
        }
        value = fractional.recip();
    }

    // Brute-force fallback for values whose convergents skip past the
    // denominator limit.
    for denominator in 1..=settings.max_denominator {
        let numerator = (magnitude * denominator as f64).round();
        if (numerator / denominator as f64 - magnitude).abs() <= threshold {
            return Some(signed(numerator as i64, denominator));
        }
    }

    None
}
