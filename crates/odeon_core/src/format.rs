//! Text rendering of polynomials, roots, and assembled solutions.
//!
//! Numeric values are rendered through a preference ladder: exact integer,
//! small fraction, square root of a small fraction, then plain decimal.

use num_complex::Complex64;

use crate::polynomial::Polynomial;
use crate::rational::{approximate, RationalSettings};
use crate::solution::{GeneralSolution, SolutionTerm};

/// Rational settings used for display output, coarser than the solver's
/// default so that root-finder artifacts still read as clean fractions.
const DISPLAY_RATIONAL: RationalSettings = RationalSettings {
    max_denominator: 200,
    tolerance: 1e-8,
};

/// Magnitudes below this display as zero, and values this close to an
/// integer display as that integer.
const DISPLAY_ZERO: f64 = 1e-12;

/// Formats a scalar for display: near-integers as integers, extreme
/// magnitudes in scientific notation, everything else with at most six
/// decimals and trailing zeros trimmed.
pub fn format_scalar(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = x.round();
    if (x - rounded).abs() < DISPLAY_ZERO {
        return if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{rounded:.0}")
        };
    }
    if x.abs() >= 1e6 || x.abs() < 1e-4 {
        return format!("{x:.6e}");
    }
    format!("{x:.6}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Renders `x` as an integer, a fraction, a square root of a fraction, or a
/// plain decimal, in that order of preference.
pub fn fraction_or_decimal(x: f64, settings: RationalSettings) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let rounded = x.round();
    if (x - rounded).abs() < DISPLAY_ZERO {
        return if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{rounded:.0}")
        };
    }
    if let Some(fraction) = approximate(x, settings) {
        return render_fraction(fraction.numerator, fraction.denominator);
    }
    // Quadratic surds show up as exact squares: sqrt(2) squares to 2.
    if let Some(square) = approximate(x * x, settings) {
        let sign = if x < 0.0 { "-" } else { "" };
        let inner = render_fraction(square.numerator, square.denominator);
        return format!("{sign}√({inner})");
    }
    format_scalar(x)
}

fn render_fraction(numerator: i64, denominator: i64) -> String {
    if denominator == 1 {
        numerator.to_string()
    } else {
        format!("{numerator}/{denominator}")
    }
}

/// Renders a coefficient multiplying x: `2x`, `3/2x`, `x`, `-x`, or `0`.
pub fn coefficient_times_x(a: f64) -> String {
    if !a.is_finite() {
        return format!("{a}x");
    }
    if a.abs() < DISPLAY_ZERO {
        return "0".to_string();
    }
    if (a - 1.0).abs() < DISPLAY_ZERO {
        return "x".to_string();
    }
    if (a + 1.0).abs() < DISPLAY_ZERO {
        return "-x".to_string();
    }
    // Rational snapping can resolve a near-unit coefficient to exactly 1.
    match fraction_or_decimal(a, DISPLAY_RATIONAL).as_str() {
        "1" => "x".to_string(),
        "-1" => "-x".to_string(),
        s => format!("{s}x"),
    }
}

/// Fraction-aware rendering of a complex value: `3/2`, `1i`, `1 + 2i`,
/// `1 - 2i`. Components below display tolerance are treated as zero.
pub fn format_complex(z: Complex64) -> String {
    let re = if z.re.abs() < DISPLAY_ZERO { 0.0 } else { z.re };
    let im = if z.im.abs() < DISPLAY_ZERO { 0.0 } else { z.im };
    if im == 0.0 {
        return fraction_or_decimal(re, DISPLAY_RATIONAL);
    }
    let imaginary = format!("{}i", fraction_or_decimal(im.abs(), DISPLAY_RATIONAL));
    if re == 0.0 {
        return if im > 0.0 {
            imaginary
        } else {
            format!("-{imaginary}")
        };
    }
    let join = if im > 0.0 { " + " } else { " - " };
    format!(
        "{}{join}{imaginary}",
        fraction_or_decimal(re, DISPLAY_RATIONAL)
    )
}

/// Renders the characteristic equation, e.g. `r^2 - 3r + 2 = 0`.
pub fn polynomial_equation(polynomial: &Polynomial) -> String {
    let parts: Vec<String> = polynomial
        .terms()
        .iter()
        .map(|term| {
            let coefficient = if term.coefficient.abs() == 1.0 && term.degree > 0 {
                if term.coefficient > 0.0 {
                    String::new()
                } else {
                    "-".to_string()
                }
            } else {
                format_scalar(term.coefficient)
            };
            let variable = match term.degree {
                0 => String::new(),
                1 => "r".to_string(),
                d => format!("r^{d}"),
            };
            format!("{coefficient}{variable}")
        })
        .collect();
    if parts.is_empty() {
        return "0 = 0".to_string();
    }
    format!("{} = 0", parts.join(" + ").replace("+ -", "- "))
}

/// Renders the general solution as text, e.g. `y(x) = C1 e^x + C2 x e^x`.
pub fn solution_expression(solution: &GeneralSolution) -> String {
    if solution.terms.is_empty() {
        return "y(x) = 0".to_string();
    }
    let parts: Vec<String> = solution.terms.iter().map(render_term).collect();
    format!("y(x) = {}", parts.join(" + "))
}

fn render_term(term: &SolutionTerm) -> String {
    match *term {
        SolutionTerm::RealExponential {
            constant,
            degree,
            alpha,
        } => {
            let mut pieces = vec![format!("C{constant}")];
            if let Some(power) = repetition_factor(degree) {
                pieces.push(power);
            }
            if let Some(exponential) = exponential_factor(alpha) {
                pieces.push(exponential);
            }
            pieces.join(" ")
        }
        SolutionTerm::ComplexOscillation {
            cos_constant,
            sin_constant,
            degree,
            alpha,
            beta,
        } => {
            let angle = coefficient_times_x(beta);
            let oscillation =
                format!("C{cos_constant} cos({angle}) + C{sin_constant} sin({angle})");
            let mut pieces = Vec::new();
            if let Some(exponential) = exponential_factor(alpha) {
                pieces.push(exponential);
            }
            if let Some(power) = repetition_factor(degree) {
                pieces.push(power);
            }
            if pieces.is_empty() {
                oscillation
            } else {
                pieces.push(format!("({oscillation})"));
                pieces.join(" ")
            }
        }
    }
}

fn repetition_factor(degree: usize) -> Option<String> {
    match degree {
        0 => None,
        1 => Some("x".to_string()),
        d => Some(format!("x^{d}")),
    }
}

fn exponential_factor(alpha: f64) -> Option<String> {
    if alpha.abs() < DISPLAY_ZERO {
        return None;
    }
    Some(match coefficient_times_x(alpha).as_str() {
        "x" => "e^x".to_string(),
        "-x" => "e^{-x}".to_string(),
        argument => format!("e^{{{argument}}}"),
    })
}
