//! Characteristic polynomials built from user-entered coefficients.
//!
//! Coefficients are stored highest degree first: `[1.0, -3.0, 2.0]` is
//! `r^2 - 3r + 2`. Construction validates the sequence, so every held
//! polynomial has degree >= 1 and a usable leading coefficient.

use num_complex::Complex64;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{Result, SolveError};

/// Smallest leading-coefficient magnitude accepted for a degree-n equation.
pub const LEADING_COEFFICIENT_EPSILON: f64 = 1e-10;

/// A validated characteristic polynomial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

/// One displayable term of the characteristic equation. Terms whose
/// coefficient magnitude falls below [`LEADING_COEFFICIENT_EPSILON`] are
/// elided from [`Polynomial::terms`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolyTerm {
    pub coefficient: f64,
    pub degree: usize,
}

impl Polynomial {
    /// Validates and wraps a coefficient sequence, highest degree first.
    pub fn new(coefficients: Vec<f64>) -> Result<Self> {
        if coefficients.len() < 2 {
            return Err(SolveError::InvalidInput(
                "At least two coefficients are required (order >= 1).".into(),
            ));
        }
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(SolveError::InvalidInput(
                "All coefficients must be finite numbers.".into(),
            ));
        }
        if coefficients[0].abs() < LEADING_COEFFICIENT_EPSILON {
            return Err(SolveError::InvalidInput(
                "The leading coefficient cannot be 0.".into(),
            ));
        }
        Ok(Self { coefficients })
    }

    /// Parses a comma- or whitespace-separated coefficient list, e.g.
    /// `"1, -3, 2"` or `"1 -3 2"`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SolveError::InvalidInput(
                "Enter the coefficients separated by commas.".into(),
            ));
        }
        let mut coefficients = Vec::new();
        for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let value: f64 = token
                .parse()
                .map_err(|_| SolveError::InvalidInput(format!("\"{token}\" is not a number.")))?;
            coefficients.push(value);
        }
        Self::new(coefficients)
    }

    /// Order of the differential equation this polynomial characterizes.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn leading_coefficient(&self) -> f64 {
        self.coefficients[0]
    }

    /// Evaluates the polynomial at `x` by Horner's scheme.
    pub fn eval(&self, x: Complex64) -> Complex64 {
        let mut acc = Complex64::zero();
        for &c in &self.coefficients {
            acc = acc * x + c;
        }
        acc
    }

    /// Returns the monic form, with the leading coefficient pinned to
    /// exactly 1.0 rather than left to division rounding.
    pub fn monic(&self) -> Result<Self> {
        let lead = self.coefficients[0];
        if lead.abs() < LEADING_COEFFICIENT_EPSILON {
            return Err(SolveError::InvalidLeadingCoefficient);
        }
        let mut coefficients: Vec<f64> = self.coefficients.iter().map(|c| c / lead).collect();
        coefficients[0] = 1.0;
        Ok(Self { coefficients })
    }

    /// Nonzero terms as (coefficient, degree) pairs, highest degree first.
    pub fn terms(&self) -> Vec<PolyTerm> {
        let n = self.degree();
        self.coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| c.abs() >= LEADING_COEFFICIENT_EPSILON)
            .map(|(i, &coefficient)| PolyTerm {
                coefficient,
                degree: n - i,
            })
            .collect()
    }
}
