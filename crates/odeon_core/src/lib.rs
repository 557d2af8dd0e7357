//! The `odeon_core` crate provides the numerical engine for Odeon, a
//! characteristic-equation calculator for linear constant-coefficient
//! ordinary differential equations.
//!
//! Key components:
//! - **Polynomial**: validated coefficient sequences with Horner evaluation.
//! - **Roots**: Durand-Kerner simultaneous root iteration.
//! - **Cluster**: proximity grouping of numeric roots into multiplicity clusters.
//! - **Solution**: conjugate pairing and ordered solution-term assembly.
//! - **Rational**: continued-fraction approximation for fraction display.

pub mod cluster;
pub mod complex;
pub mod format;
pub mod polynomial;
pub mod rational;
pub mod roots;
pub mod solution;
pub mod solve;

use thiserror::Error;

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Coefficient input rejected before any algorithm ran. The message is
    /// user-facing and shown as-is by the presentation layer.
    #[error("{0}")]
    InvalidInput(String),

    #[error("leading coefficient is too close to zero")]
    InvalidLeadingCoefficient,

    #[error("complex division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, SolveError>;
