//! End-to-end solve pipeline: validate, find roots, cluster, assemble, and
//! render, collected into one serializable report.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cluster::{cluster_roots, RootClass, RootCluster};
use crate::format::{format_complex, polynomial_equation, solution_expression};
use crate::polynomial::{PolyTerm, Polynomial};
use crate::roots::{find_roots, DurandKernerSettings};
use crate::solution::{assemble_solution, GeneralSolution};
use crate::Result;

/// One numeric root as presented to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootRecord {
    /// 1-based position in discovery order.
    pub index: usize,
    pub value: Complex64,
    pub class: RootClass,
    /// Fraction-aware rendering of `value`.
    pub display: String,
}

/// Aggregate outcome of one solve run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub degree: usize,
    pub polynomial: Vec<PolyTerm>,
    pub equation: String,
    pub roots: Vec<RootRecord>,
    pub iterations: usize,
    pub converged: bool,
    pub clusters: Vec<RootCluster>,
    pub solution: GeneralSolution,
    pub expression: String,
}

/// Solves the characteristic equation with default iteration settings.
pub fn solve(coefficients: &[f64]) -> Result<SolveReport> {
    solve_with_settings(coefficients, DurandKernerSettings::default())
}

pub fn solve_with_settings(
    coefficients: &[f64],
    settings: DurandKernerSettings,
) -> Result<SolveReport> {
    let polynomial = Polynomial::new(coefficients.to_vec())?;
    solve_polynomial(&polynomial, settings)
}

/// Runs the full pipeline on an already-validated polynomial.
pub fn solve_polynomial(
    polynomial: &Polynomial,
    settings: DurandKernerSettings,
) -> Result<SolveReport> {
    let found = find_roots(polynomial, settings)?;
    let clusters = cluster_roots(&found.roots);
    let solution = assemble_solution(&clusters);
    Ok(SolveReport {
        degree: polynomial.degree(),
        polynomial: polynomial.terms(),
        equation: polynomial_equation(polynomial),
        roots: root_records(&found.roots),
        iterations: found.iterations,
        converged: found.converged,
        clusters,
        expression: solution_expression(&solution),
        solution,
    })
}

/// Presentation records for a raw root list, indexed from 1.
pub fn root_records(roots: &[Complex64]) -> Vec<RootRecord> {
    roots
        .iter()
        .enumerate()
        .map(|(i, &value)| RootRecord {
            index: i + 1,
            value,
            class: RootClass::classify(value),
            display: format_complex(value),
        })
        .collect()
}
