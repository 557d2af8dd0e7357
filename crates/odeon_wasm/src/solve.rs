//! Solve operations exposed to the browser.

use js_sys::Float64Array;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use odeon_core::cluster::cluster_roots;
use odeon_core::format::{polynomial_equation, solution_expression};
use odeon_core::polynomial::{PolyTerm, Polynomial};
use odeon_core::roots::find_roots as core_find_roots;
use odeon_core::solution::{assemble_solution, SolutionTerm};
use odeon_core::solve::{root_records, solve_polynomial, RootRecord};
use odeon_core::SolveError;

use crate::WasmOdeSolver;

/// Characteristic-polynomial payload: structured terms plus the rendered
/// equation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacteristicPolynomial {
    pub degree: usize,
    pub terms: Vec<PolyTerm>,
    pub equation: String,
}

/// Root-list payload with the iteration outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootList {
    pub roots: Vec<RootRecord>,
    pub iterations: usize,
    pub converged: bool,
}

/// General-solution payload: structured terms, the rendered expression, and
/// display-ready warning strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub terms: Vec<SolutionTerm>,
    pub expression: String,
    pub warnings: Vec<String>,
}

fn input_error(error: SolveError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn serialize<T: Serialize>(payload: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(payload)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
impl WasmOdeSolver {
    /// Parses a coefficient string and returns the characteristic polynomial.
    pub fn characteristic_polynomial(&self, input: &str) -> Result<JsValue, JsValue> {
        let polynomial = Polynomial::parse(input).map_err(input_error)?;
        serialize(&CharacteristicPolynomial {
            degree: polynomial.degree(),
            terms: polynomial.terms(),
            equation: polynomial_equation(&polynomial),
        })
    }

    /// Finds the numeric roots of the characteristic equation.
    pub fn find_roots(&self, input: &str) -> Result<JsValue, JsValue> {
        let polynomial = Polynomial::parse(input).map_err(input_error)?;
        let found = core_find_roots(&polynomial, self.settings)
            .map_err(|e| JsValue::from_str(&format!("Root search failed: {}", e)))?;
        serialize(&RootList {
            roots: root_records(&found.roots),
            iterations: found.iterations,
            converged: found.converged,
        })
    }

    /// Roots as a flat Float64Array of interleaved (re, im) pairs, for
    /// plotting without object decoding.
    pub fn root_values(&self, input: &str) -> Result<Float64Array, JsValue> {
        let polynomial = Polynomial::parse(input).map_err(input_error)?;
        let found = core_find_roots(&polynomial, self.settings)
            .map_err(|e| JsValue::from_str(&format!("Root search failed: {}", e)))?;
        let mut flat = Vec::with_capacity(found.roots.len() * 2);
        for root in &found.roots {
            flat.push(root.re);
            flat.push(root.im);
        }
        Ok(Float64Array::from(flat.as_slice()))
    }

    /// Assembles the general solution of the differential equation.
    pub fn general_solution(&self, input: &str) -> Result<JsValue, JsValue> {
        let polynomial = Polynomial::parse(input).map_err(input_error)?;
        let found = core_find_roots(&polynomial, self.settings)
            .map_err(|e| JsValue::from_str(&format!("Root search failed: {}", e)))?;
        let clusters = cluster_roots(&found.roots);
        let solution = assemble_solution(&clusters);
        serialize(&Solution {
            expression: solution_expression(&solution),
            warnings: solution.warnings.iter().map(|w| w.to_string()).collect(),
            terms: solution.terms,
        })
    }

    /// Runs the whole pipeline and returns the full report.
    pub fn solve(&self, input: &str) -> Result<JsValue, JsValue> {
        let polynomial = Polynomial::parse(input).map_err(input_error)?;
        let report = solve_polynomial(&polynomial, self.settings)
            .map_err(|e| JsValue::from_str(&format!("Solve failed: {}", e)))?;
        serialize(&report)
    }
}
