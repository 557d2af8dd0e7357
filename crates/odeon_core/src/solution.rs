//! Assembly of the symbolic general solution from multiplicity clusters.
//!
//! Real clusters contribute `C x^k e^(alpha x)` terms and conjugate pairs of
//! complex clusters contribute damped oscillation terms. The emission order
//! is part of the output contract: real terms first (higher multiplicity
//! first, ties by ascending centroid real part), then oscillation terms in
//! pairing discovery order, with arbitrary constants numbered sequentially
//! from C1 across the whole solution.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::cluster::{RootClass, RootCluster};
use crate::complex::CLUSTER_TOLERANCE;

/// A conjugate pair `alpha +/- beta i` collapsed to real oscillation data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConjugatePair {
    pub alpha: f64,
    pub beta: f64,
    pub multiplicity: usize,
}

/// One additive term of the general solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SolutionTerm {
    /// `C x^degree e^(alpha x)` from a real root.
    RealExponential {
        constant: usize,
        degree: usize,
        alpha: f64,
    },
    /// `x^degree e^(alpha x) (C cos(beta x) + D sin(beta x))` from a
    /// conjugate pair.
    ComplexOscillation {
        cos_constant: usize,
        sin_constant: usize,
        degree: usize,
        alpha: f64,
        beta: f64,
    },
}

/// Non-fatal note attached to the solution when a complex cluster had no
/// conjugate partner and its pair was reconstructed from one side only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyWarning {
    pub centroid: Complex64,
    pub multiplicity: usize,
}

impl fmt::Display for AccuracyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no conjugate partner found for root {} (multiplicity {}); the oscillation term may be inaccurate",
            self.centroid, self.multiplicity
        )
    }
}

/// The assembled general solution: ordered terms plus any pairing warnings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralSolution {
    pub terms: Vec<SolutionTerm>,
    pub warnings: Vec<AccuracyWarning>,
}

/// Sequential allocator for the arbitrary-constant subscripts, starting at 1.
struct ConstantCounter {
    next_index: usize,
}

impl ConstantCounter {
    fn new() -> Self {
        Self { next_index: 1 }
    }

    fn allocate(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }
}

/// Pairs complex-classified clusters into conjugate pairs, in input order.
///
/// Two clusters pair when their centroid real parts agree and their
/// imaginary parts cancel, both within [`CLUSTER_TOLERANCE`]. A cluster left
/// without a partner still produces a pair, built from its own centroid, and
/// a warning recording the asymmetry.
pub fn pair_conjugates(clusters: &[RootCluster]) -> (Vec<ConjugatePair>, Vec<AccuracyWarning>) {
    let mut pairs = Vec::new();
    let mut warnings = Vec::new();
    let mut used = vec![false; clusters.len()];

    for i in 0..clusters.len() {
        if used[i] {
            continue;
        }
        let a = clusters[i];
        let partner = (i + 1..clusters.len()).find(|&j| {
            !used[j]
                && (a.centroid.re - clusters[j].centroid.re).abs() < CLUSTER_TOLERANCE
                && (a.centroid.im + clusters[j].centroid.im).abs() < CLUSTER_TOLERANCE
        });
        match partner {
            Some(j) => {
                let b = clusters[j];
                pairs.push(ConjugatePair {
                    alpha: (a.centroid.re + b.centroid.re) / 2.0,
                    beta: (a.centroid.im.abs() + b.centroid.im.abs()) / 2.0,
                    multiplicity: a.multiplicity.min(b.multiplicity),
                });
                used[i] = true;
                used[j] = true;
            }
            None => {
                pairs.push(ConjugatePair {
                    alpha: a.centroid.re,
                    beta: a.centroid.im.abs(),
                    multiplicity: a.multiplicity,
                });
                warnings.push(AccuracyWarning {
                    centroid: a.centroid,
                    multiplicity: a.multiplicity,
                });
                used[i] = true;
            }
        }
    }

    (pairs, warnings)
}

/// Builds the ordered general solution for a clustered root set.
pub fn assemble_solution(clusters: &[RootCluster]) -> GeneralSolution {
    let mut reals: Vec<RootCluster> = clusters
        .iter()
        .filter(|c| c.class == RootClass::Real)
        .copied()
        .collect();
    let complexes: Vec<RootCluster> = clusters
        .iter()
        .filter(|c| c.class == RootClass::Complex)
        .copied()
        .collect();

    reals.sort_by(|a, b| {
        b.multiplicity.cmp(&a.multiplicity).then(
            a.centroid
                .re
                .partial_cmp(&b.centroid.re)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });

    let (pairs, warnings) = pair_conjugates(&complexes);

    let mut counter = ConstantCounter::new();
    let mut terms = Vec::new();
    for cluster in &reals {
        for degree in 0..cluster.multiplicity {
            terms.push(SolutionTerm::RealExponential {
                constant: counter.allocate(),
                degree,
                alpha: cluster.centroid.re,
            });
        }
    }
    for pair in &pairs {
        for degree in 0..pair.multiplicity {
            terms.push(SolutionTerm::ComplexOscillation {
                cos_constant: counter.allocate(),
                sin_constant: counter.allocate(),
                degree,
                alpha: pair.alpha,
                beta: pair.beta,
            });
        }
    }

    GeneralSolution { terms, warnings }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::{assemble_solution, pair_conjugates, ConjugatePair, SolutionTerm};
    use crate::cluster::{RootClass, RootCluster};

    fn cluster(re: f64, im: f64, multiplicity: usize) -> RootCluster {
        let centroid = Complex64::new(re, im);
        RootCluster {
            centroid,
            multiplicity,
            class: RootClass::classify(centroid),
        }
    }

    #[test]
    fn distinct_real_roots_emit_in_ascending_order() {
        let solution = assemble_solution(&[cluster(2.0, 0.0, 1), cluster(1.0, 0.0, 1)]);
        assert!(solution.warnings.is_empty());
        assert_eq!(
            solution.terms,
            vec![
                SolutionTerm::RealExponential {
                    constant: 1,
                    degree: 0,
                    alpha: 1.0
                },
                SolutionTerm::RealExponential {
                    constant: 2,
                    degree: 0,
                    alpha: 2.0
                },
            ]
        );
    }

    #[test]
    fn repeated_real_root_ramps_the_degree() {
        let solution = assemble_solution(&[cluster(1.0, 0.0, 2)]);
        assert_eq!(
            solution.terms,
            vec![
                SolutionTerm::RealExponential {
                    constant: 1,
                    degree: 0,
                    alpha: 1.0
                },
                SolutionTerm::RealExponential {
                    constant: 2,
                    degree: 1,
                    alpha: 1.0
                },
            ]
        );
    }

    #[test]
    fn triple_real_root_ramps_up_to_the_square() {
        let solution = assemble_solution(&[cluster(-2.0, 0.0, 3)]);
        assert!(solution.warnings.is_empty());
        assert_eq!(
            solution.terms,
            vec![
                SolutionTerm::RealExponential {
                    constant: 1,
                    degree: 0,
                    alpha: -2.0
                },
                SolutionTerm::RealExponential {
                    constant: 2,
                    degree: 1,
                    alpha: -2.0
                },
                SolutionTerm::RealExponential {
                    constant: 3,
                    degree: 2,
                    alpha: -2.0
                },
            ]
        );
    }

    #[test]
    fn higher_multiplicity_real_clusters_come_first() {
        let solution = assemble_solution(&[
            cluster(5.0, 0.0, 1),
            cluster(2.0, 0.0, 2),
            cluster(-1.0, 0.0, 2),
        ]);
        let alphas: Vec<(usize, usize, f64)> = solution
            .terms
            .iter()
            .map(|t| match *t {
                SolutionTerm::RealExponential {
                    constant,
                    degree,
                    alpha,
                } => (constant, degree, alpha),
                ref other => panic!("unexpected term {other:?}"),
            })
            .collect();
        assert_eq!(
            alphas,
            vec![
                (1, 0, -1.0),
                (2, 1, -1.0),
                (3, 0, 2.0),
                (4, 1, 2.0),
                (5, 0, 5.0),
            ]
        );
    }

    #[test]
    fn conjugate_pair_collapses_to_one_oscillation_term() {
        let solution = assemble_solution(&[cluster(0.0, 1.0, 1), cluster(0.0, -1.0, 1)]);
        assert!(solution.warnings.is_empty());
        assert_eq!(
            solution.terms,
            vec![SolutionTerm::ComplexOscillation {
                cos_constant: 1,
                sin_constant: 2,
                degree: 0,
                alpha: 0.0,
                beta: 1.0,
            }]
        );
    }

    #[test]
    fn real_terms_precede_oscillation_terms() {
        let solution = assemble_solution(&[
            cluster(0.0, 2.0, 1),
            cluster(3.0, 0.0, 1),
            cluster(0.0, -2.0, 1),
        ]);
        assert_eq!(solution.terms.len(), 2);
        assert!(matches!(
            solution.terms[0],
            SolutionTerm::RealExponential { constant: 1, .. }
        ));
        assert!(matches!(
            solution.terms[1],
            SolutionTerm::ComplexOscillation {
                cos_constant: 2,
                sin_constant: 3,
                ..
            }
        ));
    }

    #[test]
    fn pairing_averages_the_centroids_and_takes_the_min_multiplicity() {
        let a = cluster(0.5, 2.0, 2);
        let b = cluster(0.5 + 1e-7, -2.0 - 1e-7, 1);
        let (pairs, warnings) = pair_conjugates(&[a, b]);
        assert!(warnings.is_empty());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].multiplicity, 1);
        assert!((pairs[0].alpha - 0.5).abs() < 1e-7);
        assert!((pairs[0].beta - 2.0).abs() < 1e-7);
    }

    #[test]
    fn pairing_scans_forward_for_the_first_match() {
        let a = cluster(0.0, 1.0, 1);
        let b = cluster(5.0, 3.0, 1);
        let c = cluster(0.0, -1.0, 1);
        let (pairs, warnings) = pair_conjugates(&[a, b, c]);
        assert_eq!(
            pairs,
            vec![
                ConjugatePair {
                    alpha: 0.0,
                    beta: 1.0,
                    multiplicity: 1
                },
                ConjugatePair {
                    alpha: 5.0,
                    beta: 3.0,
                    multiplicity: 1
                },
            ]
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].centroid, Complex64::new(5.0, 3.0));
    }

    #[test]
    fn unpaired_cluster_warns_and_still_emits_terms() {
        let solution = assemble_solution(&[cluster(2.0, 3.0, 2)]);
        assert_eq!(solution.warnings.len(), 1);
        assert_eq!(solution.warnings[0].centroid, Complex64::new(2.0, 3.0));
        assert_eq!(solution.warnings[0].multiplicity, 2);
        let message = solution.warnings[0].to_string();
        assert!(
            message.contains("no conjugate partner"),
            "unexpected warning text: {message}"
        );
        assert_eq!(
            solution.terms,
            vec![
                SolutionTerm::ComplexOscillation {
                    cos_constant: 1,
                    sin_constant: 2,
                    degree: 0,
                    alpha: 2.0,
                    beta: 3.0,
                },
                SolutionTerm::ComplexOscillation {
                    cos_constant: 3,
                    sin_constant: 4,
                    degree: 1,
                    alpha: 2.0,
                    beta: 3.0,
                },
            ]
        );
    }

    #[test]
    fn empty_cluster_list_yields_an_empty_solution() {
        let solution = assemble_solution(&[]);
        assert!(solution.terms.is_empty());
        assert!(solution.warnings.is_empty());
    }
}
