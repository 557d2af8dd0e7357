//! Grouping of numeric root estimates into multiplicity clusters.
//!
//! The iteration reports a repeated root as several estimates scattered
//! within a small neighborhood. Clustering folds those back into one root
//! with a multiplicity before the solution is assembled.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::complex::{ComplexOps, CLUSTER_TOLERANCE};

/// Largest |Im| at which a root or cluster centroid still counts as real.
pub const REAL_CLASSIFICATION_TOLERANCE: f64 = 1e-8;

/// Whether a value sits on the real axis, up to classification tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootClass {
    Real,
    Complex,
}

impl RootClass {
    pub fn classify(value: Complex64) -> Self {
        if value.im.abs() < REAL_CLASSIFICATION_TOLERANCE {
            RootClass::Real
        } else {
            RootClass::Complex
        }
    }
}

/// A group of near-identical roots: its mean position, how many estimates
/// fell into it, and whether the mean is real.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RootCluster {
    pub centroid: Complex64,
    pub multiplicity: usize,
    pub class: RootClass,
}

struct Accumulator {
    sum: Complex64,
    count: usize,
    centroid: Complex64,
}

/// Groups `roots` by proximity, in input order.
///
/// Each root joins the first existing cluster whose current centroid lies
/// within [`CLUSTER_TOLERANCE`], dragging that centroid to the running mean;
/// otherwise it opens a new cluster. The first-match rule makes the outcome
/// depend on input order for chains of marginally-spaced roots, which the
/// fixed iteration start keeps deterministic. Non-finite roots are dropped.
pub fn cluster_roots(roots: &[Complex64]) -> Vec<RootCluster> {
    let mut accumulators: Vec<Accumulator> = Vec::new();
    for &root in roots {
        if !root.norm().is_finite() {
            continue;
        }
        match accumulators
            .iter_mut()
            .find(|c| root.approx_eq(c.centroid, CLUSTER_TOLERANCE))
        {
            Some(cluster) => {
                cluster.sum += root;
                cluster.count += 1;
                cluster.centroid = cluster.sum / cluster.count as f64;
            }
            None => accumulators.push(Accumulator {
                sum: root,
                count: 1,
                centroid: root,
            }),
        }
    }

    accumulators
        .into_iter()
        .map(|c| RootCluster {
            centroid: c.centroid,
            multiplicity: c.count,
            class: RootClass::classify(c.centroid),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::{cluster_roots, RootClass, RootCluster};

    fn real(value: f64) -> Complex64 {
        Complex64::new(value, 0.0)
    }

    fn multiplicity_sum(clusters: &[RootCluster]) -> usize {
        clusters.iter().map(|c| c.multiplicity).sum()
    }

    #[test]
    fn separated_roots_stay_separate() {
        let clusters = cluster_roots(&[real(1.0), real(2.0)]);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].centroid, real(1.0));
        assert_eq!(clusters[1].centroid, real(2.0));
        assert!(clusters.iter().all(|c| c.multiplicity == 1));
        assert_eq!(multiplicity_sum(&clusters), 2);
    }

    #[test]
    fn near_duplicates_merge_with_a_mean_centroid() {
        let clusters = cluster_roots(&[real(1.0), real(1.0 + 4e-7)]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].multiplicity, 2);
        assert_eq!(clusters[0].class, RootClass::Real);
        assert!((clusters[0].centroid - real(1.0 + 2e-7)).norm() < 1e-12);
    }

    #[test]
    fn multiplicity_totals_the_input_count() {
        let roots = [
            real(1.0),
            real(1.0 + 1e-7),
            real(2.0),
            Complex64::new(0.0, 1.0),
            Complex64::new(0.0, -1.0),
        ];
        assert_eq!(multiplicity_sum(&cluster_roots(&roots)), roots.len());
    }

    #[test]
    fn centroid_classification_is_strict() {
        let real_side = cluster_roots(&[Complex64::new(1.0, 5e-9)]);
        assert_eq!(real_side[0].class, RootClass::Real);

        let complex_side = cluster_roots(&[Complex64::new(1.0, 2e-8)]);
        assert_eq!(complex_side[0].class, RootClass::Complex);

        // The boundary itself is not real.
        let boundary = cluster_roots(&[Complex64::new(1.0, 1e-8)]);
        assert_eq!(boundary[0].class, RootClass::Complex);
    }

    #[test]
    fn non_finite_roots_are_dropped() {
        let clusters = cluster_roots(&[
            Complex64::new(f64::INFINITY, 0.0),
            Complex64::new(f64::NAN, 1.0),
            real(3.0),
        ]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].centroid, real(3.0));
        assert_eq!(multiplicity_sum(&clusters), 1);
    }

    #[test]
    fn marginal_chains_depend_on_input_order() {
        // Three roots spaced 9e-7 apart: the middle one merges with whichever
        // end comes first, and the dragged centroid then rejects the far end.
        let a = real(0.0);
        let b = real(9e-7);
        let c = real(1.8e-6);

        let forward = cluster_roots(&[a, b, c]);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0].multiplicity, 2);
        assert!((forward[0].centroid - real(4.5e-7)).norm() < 1e-12);
        assert_eq!(forward[1].multiplicity, 1);
        assert_eq!(forward[1].centroid, c);

        let backward = cluster_roots(&[c, b, a]);
        assert_eq!(backward.len(), 2);
        assert_eq!(backward[0].multiplicity, 2);
        assert!((backward[0].centroid - real(1.35e-6)).norm() < 1e-12);
        assert_eq!(backward[1].multiplicity, 1);
        assert_eq!(backward[1].centroid, a);
    }

    #[test]
    fn reclustering_cluster_centroids_is_stable() {
        let first = cluster_roots(&[real(2.0), real(2.0 + 1e-7), real(5.0)]);
        let echoed: Vec<Complex64> = first
            .iter()
            .flat_map(|c| std::iter::repeat(c.centroid).take(c.multiplicity))
            .collect();
        let second = cluster_roots(&echoed);
        assert_eq!(second.len(), first.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.centroid, b.centroid);
            assert_eq!(a.multiplicity, b.multiplicity);
        }
    }
}
