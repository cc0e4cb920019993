//! Lloyd's batch K-means over labeled samples.
//!
//! Partitions samples into k clusters by alternating an assignment step
//! (nearest centroid) and an update step (centroid = mean of assigned points),
//! minimizing the **Sum of Squared Error**:
//!
//! ```text
//! SSE = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Run protocol
//!
//! The engine does not choose its own starting point: every sample must
//! already carry a cluster assignment in `[0, k)` when [`Lloyd::fit`] is
//! called. Random-partition initialization
//! ([`random_partition`](crate::dataset::random_partition)) supplies this, and
//! keeping it outside the engine keeps repeated runs independent and
//! reproducible under a caller-controlled seed.
//!
//! Each iteration:
//!
//! 1. Recompute all k centroids from scratch as the mean of their members,
//!    resetting every sample's cached nearest distance.
//! 2. Assign every sample to its nearest centroid, scanning centroids in index
//!    order; an equidistant tie goes to the lower-indexed centroid.
//!    The sample's minimal squared distance accumulates into the pass SSE.
//! 3. Converge when `|SSE - prev| / prev` drops below the threshold. The check
//!    runs *before* the centroid recompute that closes the iteration, and the
//!    SSE reported on exit is the one from the last completed assignment pass.
//!
//! # Degenerate clusters
//!
//! A cluster that receives no members has no mean; its centroid coordinates
//! become NaN for that iteration and [`LloydFit::degenerate`] is set. NaN
//! distances lose every assignment comparison, so samples settle on the
//! remaining well-defined centroids. The NaN is left observable rather than
//! patched over with a zero vector or a reseeded point.
//!
//! # Failure Modes
//!
//! - **Local optima**: NP-hard problem; Lloyd finds a local minimum only
//! - **Initialization sensitivity**: random partitions can start badly —
//!   run several times and keep the best SSE
//! - **Non-spherical clusters**: assumes roughly spherical, equal-sized
//!   clusters
//!
//! # References
//!
//! - Lloyd (1982). "Least Squares Quantization in PCM"
//! - Jain & Dubes (1988). "Algorithms for Clustering Data"

use crate::dataset::{common_dims, Sample};
use crate::error::{Error, Result};
use ndarray::Array2;

/// Lloyd's K-means clustering engine.
#[derive(Debug, Clone)]
pub struct Lloyd {
    /// Number of clusters.
    k: usize,
    /// Maximum assignment passes per run.
    max_iter: usize,
    /// Relative SSE change below which a run converges.
    threshold: f64,
}

/// Outcome of one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct LloydFit {
    /// SSE of the last completed assignment pass.
    pub sse: f64,
    /// Assignment passes performed.
    pub iterations: usize,
    /// Whether the relative SSE change fell below the threshold.
    pub converged: bool,
    /// Whether any iteration left a cluster empty (NaN centroid).
    pub degenerate: bool,
}

impl Lloyd {
    /// Create a new engine for `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            threshold: 1e-4,
        }
    }

    /// Set the maximum number of assignment passes.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative-SSE convergence threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Run Lloyd's algorithm to convergence or the iteration cap.
    ///
    /// Requires every sample to carry an initial assignment in `[0, k)`.
    /// Mutates each sample's cluster id and cached nearest distance in place
    /// and returns the run's [`LloydFit`].
    pub fn fit(&self, samples: &mut [Sample]) -> Result<LloydFit> {
        let n = samples.len();
        let d = common_dims(samples)?;

        if self.k < 1 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter < 1 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must be finite and non-negative",
            });
        }
        for (index, s) in samples.iter().enumerate() {
            match s.cluster() {
                None => return Err(Error::UnassignedSample { index }),
                Some(cluster) if cluster >= self.k => {
                    return Err(Error::AssignmentOutOfRange {
                        index,
                        cluster,
                        k: self.k,
                    })
                }
                Some(_) => {}
            }
        }

        let mut centroids = Array2::<f64>::zeros((self.k, d));
        let mut degenerate = self.compute_centroids(samples, &mut centroids)?;

        // Sentinel: the first pass compares against f64::MAX and can never
        // satisfy the relative-change test.
        let mut prev_sse = f64::MAX;
        let mut converged = false;
        let mut iterations = 0;

        let mut iter = 1;
        while iter <= self.max_iter && !converged {
            let mut sse = 0.0;

            for s in samples.iter_mut() {
                for c in 0..self.k {
                    let dist = squared_distance(s.coords(), &centroids, c);
                    // Strict improvement: an equidistant later centroid never
                    // displaces an earlier one, and NaN never wins.
                    if dist < s.min_dist() {
                        s.record_nearest(c, dist);
                    }
                }
                sse += s.min_dist();
            }

            if ((sse - prev_sse).abs() / prev_sse) < self.threshold {
                converged = true;
            }
            prev_sse = sse;

            // Check-then-recompute: the centroids move once more after the
            // SSE that decided convergence was captured.
            degenerate |= self.compute_centroids(samples, &mut centroids)?;

            iterations = iter;
            iter += 1;
        }

        Ok(LloydFit {
            sse: prev_sse,
            iterations,
            converged,
            degenerate,
        })
    }

    /// Rebuild all centroids from the current assignments and reset every
    /// sample's cached nearest distance.
    ///
    /// Returns whether any cluster was left empty. An empty cluster's row
    /// divides 0 by 0 and stays NaN for this iteration.
    fn compute_centroids(
        &self,
        samples: &mut [Sample],
        centroids: &mut Array2<f64>,
    ) -> Result<bool> {
        let mut counts = vec![0usize; self.k];
        centroids.fill(0.0);

        for (index, s) in samples.iter_mut().enumerate() {
            let c = s.cluster().ok_or(Error::UnassignedSample { index })?;
            counts[c] += 1;
            for (j, v) in s.coords().iter().enumerate() {
                centroids[[c, j]] += v;
            }
            s.reset_min_dist();
        }

        for c in 0..self.k {
            let count = counts[c] as f64;
            for j in 0..centroids.ncols() {
                centroids[[c, j]] /= count;
            }
        }

        Ok(counts.iter().any(|&count| count == 0))
    }
}

/// Squared Euclidean distance from a sample to centroid row `c`.
#[inline]
fn squared_distance(coords: &[f64], centroids: &Array2<f64>, c: usize) -> f64 {
    coords
        .iter()
        .zip(centroids.row(c).iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum()
}
