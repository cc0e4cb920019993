//! Labeled samples and dataset preprocessing.
//!
//! A [`Sample`] couples an immutable coordinate vector and ground-truth
//! partition label with the two fields the clustering engine mutates: the
//! current cluster assignment and the cached nearest-centroid distance.
//!
//! Preprocessing is min-max normalization: every coordinate column is rescaled
//! so its minimum maps to 0 and its maximum to 1. The clustering engine assumes
//! this has already happened and performs no rescaling itself.

use crate::error::{Error, Result};
use rand::prelude::*;

/// A labeled data point.
///
/// The coordinate vector and partition label are fixed at construction. The
/// cluster assignment starts out unset and is written by random-partition
/// initialization and by the clustering engine; the cached distance is
/// engine-internal state.
#[derive(Debug, Clone)]
pub struct Sample {
    coords: Vec<f64>,
    partition: i64,
    cluster: Option<usize>,
    min_dist: f64,
}

impl Sample {
    /// Create a sample from its coordinates and ground-truth partition label.
    pub fn new(coords: Vec<f64>, partition: i64) -> Self {
        Self {
            coords,
            partition,
            cluster: None,
            min_dist: f64::INFINITY,
        }
    }

    /// Coordinate vector.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Dimensionality of the sample.
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// Ground-truth partition label. Used only for validation, never by the
    /// clustering algorithm itself.
    pub fn partition(&self) -> i64 {
        self.partition
    }

    /// Current cluster assignment, or `None` before initialization.
    pub fn cluster(&self) -> Option<usize> {
        self.cluster
    }

    /// Assign the sample to a cluster.
    pub fn set_cluster(&mut self, cluster: usize) {
        self.cluster = Some(cluster);
    }

    /// Cached squared distance to the nearest centroid seen so far.
    pub fn min_dist(&self) -> f64 {
        self.min_dist
    }

    pub(crate) fn reset_min_dist(&mut self) {
        self.min_dist = f64::INFINITY;
    }

    pub(crate) fn record_nearest(&mut self, cluster: usize, dist: f64) {
        self.cluster = Some(cluster);
        self.min_dist = dist;
    }
}

/// Check that every sample has the dimensionality of the first one.
///
/// Returns the common dimension D.
pub(crate) fn common_dims(samples: &[Sample]) -> Result<usize> {
    let first = samples.first().ok_or(Error::EmptyInput)?;
    let d = first.dims();
    for s in samples {
        if s.dims() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: s.dims(),
            });
        }
    }
    Ok(d)
}

/// Min-max normalize every coordinate column in place.
///
/// Each column is rescaled with `v' = (v - min) / (max - min)` so the column
/// minimum maps to 0 and the maximum to 1. A constant column (`max == min`)
/// maps to 0 for every sample.
pub fn min_max_normalize(samples: &mut [Sample]) -> Result<()> {
    let d = common_dims(samples)?;

    for col in 0..d {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in samples.iter() {
            let v = s.coords[col];
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        let range = max - min;
        for s in samples.iter_mut() {
            s.coords[col] = if range == 0.0 {
                0.0
            } else {
                (s.coords[col] - min) / range
            };
        }
    }

    Ok(())
}

/// Assign every sample to a cluster uniformly at random in `[0, k)`.
///
/// This is the random-partition initialization required before each clustering
/// run. Pass a seeded RNG for reproducible runs.
///
/// # Panics
///
/// Panics if `k == 0`.
pub fn random_partition(samples: &mut [Sample], k: usize, rng: &mut impl Rng) {
    for s in samples.iter_mut() {
        s.set_cluster(rng.random_range(0..k));
    }
}
