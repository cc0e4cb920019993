//! # accord
//!
//! K-means partitioning of labeled samples, scored against a known
//! ground-truth partition with external cluster-validation indices
//! (Rand Index, Jaccard Coefficient, Fowlkes-Mallows Index).
//!
//! The crate is built around two numerical engines: the Lloyd's clustering
//! loop ([`cluster`]) and the exact pairwise contingency table behind the
//! validation indices ([`metrics`]). [`experiment`] repeats
//! {random init → cluster → validate} over many runs and tracks the best SSE
//! and the best index values independently.
//!
//! **Default build** is serial; the `parallel` feature executes experiment
//! runs across a rayon thread pool.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod dataset;
/// Error types used across `accord`.
pub mod error;
pub mod experiment;
pub mod metrics;

pub use cluster::{Lloyd, LloydFit};
pub use dataset::{min_max_normalize, random_partition, Sample};
pub use error::{Error, Result};
pub use experiment::{Experiment, ExperimentReport, RunRecord};
pub use metrics::{fowlkes_mallows, jaccard, pair_counts, rand_index, PairCounts};
