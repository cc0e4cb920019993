//! Clustering of labeled samples.
//!
//! This module provides the Lloyd's K-means engine used to partition a
//! dataset before scoring it against its ground-truth partition.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize the Sum of Squared Error:
//!
//! ```text
//! SSE = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! The engine runs one initialization to a local optimum. Random-partition
//! starts land in different optima, so a full experiment repeats the run and
//! keeps the best result (see [`Experiment`](crate::experiment::Experiment)).
//!
//! ## Usage
//!
//! ```rust
//! use accord::cluster::Lloyd;
//! use accord::dataset::Sample;
//!
//! let mut samples = vec![
//!     Sample::new(vec![0.0, 0.0], 1),
//!     Sample::new(vec![0.0, 1.0], 1),
//!     Sample::new(vec![10.0, 0.0], 2),
//!     Sample::new(vec![10.0, 1.0], 2),
//! ];
//!
//! // One starting assignment; real runs draw this uniformly at random.
//! samples[0].set_cluster(0);
//! samples[1].set_cluster(1);
//! samples[2].set_cluster(1);
//! samples[3].set_cluster(1);
//!
//! let fit = Lloyd::new(2).fit(&mut samples).unwrap();
//! assert!(fit.converged);
//! assert_eq!(samples[0].cluster(), samples[1].cluster());  // Left blob together
//! assert_ne!(samples[0].cluster(), samples[2].cluster());  // Separate from right
//! ```

mod lloyd;

pub use lloyd::{Lloyd, LloydFit};
