//! External cluster-validation indices.
//!
//! Measures of agreement between a clustering result and a known ground-truth
//! partition, derived from the pairwise contingency table.
//!
//! # Metrics Overview
//!
//! | Metric | Formula | Range | Best |
//! |--------|---------|-------|------|
//! | [`rand_index`] | (a + d) / (a + b + c + d) | [0, 1] | 1 |
//! | [`jaccard`] | a / (a + b + c) | [0, 1] | 1 |
//! | [`fowlkes_mallows`] | sqrt((a/(a+b)) · (a/(a+c))) | [0, 1] | 1 |
//!
//! # The Pairwise Contingency Table
//!
//! Every unordered pair of distinct samples falls into exactly one of four
//! counters, by whether the two samples share a cluster and whether they share
//! a ground-truth partition:
//!
//! ```text
//! a  same cluster, same partition
//! b  same cluster, different partition
//! c  different cluster, same partition
//! d  different cluster, different partition
//! ```
//!
//! The indices are defined over the *exact* pairwise count — the construction
//! is inherently O(N²) and is never sampled or approximated. For N samples,
//! `a + b + c + d == N·(N-1)/2` always holds.
//!
//! A denominator of zero (possible only for N ≤ 1 or pathological
//! single-cluster / single-partition data) makes the corresponding index
//! undefined; the functions return `None` in that case rather than a silent
//! division result.
//!
//! # Example
//!
//! ```rust
//! use accord::metrics::{pair_counts_from_labels, rand_index, jaccard, fowlkes_mallows};
//!
//! let pred = [0, 0, 1];
//! let truth = [7, 7, 9];
//!
//! let counts = pair_counts_from_labels(&pred, &truth);
//! assert_eq!(counts.total(), 3);
//! assert_eq!(rand_index(&counts), Some(1.0));
//! assert_eq!(jaccard(&counts), Some(1.0));
//! assert_eq!(fowlkes_mallows(&counts), Some(1.0));
//! ```
//!
//! # References
//!
//! - Rand (1971). "Objective criteria for the evaluation of clustering methods"
//! - Fowlkes & Mallows (1983). "A method for comparing two hierarchical clusterings"
//! - Halkidi, Batistakis & Vazirgiannis (2001). "On clustering validation techniques"

use crate::dataset::Sample;
use crate::error::{Error, Result};

/// Pairwise contingency counts between a clustering and a reference partition.
///
/// Counts unordered pairs of distinct samples; see the module docs for the
/// a/b/c/d classification. Rebuilt fresh for every run and discarded after the
/// indices are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    /// Pairs in the same cluster and the same partition (a).
    pub same_cluster_same_partition: u64,
    /// Pairs in the same cluster but different partitions (b).
    pub same_cluster_diff_partition: u64,
    /// Pairs in different clusters but the same partition (c).
    pub diff_cluster_same_partition: u64,
    /// Pairs in different clusters and different partitions (d).
    pub diff_cluster_diff_partition: u64,
}

impl PairCounts {
    /// Total number of unordered pairs, `N·(N-1)/2` for N samples.
    pub fn total(&self) -> u64 {
        self.same_cluster_same_partition
            + self.same_cluster_diff_partition
            + self.diff_cluster_same_partition
            + self.diff_cluster_diff_partition
    }
}

/// Build the pairwise contingency table from clustered samples.
///
/// Reads each sample's cluster assignment and ground-truth partition label.
/// Errors if any sample was never assigned to a cluster.
pub fn pair_counts(samples: &[Sample]) -> Result<PairCounts> {
    let mut pred = Vec::with_capacity(samples.len());
    let mut truth = Vec::with_capacity(samples.len());
    for (index, s) in samples.iter().enumerate() {
        pred.push(s.cluster().ok_or(Error::UnassignedSample { index })?);
        truth.push(s.partition());
    }
    Ok(pair_counts_from_labels(&pred, &truth))
}

/// Build the pairwise contingency table from parallel label slices.
///
/// `pred[i]` is sample i's cluster, `truth[i]` its ground-truth partition.
/// Slices must be the same length; the shorter is authoritative if not
/// (callers in this crate always pass equal lengths).
pub fn pair_counts_from_labels(pred: &[usize], truth: &[i64]) -> PairCounts {
    let n = pred.len().min(truth.len());
    let mut counts = PairCounts::default();

    for i in 0..n {
        for j in (i + 1)..n {
            let same_cluster = pred[i] == pred[j];
            let same_partition = truth[i] == truth[j];

            match (same_cluster, same_partition) {
                (true, true) => counts.same_cluster_same_partition += 1,
                (true, false) => counts.same_cluster_diff_partition += 1,
                (false, true) => counts.diff_cluster_same_partition += 1,
                (false, false) => counts.diff_cluster_diff_partition += 1,
            }
        }
    }

    counts
}

/// Rand Index: fraction of pairs on which the two groupings agree.
///
/// `(a + d) / (a + b + c + d)`. `None` when there are no pairs at all (N ≤ 1).
pub fn rand_index(counts: &PairCounts) -> Option<f64> {
    let total = counts.total();
    if total == 0 {
        return None;
    }
    let agree = counts.same_cluster_same_partition + counts.diff_cluster_diff_partition;
    Some(agree as f64 / total as f64)
}

/// Jaccard Coefficient: agreement among pairs grouped together by either side.
///
/// `a / (a + b + c)`. `None` when no pair is grouped together by either the
/// clustering or the reference partition.
pub fn jaccard(counts: &PairCounts) -> Option<f64> {
    let denom = counts.same_cluster_same_partition
        + counts.same_cluster_diff_partition
        + counts.diff_cluster_same_partition;
    if denom == 0 {
        return None;
    }
    Some(counts.same_cluster_same_partition as f64 / denom as f64)
}

/// Fowlkes-Mallows Index: geometric mean of pairwise precision and recall.
///
/// `sqrt((a / (a + b)) · (a / (a + c)))`. `None` when the clustering groups no
/// pair together (a + b = 0) or the reference partition groups no pair
/// together (a + c = 0).
pub fn fowlkes_mallows(counts: &PairCounts) -> Option<f64> {
    let a = counts.same_cluster_same_partition;
    let ab = a + counts.same_cluster_diff_partition;
    let ac = a + counts.diff_cluster_same_partition;
    if ab == 0 || ac == 0 {
        return None;
    }
    let precision = a as f64 / ab as f64;
    let recall = a as f64 / ac as f64;
    Some((precision * recall).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_all_unordered_pairs() {
        let pred = [0, 1, 0, 2, 1, 0];
        let truth = [5, 5, 6, 6, 7, 7];
        let counts = pair_counts_from_labels(&pred, &truth);
        let n = pred.len() as u64;
        assert_eq!(counts.total(), n * (n - 1) / 2);
    }

    #[test]
    fn test_perfect_agreement_up_to_relabeling() {
        // Cluster ids and partition labels differ, but the grouping is the same.
        let pred = [1, 1, 0, 0, 2, 2];
        let truth = [10, 10, 20, 20, 30, 30];
        let counts = pair_counts_from_labels(&pred, &truth);

        assert_eq!(counts.same_cluster_diff_partition, 0);
        assert_eq!(counts.diff_cluster_same_partition, 0);
        assert_eq!(rand_index(&counts), Some(1.0));
        assert_eq!(jaccard(&counts), Some(1.0));
        assert_eq!(fowlkes_mallows(&counts), Some(1.0));
    }

    #[test]
    fn test_three_samples_two_partitions_exact_counts() {
        // Two samples in partition 5, one in partition 9, clustered to match:
        // a = 1 (the matched pair), b = c = 0, d = 2.
        let pred = [0, 0, 1];
        let truth = [5, 5, 9];
        let counts = pair_counts_from_labels(&pred, &truth);

        assert_eq!(counts.same_cluster_same_partition, 1);
        assert_eq!(counts.same_cluster_diff_partition, 0);
        assert_eq!(counts.diff_cluster_same_partition, 0);
        assert_eq!(counts.diff_cluster_diff_partition, 2);
        assert_eq!(rand_index(&counts), Some(1.0));
        assert_eq!(jaccard(&counts), Some(1.0));
        assert_eq!(fowlkes_mallows(&counts), Some(1.0));
    }

    #[test]
    fn test_singleton_clusters_have_no_b_pairs() {
        // Every sample alone in its cluster while the truth pairs them up:
        // nothing shares a cluster, so b = 0 (and a = 0).
        let pred = [0, 1, 2, 3];
        let truth = [5, 5, 6, 6];
        let counts = pair_counts_from_labels(&pred, &truth);

        assert_eq!(counts.same_cluster_same_partition, 0);
        assert_eq!(counts.same_cluster_diff_partition, 0);
        assert_eq!(counts.diff_cluster_same_partition, 2);
        // a + b = 0: pairwise precision is undefined.
        assert_eq!(fowlkes_mallows(&counts), None);
        assert_eq!(jaccard(&counts), Some(0.0));
    }

    #[test]
    fn test_single_giant_cluster_has_no_c_pairs() {
        let pred = [0, 0, 0, 0];
        let truth = [5, 5, 6, 6];
        let counts = pair_counts_from_labels(&pred, &truth);

        assert_eq!(counts.diff_cluster_same_partition, 0);
        assert_eq!(counts.diff_cluster_diff_partition, 0);
        assert_eq!(counts.same_cluster_same_partition, 2);
        assert_eq!(counts.same_cluster_diff_partition, 4);
        assert_eq!(rand_index(&counts), Some(2.0 / 6.0));
    }

    #[test]
    fn test_no_pairs_all_indices_undefined() {
        let counts = pair_counts_from_labels(&[0], &[5]);
        assert_eq!(counts.total(), 0);
        assert_eq!(rand_index(&counts), None);
        assert_eq!(jaccard(&counts), None);
        assert_eq!(fowlkes_mallows(&counts), None);

        let counts = pair_counts_from_labels(&[], &[]);
        assert_eq!(rand_index(&counts), None);
    }

    #[test]
    fn test_all_singletons_both_sides() {
        // Each sample its own cluster and its own partition: every pair lands
        // in d. Rand is perfect; the overlap-based indices are undefined.
        let pred = [0, 1, 2];
        let truth = [5, 6, 7];
        let counts = pair_counts_from_labels(&pred, &truth);

        assert_eq!(counts.diff_cluster_diff_partition, 3);
        assert_eq!(rand_index(&counts), Some(1.0));
        assert_eq!(jaccard(&counts), None);
        assert_eq!(fowlkes_mallows(&counts), None);
    }

    #[test]
    fn test_partial_agreement_values() {
        // pred merges one cross-partition pair.
        let pred = [0, 0, 0, 1];
        let truth = [5, 5, 6, 6];
        let counts = pair_counts_from_labels(&pred, &truth);

        // Pairs: (0,1) a, (0,2) b, (1,2) b, (0,3) d, (1,3) d, (2,3) c.
        assert_eq!(counts.same_cluster_same_partition, 1);
        assert_eq!(counts.same_cluster_diff_partition, 2);
        assert_eq!(counts.diff_cluster_same_partition, 1);
        assert_eq!(counts.diff_cluster_diff_partition, 2);

        assert_eq!(rand_index(&counts), Some(0.5));
        assert_eq!(jaccard(&counts), Some(0.25));
        let fm = fowlkes_mallows(&counts).unwrap();
        assert!((fm - ((1.0f64 / 3.0) * 0.5).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_pair_counts_reads_samples() {
        let mut samples = vec![
            Sample::new(vec![0.0], 5),
            Sample::new(vec![0.1], 5),
            Sample::new(vec![9.0], 9),
        ];
        for (i, s) in samples.iter_mut().enumerate() {
            s.set_cluster(if i < 2 { 0 } else { 1 });
        }

        let counts = pair_counts(&samples).unwrap();
        assert_eq!(counts.same_cluster_same_partition, 1);
        assert_eq!(counts.diff_cluster_diff_partition, 2);
    }

    #[test]
    fn test_pair_counts_unassigned_error() {
        let samples = vec![Sample::new(vec![0.0], 5)];
        assert_eq!(
            pair_counts(&samples),
            Err(Error::UnassignedSample { index: 0 })
        );
    }
}
