//! Adjusted Rand Index between two partitions of the same objects.
//!
//! Computed from the pair confusion matrix: every unordered pair of objects is
//! classified by whether the two partitions put it in the same cluster. The
//! chance-corrected score is 1.0 for identical partitions (up to a relabeling),
//! close to 0.0 for independent ones and can be negative.

use crate::errors::{Error, Result};

/// Pair confusion counts `[[tn, fp], [fn, tp]]`, counting ordered pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairConfusion {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
}

/// Maps arbitrary labels to `0..n_labels`, in ascending label order.
fn dense_labels(part: &[i16]) -> (Vec<usize>, usize) {
    let mut unique = part.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let dense = part
        .iter()
        .map(|label| unique.binary_search(label).unwrap_or_default())
        .collect();

    (dense, unique.len())
}

/// Contingency table between two label vectors of the same length.
fn contingency(part0: &[i16], part1: &[i16]) -> (Vec<u64>, usize, usize) {
    let (classes, n_classes) = dense_labels(part0);
    let (clusters, n_clusters) = dense_labels(part1);

    let mut table = vec![0u64; n_classes * n_clusters];
    for (a, b) in classes.into_iter().zip(clusters) {
        table[a * n_clusters + b] += 1;
    }

    (table, n_classes, n_clusters)
}

/// Computes the pair confusion matrix of two partitions.
///
/// Labels can be any `i16` values, including negative ones such as the
/// degenerate marker. Fails if the slices differ in length.
pub fn pair_confusion_matrix(part0: &[i16], part1: &[i16]) -> Result<PairConfusion> {
    if part0.len() != part1.len() {
        return Err(Error::invalid_input(format!(
            "partitions must have the same length, got {} and {}",
            part0.len(),
            part1.len()
        )));
    }

    let n_samples = part0.len() as u64;
    let (table, n_classes, n_clusters) = contingency(part0, part1);

    let mut class_sizes = vec![0u64; n_classes];
    let mut cluster_sizes = vec![0u64; n_clusters];
    let mut sum_squares = 0u64;
    for i in 0..n_classes {
        for j in 0..n_clusters {
            let c = table[i * n_clusters + j];
            class_sizes[i] += c;
            cluster_sizes[j] += c;
            sum_squares += c * c;
        }
    }

    let mut by_cluster = 0u64;
    let mut by_class = 0u64;
    for i in 0..n_classes {
        for j in 0..n_clusters {
            let c = table[i * n_clusters + j];
            by_cluster += c * cluster_sizes[j];
            by_class += c * class_sizes[i];
        }
    }

    let true_positives = sum_squares - n_samples;
    let false_positives = by_cluster - sum_squares;
    let false_negatives = by_class - sum_squares;
    let true_negatives =
        n_samples * n_samples - false_positives - false_negatives - sum_squares;

    Ok(PairConfusion {
        true_negatives,
        false_positives,
        false_negatives,
        true_positives,
    })
}

/// Adjusted Rand Index between `part0` and `part1`.
///
/// Fails only when the partitions have different lengths.
pub fn adjusted_rand_index(part0: &[i16], part1: &[i16]) -> Result<f64> {
    let PairConfusion {
        true_negatives: tn,
        false_positives: fp,
        false_negatives: fn_,
        true_positives: tp,
    } = pair_confusion_matrix(part0, part1)?;

    // Special cases: empty data or full agreement
    if fn_ == 0 && fp == 0 {
        return Ok(1.0);
    }

    let (tn, fp, fn_, tp) = (tn as f64, fp as f64, fn_ as f64, tp as f64);
    Ok(2.0 * (tp * tn - fn_ * fp) / ((tp + fn_) * (fn_ + tn) + (tp + fp) * (fp + tn)))
}
