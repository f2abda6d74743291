//! Quantile clustering of one-dimensional data.
//!
//! Objects are split by percentile cut points of their ranks rather than by
//! distance: with `k = 2` the median separates the two clusters, with `k = 4`
//! the quartiles do, and so on. Tied values always share a cluster, so heavily
//! tied or constant data can produce fewer than `k` clusters.

use crate::errors::{Error, Result};

/// Largest number of clusters whose labels still fit in an `i16`.
pub const MAX_CLUSTERS: usize = i16::MAX as usize + 1;

/// Percentiles (excluding 0.0 and 1.0) that split data into `k` clusters.
///
/// For `k = 2` this is `[0.5]`; for `k = 4` it is `[0.25, 0.5, 0.75]`.
/// Values of `k` below 2 give an empty list.
///
/// Each cut is a single rounded division, like the normalized ranks it is
/// compared with, so a rank equal to a cut is never pushed past it.
pub fn percentiles_from_k(k: usize) -> Vec<f64> {
    (1..k).map(|i| i as f64 / k as f64).collect()
}

/// Stable ascending argsort.
pub fn argsort(data: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));
    order
}

/// Average ranks (1-based) of `data`, given its ascending sort order.
///
/// Tied values receive the mean of the ranks they span.
pub fn rank_with_order(data: &[f64], order: &[usize]) -> Vec<f64> {
    let mut ranks = vec![0.0; data.len()];
    let mut start = 0;

    while start < order.len() {
        let value = data[order[start]];
        let end = order[start..]
            .iter()
            .position(|&i| data[i] != value)
            .map_or(order.len(), |offset| start + offset);

        let average = 0.5 * (start + end + 1) as f64;
        for &i in &order[start..end] {
            ranks[i] = average;
        }

        start = end;
    }

    ranks
}

/// Average ranks (1-based) of `data`.
pub fn rank(data: &[f64]) -> Vec<f64> {
    rank_with_order(data, &argsort(data))
}

/// Splits `data` into at most `k` clusters using quantiles of its ranks.
///
/// Returns one label per object, in the original object order. Labels are
/// contiguous starting at zero and increase with the data values.
pub fn run_quantile_clustering(data: &[f64], k: usize) -> Result<Vec<i16>> {
    if k < 2 {
        return Err(Error::invalid_input(format!(
            "number of clusters must be at least 2, got {k}"
        )));
    }
    if k > MAX_CLUSTERS {
        return Err(Error::invalid_input(format!(
            "number of clusters must be at most {MAX_CLUSTERS}, got {k}"
        )));
    }
    if data.is_empty() {
        return Err(Error::invalid_input("cannot cluster an empty vector"));
    }

    let order = argsort(data);
    let ranks = rank_with_order(data, &order);
    let max_rank = ranks.iter().copied().fold(f64::MIN, f64::max);
    let sorted_perc: Vec<f64> = order.iter().map(|&i| ranks[i] / max_rank).collect();

    let mut percentiles = Vec::with_capacity(k + 1);
    percentiles.push(0.0);
    percentiles.extend(percentiles_from_k(k));
    percentiles.push(1.0);

    let cut_points: Vec<usize> = percentiles
        .iter()
        .map(|&p| sorted_perc.partition_point(|&v| v <= p))
        .collect();

    let mut part = vec![0i16; data.len()];
    let mut current_cluster: i16 = 0;
    for limits in cut_points.windows(2) {
        let (lim1, lim2) = (limits[0], limits[1]);
        if lim1 >= lim2 {
            continue;
        }

        for &i in &order[lim1..lim2] {
            part[i] = current_cluster;
        }
        current_cluster += 1;
    }

    Ok(part)
}
