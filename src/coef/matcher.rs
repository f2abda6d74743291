//! All-pairs comparison of two partition families.

use super::partitions::Partition;
use super::pool::ThreadBudget;
use crate::errors::Result;
use crate::metrics::adjusted_rand_index;
use ndarray::Array2;
use rayon::prelude::*;

/// ARI between two partitions, or NaN when either one is degenerate.
fn compare(a: &Partition, b: &Partition) -> Result<f64> {
    match (a.labels(), b.labels()) {
        (Some(a), Some(b)) => adjusted_rand_index(a, b),
        _ => Ok(f64::NAN),
    }
}

/// Like `cdist(x, y, metric=ari)`: cell `(i, j)` holds the adjusted Rand
/// index between `x[i]` and `y[j]`.
///
/// Rows are spread over the current rayon pool unless `budget` is serial, in
/// at most `budget.threads()` chunks. Both families may have different sizes,
/// but all partitions must cover the same objects.
pub fn cdist_parts(x: &[Partition], y: &[Partition], budget: ThreadBudget) -> Result<Array2<f64>> {
    let compare_row =
        |a: &Partition| -> Result<Vec<f64>> { y.iter().map(|b| compare(a, b)).collect() };

    let rows: Vec<Vec<f64>> = if budget.is_serial() {
        x.iter().map(compare_row).collect::<Result<_>>()?
    } else {
        let min_len = x.len().div_ceil(budget.threads()).max(1);
        x.par_iter()
            .with_min_len(min_len)
            .map(compare_row)
            .collect::<Result<_>>()?
    };

    let mut res = Array2::from_elem((x.len(), y.len()), f64::NAN);
    for (mut out, values) in res.rows_mut().into_iter().zip(rows) {
        for (cell, value) in out.iter_mut().zip(values) {
            *cell = value;
        }
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coef::pool::WorkerPool;

    fn valid(labels: &[i16]) -> Partition {
        Partition::Valid(labels.to_vec())
    }

    #[test]
    fn test_rectangular_result() {
        let x = vec![valid(&[0, 0, 1, 1]), valid(&[0, 1, 2, 2]), valid(&[0, 1, 0, 1])];
        let y = vec![valid(&[1, 1, 0, 0]), valid(&[0, 0, 1, 2])];

        let res = cdist_parts(&x, &y, ThreadBudget::Serial).unwrap();

        assert_eq!(res.dim(), (3, 2));
        assert_eq!(res[[0, 0]], 1.0);
        assert!((res[[0, 1]] - 0.571_428_571_428_571_4).abs() < 1e-12);
        assert!((res[[2, 0]] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_cells_are_nan() {
        let x = vec![valid(&[0, 0, 1, 1]), Partition::Degenerate];
        let y = vec![Partition::Degenerate, valid(&[0, 0, 1, 1])];

        let res = cdist_parts(&x, &y, ThreadBudget::Serial).unwrap();

        assert!(res[[0, 0]].is_nan());
        assert_eq!(res[[0, 1]], 1.0);
        assert!(res[[1, 0]].is_nan());
        assert!(res[[1, 1]].is_nan());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let x: Vec<Partition> = (0..6)
            .map(|s| valid(&(0..20).map(|i| ((i * (s + 1)) % 3) as i16).collect::<Vec<_>>()))
            .collect();
        let y: Vec<Partition> = (0..4)
            .map(|s| valid(&(0..20).map(|i| ((i + s) % 4) as i16).collect::<Vec<_>>()))
            .collect();

        let pool = WorkerPool::new(3).unwrap();
        let parallel = pool
            .install(|| cdist_parts(&x, &y, pool.budget()))
            .unwrap();
        let serial = cdist_parts(&x, &y, ThreadBudget::Serial).unwrap();

        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_budget_smaller_than_rows() {
        let x: Vec<Partition> = (0..7)
            .map(|s| valid(&(0..12).map(|i| ((i + s) % 3) as i16).collect::<Vec<_>>()))
            .collect();

        let pool = WorkerPool::new(4).unwrap();
        let bounded = pool
            .install(|| cdist_parts(&x, &x, ThreadBudget::Parallel(2)))
            .unwrap();

        assert_eq!(bounded, cdist_parts(&x, &x, ThreadBudget::Serial).unwrap());
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let x = vec![valid(&[0, 0, 1, 1])];
        let y = vec![valid(&[0, 1, 1])];
        assert!(cdist_parts(&x, &y, ThreadBudget::Serial).is_err());
    }

    #[test]
    fn test_empty_family() {
        let y = vec![valid(&[0, 1])];
        let res = cdist_parts(&[], &y, ThreadBudget::Serial).unwrap();
        assert_eq!(res.dim(), (0, 1));
    }
}
