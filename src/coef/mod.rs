//! The Clustermatch coefficient.
//!
//! Each variable is partitioned with quantile clustering at several
//! resolutions, and two variables are as similar as their best-matching pair
//! of partitions according to the adjusted Rand index. This captures linear,
//! monotonic and non-monotonic associations alike.
//!
//! ```
//! use clustermatch::coef::{Clustermatch, WorkerPool};
//!
//! let cm = Clustermatch::new(WorkerPool::new(2)?);
//! let x: Vec<f64> = (0..50).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| (v - 25.0).powi(2)).collect();
//!
//! let outcome = cm.compute_pair(&x, &y)?;
//! assert!(outcome.value > 0.0 && outcome.value <= 1.0);
//! # Ok::<(), clustermatch::errors::Error>(())
//! ```

pub mod condensed;
pub mod matcher;
pub mod partitions;
pub mod pool;
pub mod quantile;
pub mod search;

pub use condensed::{coords_from_index, index_from_coords, n_pairs, squareform};
pub use matcher::cdist_parts;
pub use partitions::{range_n_clusters, Partition, PartitionFamily, DEGENERATE_LABEL};
pub use pool::{get_worker_count, ThreadBudget, WorkerPool};
pub use quantile::{rank, run_quantile_clustering};
pub use search::{best_match, PairResult};

use crate::config::ClustermatchConfig;
use crate::errors::{Error, Result};
use ndarray::{Array1, Array2, Array3, ArrayView2};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

/// Coefficients of every pair of rows of an input matrix.
#[derive(Debug, Clone)]
pub struct ClustermatchResult {
    /// Condensed coefficients, one per pair of rows, NaN where undefined.
    pub coefficients: Array1<f64>,
    /// For each pair, the partition slots (of the first and second row) that
    /// maximized the ARI. Rows whose coefficient is NaN are meaningless.
    pub max_parts: Array2<usize>,
    /// Partitions of every row.
    pub parts: Vec<PartitionFamily>,
    /// Number of clusters behind each partition slot.
    pub ks: Vec<usize>,
}

impl ClustermatchResult {
    pub fn n_objects(&self) -> usize {
        self.parts.len()
    }

    /// Coefficient between rows `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.n_objects();
        if i == j || i >= n || j >= n {
            return None;
        }
        Some(self.coefficients[index_from_coords(n, i, j)])
    }

    /// Symmetric `n x n` coefficient matrix with `diagonal` on the diagonal.
    pub fn to_square(&self, diagonal: f64) -> Result<Array2<f64>> {
        squareform(&self.coefficients.to_vec(), diagonal)
    }

    /// Partitions as an `object x slot x sample` array; degenerate partitions
    /// are filled with [`DEGENERATE_LABEL`].
    pub fn parts_tensor(&self) -> Result<Array3<i16>> {
        let n_features = self.parts.first().map_or(0, PartitionFamily::n_objects);
        let values: Vec<i16> = self
            .parts
            .iter()
            .flat_map(PartitionFamily::to_raw)
            .flatten()
            .collect();

        Ok(Array3::from_shape_vec(
            (self.parts.len(), self.ks.len(), n_features),
            values,
        )?)
    }
}

/// Coefficient between two variables.
#[derive(Debug, Clone)]
pub struct PairOutcome {
    /// Coefficient in `[0, 1]`, or NaN if either variable is constant.
    pub value: f64,
    /// Partition slots of `x` and `y` that maximized the ARI.
    pub max_parts: (usize, usize),
    /// Partitions of `x` and `y`.
    pub parts: Vec<PartitionFamily>,
}

/// Clustermatch engine bound to a worker pool.
#[derive(Debug, Clone)]
pub struct Clustermatch {
    pool: WorkerPool,
    internal_n_clusters: Option<Vec<usize>>,
}

impl Clustermatch {
    pub fn new(pool: WorkerPool) -> Self {
        Self {
            pool,
            internal_n_clusters: None,
        }
    }

    /// Engine with its own pool of `jobs` workers (zero means one per core).
    pub fn with_jobs(jobs: usize) -> Result<Self> {
        Ok(Self::new(WorkerPool::new(jobs)?))
    }

    pub fn from_config(config: &ClustermatchConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.parallel.effective_jobs())?;
        let cm = Self::new(pool);
        Ok(match &config.coefficient.internal_n_clusters {
            Some(ks) => cm.with_internal_n_clusters(ks.iter().copied()),
            None => cm,
        })
    }

    /// Use these numbers of clusters instead of the default range.
    pub fn with_internal_n_clusters(mut self, ks: impl IntoIterator<Item = usize>) -> Self {
        self.internal_n_clusters = Some(ks.into_iter().collect());
        self
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    pub fn internal_n_clusters(&self) -> Option<&[usize]> {
        self.internal_n_clusters.as_deref()
    }

    /// Budgets of the outer layer (rows and pairs) and of the inner layer
    /// (partition comparisons of one pair) for a matrix of `n_objects` rows.
    ///
    /// The inner layer only gets the pool when there is a single pair.
    pub fn layer_budgets(&self, n_objects: usize) -> (ThreadBudget, ThreadBudget) {
        let outer = self.pool.budget();
        (outer, outer.for_inner_layer(n_pairs(n_objects)))
    }

    /// Computes the coefficient between every pair of rows of `data`.
    ///
    /// Rows are variables and columns are samples. Results are laid out in
    /// condensed order (see [`condensed`]).
    pub fn compute(&self, data: ArrayView2<'_, f64>) -> Result<ClustermatchResult> {
        let (n_objects, n_features) = data.dim();
        validate_matrix(&data)?;

        let ks = range_n_clusters(n_features, self.internal_n_clusters());
        let n_pairs = n_pairs(n_objects);
        let (budget, inner_budget) = self.layer_budgets(n_objects);

        let _span = info_span!("clustermatch", n_objects, n_features, n_pairs).entered();
        debug!(?ks, ?budget, ?inner_budget, "computing partitions");

        let (parts, coefficients, max_parts) = self.pool.install(|| -> Result<_> {
            let parts = (0..n_objects)
                .into_par_iter()
                .map(|i| {
                    let row = data.row(i);
                    match row.as_slice() {
                        Some(values) => PartitionFamily::build(values, &ks),
                        None => PartitionFamily::build(&row.to_vec(), &ks),
                    }
                })
                .collect::<Result<Vec<_>>>()?;

            let mut coefficients = vec![f64::NAN; n_pairs];
            let mut max_parts = vec![[0usize; 2]; n_pairs];
            coefficients
                .par_iter_mut()
                .zip(max_parts.par_iter_mut())
                .enumerate()
                .try_for_each(|(idx, (value, slots))| -> Result<()> {
                    let (i, j) = coords_from_index(n_objects, idx);
                    let result = best_match(&parts[i], &parts[j], inner_budget)?;
                    *value = result.value;
                    *slots = [result.max_parts.0, result.max_parts.1];
                    Ok(())
                })?;

            Ok((parts, coefficients, max_parts))
        })?;

        let n_undefined = coefficients.iter().filter(|v| v.is_nan()).count();
        info!(n_pairs, n_undefined, "computed clustermatch coefficients");

        Ok(ClustermatchResult {
            coefficients: Array1::from(coefficients),
            max_parts: Array2::from_shape_vec(
                (n_pairs, 2),
                max_parts.into_iter().flatten().collect(),
            )?,
            parts,
            ks,
        })
    }

    /// Computes the coefficient between two variables of equal length.
    pub fn compute_pair(&self, x: &[f64], y: &[f64]) -> Result<PairOutcome> {
        if x.len() != y.len() {
            return Err(Error::invalid_input(format!(
                "x and y must have the same length, got {} and {}",
                x.len(),
                y.len()
            )));
        }

        let data = Array2::from_shape_vec((2, x.len()), [x, y].concat())?;
        let result = self.compute(data.view())?;

        Ok(PairOutcome {
            value: result.coefficients[0],
            max_parts: (result.max_parts[[0, 0]], result.max_parts[[0, 1]]),
            parts: result.parts,
        })
    }
}

/// Rejects inputs the coefficient is not defined for.
pub(crate) fn validate_matrix(data: &ArrayView2<'_, f64>) -> Result<()> {
    let (n_objects, n_features) = data.dim();
    if n_objects < 2 {
        return Err(Error::invalid_input(format!(
            "at least two variables are needed, got {n_objects}"
        )));
    }
    if n_features < 2 {
        return Err(Error::invalid_input(format!(
            "at least two samples per variable are needed, got {n_features}"
        )));
    }
    if let Some(((row, col), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(Error::invalid_input(format!(
            "non-finite value {value} at variable {row}, sample {col}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    fn engine() -> Clustermatch {
        Clustermatch::with_jobs(2).unwrap()
    }

    #[test]
    fn test_pair_of_identical_variables() {
        let x = [3.0, 1.0, 4.0, 1.5, 5.0, 9.0, 2.0, 6.0, 5.5];
        let outcome = engine().compute_pair(&x, &x).unwrap();

        assert_eq!(outcome.value, 1.0);
        assert_eq!(outcome.max_parts, (0, 0));
        assert_eq!(outcome.parts.len(), 2);
        assert_eq!(outcome.parts[0], outcome.parts[1]);
    }

    #[test]
    fn test_inner_layer_gets_pool_only_for_a_single_pair() {
        let cm = Clustermatch::with_jobs(4).unwrap();

        let (outer, inner) = cm.layer_budgets(2);
        assert_eq!(outer, ThreadBudget::Parallel(4));
        assert_eq!(inner, ThreadBudget::Parallel(4));

        for n_objects in [3, 4, 100] {
            let (outer, inner) = cm.layer_budgets(n_objects);
            assert_eq!(outer, ThreadBudget::Parallel(4));
            assert_eq!(inner, ThreadBudget::Serial, "n_objects = {n_objects}");
        }
    }

    #[test]
    fn test_single_worker_pool_is_serial_everywhere() {
        let cm = Clustermatch::with_jobs(1).unwrap();
        assert_eq!(cm.layer_budgets(2), (ThreadBudget::Serial, ThreadBudget::Serial));
    }

    #[test]
    fn test_explicit_ks_are_filtered() {
        let data = Array2::from_shape_fn((2, 10), |(i, j)| ((i + 2) * j % 11) as f64);
        let result = engine()
            .with_internal_n_clusters([1, 0, 3, 2, 3, 10, 50])
            .compute(data.view())
            .unwrap();

        assert_eq!(result.ks, vec![2, 3]);
        assert_eq!(result.parts[0].len(), 2);
    }

    #[test]
    fn test_pair_length_mismatch() {
        let err = engine().compute_pair(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_nan() {
        let data = array![[1.0, 2.0, f64::NAN], [1.0, 2.0, 3.0]];
        assert!(matches!(
            engine().compute(data.view()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_single_variable() {
        let data = array![[1.0, 2.0, 3.0]];
        assert!(engine().compute(data.view()).is_err());
    }

    #[test]
    fn test_result_shapes() {
        let data = Array2::from_shape_fn((5, 16), |(i, j)| ((i + 1) * j % 7) as f64);
        let result = engine().compute(data.view()).unwrap();

        assert_eq!(result.ks, vec![2, 3, 4]);
        assert_eq!(result.coefficients.len(), 10);
        assert_eq!(result.max_parts.dim(), (10, 2));
        assert_eq!(result.parts.len(), 5);
        assert_eq!(result.parts_tensor().unwrap().dim(), (5, 3, 16));
        assert_eq!(result.to_square(1.0).unwrap().dim(), (5, 5));
    }

    #[test]
    fn test_get_uses_condensed_order() {
        let data = array![
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            [6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
            [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        ];
        let result = engine()
            .with_internal_n_clusters([2, 3])
            .compute(data.view())
            .unwrap();

        assert_eq!(result.get(0, 1), Some(1.0));
        assert_eq!(result.get(1, 0), Some(1.0));
        assert!(result.get(0, 2).is_some_and(f64::is_nan));
        assert!(result.get(1, 2).is_some_and(f64::is_nan));
        assert_eq!(result.get(1, 1), None);
        assert_eq!(result.get(0, 3), None);
    }

    #[test]
    fn test_column_major_input() {
        let data = array![[1.0, 2.0, 3.0, 4.0], [4.0, 1.0, 3.0, 2.0]];
        let transposed = data.t().to_owned();
        let result = engine().compute(transposed.t()).unwrap();
        let expected = engine().compute(data.view()).unwrap();

        assert_eq!(result.coefficients, expected.coefficients);
    }

    #[test]
    fn test_serial_pool_matches_parallel_pool() {
        let data = Array2::from_shape_fn((6, 30), |(i, j)| ((j * 7 + i * 13) % 11) as f64 + i as f64);

        let serial = Clustermatch::with_jobs(1).unwrap().compute(data.view()).unwrap();
        let parallel = Clustermatch::with_jobs(4).unwrap().compute(data.view()).unwrap();

        assert_eq!(serial.max_parts, parallel.max_parts);
        for (a, b) in serial.coefficients.iter().zip(parallel.coefficients.iter()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
}
