//! Condensed storage of pairwise values.
//!
//! The values for all unordered pairs of `n` objects are kept in a flat array
//! in the order `(0,1), (0,2), ..., (0,n-1), (1,2), ..., (n-2,n-1)`, the same
//! layout scipy uses for `pdist` output.

use crate::errors::{Error, Result};
use ndarray::Array2;

/// Number of unordered pairs among `n_obj` objects.
pub fn n_pairs(n_obj: usize) -> usize {
    n_obj * n_obj.saturating_sub(1) / 2
}

/// Smallest integer whose square is at least `value`.
fn ceil_sqrt(value: u64) -> u64 {
    let root = value.isqrt();
    root + u64::from(root * root < value)
}

/// Row and column of the condensed index `idx` among `n_obj` objects.
///
/// Closed form inverse of the triangular enumeration: with `b = 1 - 2n`, the
/// row is `floor((-b - sqrt(b^2 - 8 idx)) / 2)` and the column is
/// `idx + row (b + row + 2) / 2 + 1`. The square root is taken in integer
/// arithmetic so the result is exact for every `idx < n (n - 1) / 2`.
pub fn coords_from_index(n_obj: usize, idx: usize) -> (usize, usize) {
    debug_assert!(idx < n_pairs(n_obj));

    let n = n_obj as u64;
    let idx = idx as u64;
    let a = 2 * n - 1;

    let row = (a - ceil_sqrt(a * a - 8 * idx)) / 2;
    let col = idx + 1 + row * (row + 3) / 2 - row * n;

    (row as usize, col as usize)
}

/// Condensed index of the pair `(i, j)`; the order of `i` and `j` does not matter.
pub fn index_from_coords(n_obj: usize, i: usize, j: usize) -> usize {
    debug_assert!(i != j && i < n_obj && j < n_obj);

    let (row, col) = (i.min(j), i.max(j));
    row * (2 * n_obj - row - 1) / 2 + (col - row - 1)
}

/// Number of objects behind a condensed array of `len` values.
pub fn n_objects_from_len(len: usize) -> Result<usize> {
    let n = (1 + (1 + 8 * len as u64).isqrt()) / 2;
    let n = n as usize;
    if n_pairs(n) != len || n < 2 {
        return Err(Error::invalid_input(format!(
            "{len} values do not form a condensed pairwise array"
        )));
    }
    Ok(n)
}

/// Expands a condensed array into a full symmetric matrix with `diagonal` on
/// the main diagonal.
pub fn squareform(condensed: &[f64], diagonal: f64) -> Result<Array2<f64>> {
    let n = n_objects_from_len(condensed.len())?;

    let mut square = Array2::from_elem((n, n), diagonal);
    for (idx, &value) in condensed.iter().enumerate() {
        let (i, j) = coords_from_index(n, idx);
        square[[i, j]] = value;
        square[[j, i]] = value;
    }

    Ok(square)
}
