//! Maximization over the partition similarity matrix of one variable pair.

use super::matcher::cdist_parts;
use super::partitions::PartitionFamily;
use super::pool::ThreadBudget;
use crate::errors::Result;
use ndarray::Array2;

/// Coefficient of one variable pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResult {
    /// Coefficient in `[0, 1]`, or NaN when undefined.
    pub value: f64,
    /// Slots of the two partitions that maximized the ARI. Meaningless when
    /// `value` is NaN.
    pub max_parts: (usize, usize),
}

impl PairResult {
    pub fn undefined() -> Self {
        Self {
            value: f64::NAN,
            max_parts: (0, 0),
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.value.is_nan()
    }
}

/// First maximum in row-major order, ignoring NaN cells.
pub fn argmax_2d(values: &Array2<f64>) -> Option<((usize, usize), f64)> {
    values
        .indexed_iter()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (idx, &v)| match best {
            Some((_, current)) if current >= v => best,
            _ => Some((idx, v)),
        })
}

/// Compares every partition of `x` with every partition of `y` and keeps the
/// best match.
///
/// A negative maximum is floored to zero, but its position is still reported.
pub fn best_match(
    x: &PartitionFamily,
    y: &PartitionFamily,
    budget: ThreadBudget,
) -> Result<PairResult> {
    if !x.is_informative() || !y.is_informative() {
        return Ok(PairResult::undefined());
    }

    let comp_values = cdist_parts(x.partitions(), y.partitions(), budget)?;

    Ok(match argmax_2d(&comp_values) {
        Some((max_parts, max_ari)) => PairResult {
            value: max_ari.max(0.0),
            max_parts,
        },
        None => PairResult::undefined(),
    })
}
