//! Correlation matrices computed with different coefficients.
//!
//! Every function takes variables in rows and samples in columns and returns a
//! symmetric `n x n` matrix with ones on the diagonal.

use crate::coef::{rank, validate_matrix, Clustermatch};
use crate::errors::Result;
use ndarray::{Array2, ArrayView2, Axis};

/// Pearson correlation between rows of `data`.
///
/// Pairs that involve a constant row are NaN.
pub fn pearson(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    validate_matrix(&data)?;

    let centered = match data.mean_axis(Axis(1)) {
        Some(means) => &data - &means.insert_axis(Axis(1)),
        None => data.to_owned(),
    };
    let norms: Vec<f64> = centered
        .rows()
        .into_iter()
        .map(|row| row.dot(&row).sqrt())
        .collect();

    let mut corr = centered.dot(&centered.t());
    for ((i, j), value) in corr.indexed_iter_mut() {
        *value = if i == j {
            1.0
        } else {
            (*value / (norms[i] * norms[j])).clamp(-1.0, 1.0)
        };
    }

    Ok(corr)
}

/// Spearman rank correlation between rows of `data`.
pub fn spearman(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    validate_matrix(&data)?;

    let mut ranked = Array2::zeros(data.raw_dim());
    for (mut out, row) in ranked.rows_mut().into_iter().zip(data.rows()) {
        let ranks = rank(&row.to_vec());
        for (cell, value) in out.iter_mut().zip(ranks) {
            *cell = value;
        }
    }

    pearson(ranked.view())
}

/// Clustermatch coefficient between rows of `data`, as a full matrix.
pub fn clustermatch(cm: &Clustermatch, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    cm.compute(data)?.to_square(1.0)
}
