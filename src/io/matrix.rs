//! Delimited text matrices: one variable per line, samples separated by
//! commas, tabs or spaces. Blank lines and lines starting with `#` are skipped.

use crate::errors::{Error, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
}

/// Parse one delimited row of numbers, e.g. `"1.5, 2, 3e-2"`.
pub fn parse_row(line: &str) -> std::result::Result<Vec<f64>, String> {
    split_fields(line)
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("not a number: '{field}'"))
        })
        .collect()
}

/// Parse matrix text; `source` is only used in error messages.
pub fn parse_matrix(contents: &str, source: &Path) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_row(line).map_err(|message| Error::parse(source, line_no + 1, message))?;
        match n_cols {
            None => n_cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(Error::parse(
                    source,
                    line_no + 1,
                    format!("expected {expected} values, found {}", row.len()),
                ));
            }
            Some(_) => {}
        }

        values.extend(row);
        n_rows += 1;
    }

    Ok(Array2::from_shape_vec((n_rows, n_cols.unwrap_or(0)), values)?)
}

/// Read a matrix file from disk.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let contents = fs::read_to_string(path)?;
    parse_matrix(&contents, path)
}
