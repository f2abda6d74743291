//! Reading input matrices and writing coefficient reports.

pub mod matrix;
pub mod output;

pub use matrix::{parse_matrix, parse_row, read_matrix};
pub use output::{create_writer, CoefficientReport, Method, OutputFormat, OutputWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
