use super::open_destination;
use crate::coef::{n_pairs, Clustermatch};
use crate::config::ClustermatchConfig;
use crate::corr;
use crate::io::{create_writer, read_matrix, CoefficientReport, Method, OutputFormat};
use anyhow::{Context, Result};
use ndarray::Array2;
use std::path::PathBuf;
use tracing::info;

/// Options of the `compute` command.
#[derive(Debug, Clone)]
pub struct ComputeConfig {
    pub matrix: PathBuf,
    pub method: Method,
    pub format: OutputFormat,
    pub square: bool,
    pub return_parts: bool,
    pub output: Option<PathBuf>,
}

fn square_to_rows(square: &Array2<f64>) -> Vec<Vec<f64>> {
    square.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Upper triangle of a symmetric matrix in condensed order.
fn condense(square: &Array2<f64>) -> Vec<f64> {
    let n = square.nrows();
    let mut values = Vec::with_capacity(n_pairs(n));
    for i in 0..n {
        for j in i + 1..n {
            values.push(square[[i, j]]);
        }
    }
    values
}

/// Keeping every partition in the report is memory heavy, so it runs on the
/// smaller `n_jobs_low` pool.
fn engine_settings(config: &ComputeConfig, settings: &ClustermatchConfig) -> ClustermatchConfig {
    let mut settings = settings.clone();
    if config.return_parts {
        settings.parallel.n_jobs = Some(settings.parallel.effective_jobs_low());
    }
    settings
}

/// Builds the report for `config.method` without writing it.
pub fn build_report(config: &ComputeConfig, settings: &ClustermatchConfig) -> Result<CoefficientReport> {
    let data = read_matrix(&config.matrix)
        .with_context(|| format!("Failed to read matrix {}", config.matrix.display()))?;
    info!(
        path = %config.matrix.display(),
        n_objects = data.nrows(),
        n_features = data.ncols(),
        "loaded matrix"
    );

    let report = match config.method {
        Method::Clustermatch => {
            let cm = Clustermatch::from_config(&engine_settings(config, settings))?;
            let result = cm.compute(data.view())?;
            let report = CoefficientReport::from_result(&result, config.return_parts);
            if config.square {
                report.with_square(square_to_rows(&result.to_square(1.0)?))
            } else {
                report
            }
        }
        Method::Pearson | Method::Spearman => {
            let square = if config.method == Method::Pearson {
                corr::pearson(data.view())?
            } else {
                corr::spearman(data.view())?
            };
            let report = CoefficientReport {
                method: config.method,
                n_objects: square.nrows(),
                ks: Vec::new(),
                coefficients: condense(&square),
                square: None,
                max_parts: None,
                parts: None,
            };
            if config.square {
                report.with_square(square_to_rows(&square))
            } else {
                report
            }
        }
    };

    Ok(report)
}

pub fn handle_compute(config: ComputeConfig, settings: &ClustermatchConfig) -> Result<()> {
    let report = build_report(&config, settings)?;

    let destination = open_destination(config.output.as_deref())?;
    let mut writer = create_writer(config.format, destination);
    writer.write_report(&report)?;

    Ok(())
}
