use super::open_destination;
use crate::coef::Clustermatch;
use crate::config::ClustermatchConfig;
use crate::errors::Error;
use crate::io::{create_writer, parse_row, CoefficientReport, OutputFormat};
use anyhow::Result;

/// Options of the `pair` command.
#[derive(Debug, Clone)]
pub struct PairConfig {
    pub x: String,
    pub y: String,
    pub format: OutputFormat,
    pub return_parts: bool,
}

fn parse_variable(name: &str, values: &str) -> Result<Vec<f64>> {
    Ok(parse_row(values).map_err(|e| Error::invalid_input(format!("values for --{name}: {e}")))?)
}

pub fn build_report(config: &PairConfig, settings: &ClustermatchConfig) -> Result<CoefficientReport> {
    let x = parse_variable("x", &config.x)?;
    let y = parse_variable("y", &config.y)?;

    let cm = Clustermatch::from_config(settings)?;
    let outcome = cm.compute_pair(&x, &y)?;

    Ok(CoefficientReport::from_pair(&outcome, config.return_parts))
}

pub fn handle_pair(config: PairConfig, settings: &ClustermatchConfig) -> Result<()> {
    let report = build_report(&config, settings)?;

    let mut writer = create_writer(config.format, open_destination(None)?);
    writer.write_report(&report)?;

    Ok(())
}
