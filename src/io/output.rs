use crate::coef::{ClustermatchResult, PairOutcome, PartitionFamily};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, undefined coefficients as null
    Json,
    /// Tab-separated values
    Tsv,
}

/// Coefficient used to build a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Clustermatch,
    Pearson,
    Spearman,
}

/// Everything a command prints about one computation.
#[derive(Debug, Clone, Serialize)]
pub struct CoefficientReport {
    pub method: Method,
    pub n_objects: usize,
    /// Numbers of clusters behind each partition slot (clustermatch only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ks: Vec<usize>,
    /// Condensed pairwise coefficients.
    pub coefficients: Vec<f64>,
    /// Full symmetric matrix, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parts: Option<Vec<[usize; 2]>>,
    /// `object x slot x sample` labels, -1 for degenerate partitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Vec<Vec<i16>>>>,
}

fn raw_parts(parts: &[PartitionFamily]) -> Vec<Vec<Vec<i16>>> {
    parts.iter().map(PartitionFamily::to_raw).collect()
}

impl CoefficientReport {
    pub fn from_result(result: &ClustermatchResult, return_parts: bool) -> Self {
        Self {
            method: Method::Clustermatch,
            n_objects: result.n_objects(),
            ks: result.ks.clone(),
            coefficients: result.coefficients.to_vec(),
            square: None,
            max_parts: return_parts.then(|| {
                result
                    .max_parts
                    .rows()
                    .into_iter()
                    .map(|row| [row[0], row[1]])
                    .collect()
            }),
            parts: return_parts.then(|| raw_parts(&result.parts)),
        }
    }

    pub fn from_pair(outcome: &PairOutcome, return_parts: bool) -> Self {
        Self {
            method: Method::Clustermatch,
            n_objects: 2,
            ks: outcome
                .parts
                .first()
                .map(|family| family.ks().to_vec())
                .unwrap_or_default(),
            coefficients: vec![outcome.value],
            square: None,
            max_parts: return_parts.then(|| vec![[outcome.max_parts.0, outcome.max_parts.1]]),
            parts: return_parts.then(|| raw_parts(&outcome.parts)),
        }
    }

    /// Attach the expanded symmetric matrix.
    pub fn with_square(mut self, square: Vec<Vec<f64>>) -> Self {
        self.square = Some(square);
        self
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &CoefficientReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CoefficientReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_square(&mut self, square: &[Vec<f64>]) -> anyhow::Result<()> {
        for row in square {
            let line: Vec<String> = row.iter().map(|v| format_value(*v)).collect();
            writeln!(self.writer, "{}", line.join("\t"))?;
        }
        Ok(())
    }

    fn write_condensed(&mut self, report: &CoefficientReport) -> anyhow::Result<()> {
        let header = if report.max_parts.is_some() {
            "i\tj\tcoef\tpart_i\tpart_j"
        } else {
            "i\tj\tcoef"
        };
        writeln!(self.writer, "{header}")?;

        for (idx, &value) in report.coefficients.iter().enumerate() {
            let (i, j) = crate::coef::coords_from_index(report.n_objects, idx);
            write!(self.writer, "{i}\t{j}\t{}", format_value(value))?;
            if let Some(max_parts) = &report.max_parts {
                write!(self.writer, "\t{}\t{}", max_parts[idx][0], max_parts[idx][1])?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// One line per object and partition slot: `object`, `k`, then the labels.
    fn write_parts(&mut self, ks: &[usize], parts: &[Vec<Vec<i16>>]) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "object\tk\tlabels")?;
        for (object, family) in parts.iter().enumerate() {
            for (k, labels) in ks.iter().zip(family) {
                let labels: Vec<String> = labels.iter().map(i16::to_string).collect();
                writeln!(self.writer, "{object}\t{k}\t{}", labels.join("\t"))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TsvWriter<W> {
    /// Writes the coefficient table; when partitions are included they follow
    /// as a second table after a blank line.
    fn write_report(&mut self, report: &CoefficientReport) -> anyhow::Result<()> {
        match &report.square {
            Some(square) => self.write_square(square)?,
            None => self.write_condensed(report)?,
        }
        if let Some(parts) = &report.parts {
            self.write_parts(&report.ks, parts)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.6}")
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Tsv => Box::new(TsvWriter::new(writer)),
    }
}
