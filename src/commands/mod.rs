//! CLI command implementations.
//!
//! - **compute**: coefficients between all rows of a matrix file
//! - **pair**: coefficient between two variables given inline
//! - **init**: write a default configuration file

pub mod compute;
pub mod init;
pub mod pair;

pub use compute::{handle_compute, ComputeConfig};
pub use init::init_config;
pub use pair::{handle_pair, PairConfig};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Stdout, or a buffered file when a path is given.
pub(crate) fn open_destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    })
}
