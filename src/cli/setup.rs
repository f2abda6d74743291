//! Setup and initialization functions for CLI
//!
//! Logging is installed once at startup; configuration is merged from file,
//! environment and flags before a command runs.

use crate::config::{load_config, load_config_from, ClustermatchConfig};
use crate::errors::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Default log filter for a `-v` count.
pub fn default_log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the verbosity flag. `log` records from dependencies
/// are forwarded to the same subscriber.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbosity)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        // Already configured - this is fine, just ignore
        eprintln!("Note: logging already configured: {}", e);
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub jobs: Option<usize>,
    pub n_clusters: Option<Vec<usize>>,
}

/// Merge defaults, config file, `CM_*` variables and command-line flags.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ClustermatchConfig> {
    let mut config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    apply_overrides(&mut config, overrides);

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn apply_overrides(config: &mut ClustermatchConfig, overrides: ConfigOverrides) {
    if let Some(jobs) = overrides.jobs {
        config.parallel.n_jobs = Some(jobs);
    }
    if let Some(ks) = overrides.n_clusters {
        config.coefficient.internal_n_clusters = Some(ks);
    }
}
