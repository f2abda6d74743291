//! Worker counts for the coefficient computation.

use crate::coef::get_worker_count;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ParallelConfig::n_jobs`].
pub const ENV_N_JOBS: &str = "CM_N_JOBS";

/// Environment variable overriding [`ParallelConfig::n_jobs_low`].
pub const ENV_N_JOBS_LOW: &str = "CM_N_JOBS_LOW";

/// Configuration for parallel processing.
///
/// # Example
///
/// ```rust
/// use clustermatch::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     n_jobs: Some(4),
///     n_jobs_low: None,
/// };
/// assert_eq!(config.effective_jobs(), 4);
/// assert_eq!(config.effective_jobs_low(), 4);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Worker threads for coefficient computation (default: one per core).
    #[serde(default)]
    pub n_jobs: Option<usize>,

    /// Worker threads for memory-heavy jobs, such as keeping every partition
    /// in the output (default: same as `n_jobs`).
    #[serde(default)]
    pub n_jobs_low: Option<usize>,
}

impl ParallelConfig {
    /// Create a config that runs everything on a single worker.
    pub fn sequential() -> Self {
        Self {
            n_jobs: Some(1),
            n_jobs_low: Some(1),
        }
    }

    /// Get the effective worker count, resolving "all cores".
    pub fn effective_jobs(&self) -> usize {
        get_worker_count(self.n_jobs.unwrap_or(0))
    }

    /// Get the effective worker count for memory-heavy jobs.
    pub fn effective_jobs_low(&self) -> usize {
        self.n_jobs_low
            .map(get_worker_count)
            .unwrap_or_else(|| self.effective_jobs())
    }

    /// Apply `CM_N_JOBS` / `CM_N_JOBS_LOW` using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = parse_env_jobs(&lookup, ENV_N_JOBS)? {
            self.n_jobs = Some(n);
        }
        if let Some(n) = parse_env_jobs(&lookup, ENV_N_JOBS_LOW)? {
            self.n_jobs_low = Some(n);
        }
        Ok(())
    }
}

fn parse_env_jobs<F>(lookup: &F, key: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<usize>().map_err(|_| {
                Error::Configuration(format!("{key} must be a non-negative integer, got '{value}'"))
            })
        })
        .transpose()
}
