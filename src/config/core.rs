use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use crate::errors::Result;

/// Root configuration structure for clustermatch
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClustermatchConfig {
    /// Worker pool sizing
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Coefficient parameters
    #[serde(default)]
    pub coefficient: CoefficientConfig,
}

/// Parameters of the coefficient itself.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CoefficientConfig {
    /// Numbers of clusters used to partition every variable. When unset, the
    /// range `2..=min(round(sqrt(n_samples)), 10)` is used. Values outside
    /// `2..n_samples` are dropped with a warning when the data is known.
    #[serde(default)]
    pub internal_n_clusters: Option<Vec<usize>>,
}

impl ClustermatchConfig {
    /// Overlay `CM_*` environment variables read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.parallel.apply_env_overrides(lookup)
    }

    /// Default configuration file contents.
    pub fn default_toml() -> &'static str {
        r#"# Clustermatch configuration

[parallel]
# Worker threads (0 or unset: one per core). Overridden by CM_N_JOBS.
# n_jobs = 4
# n_jobs_low = 2

[coefficient]
# Numbers of clusters for every variable. Unset: 2..=min(round(sqrt(n_samples)), 10)
# internal_n_clusters = [2, 3, 4, 5]
"#
    }
}
