//! Configuration for the coefficient engine.
//!
//! Values are resolved in this order, later sources winning: built-in
//! defaults, a `.clustermatch.toml` file, `CM_*` environment variables and
//! finally command-line flags.

mod core;
mod loader;
mod parallel;

pub use self::core::{ClustermatchConfig, CoefficientConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
pub use parallel::{ParallelConfig, ENV_N_JOBS, ENV_N_JOBS_LOW};
