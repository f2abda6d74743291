// Export modules for library usage
pub mod cli;
pub mod coef;
pub mod commands;
pub mod config;
pub mod corr;
pub mod errors;
pub mod io;
pub mod metrics;

// Re-export commonly used types
pub use crate::coef::{
    Clustermatch, ClustermatchResult, PairOutcome, PairResult, Partition, PartitionFamily,
    ThreadBudget, WorkerPool,
};
pub use crate::config::{ClustermatchConfig, ParallelConfig};
pub use crate::errors::{Error, Result};
pub use crate::metrics::adjusted_rand_index;
