//! CLI module for clustermatch
//!
//! - Argument parsing (`args`)
//! - Runtime setup: logging and configuration resolution (`setup`)

pub mod args;
pub mod setup;

pub use args::{Cli, Commands};
pub use setup::{init_logging, resolve_config, ConfigOverrides};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    use clap::Parser;
    Cli::parse()
}
