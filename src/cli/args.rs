use crate::io::{Method, OutputFormat};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clustermatch")]
#[command(about = "Clustermatch correlation coefficient for numeric variables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: search for .clustermatch.toml upwards)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute coefficients between every pair of rows of a matrix file
    Compute {
        /// Delimited text file, one variable per line
        matrix: PathBuf,

        /// Numbers of clusters used to partition each variable
        #[arg(short = 'k', long = "n-clusters", value_delimiter = ',')]
        n_clusters: Option<Vec<usize>>,

        /// Worker threads (0: one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Correlation coefficient
        #[arg(short, long, value_enum, default_value = "clustermatch")]
        method: Method,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Also output the full symmetric matrix
        #[arg(long)]
        square: bool,

        /// Include maximizing partition indexes and all partitions
        #[arg(long)]
        return_parts: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute the coefficient between two variables
    Pair {
        /// Values of the first variable, comma separated
        #[arg(long, allow_hyphen_values = true)]
        x: String,

        /// Values of the second variable, comma separated
        #[arg(long, allow_hyphen_values = true)]
        y: String,

        /// Numbers of clusters used to partition each variable
        #[arg(short = 'k', long = "n-clusters", value_delimiter = ',')]
        n_clusters: Option<Vec<usize>>,

        /// Worker threads (0: one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Include maximizing partition indexes and both partition families
        #[arg(long)]
        return_parts: bool,
    },

    /// Write a default .clustermatch.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
