use anyhow::Result;
use clustermatch::cli::{self, Cli, Commands, ConfigOverrides};
use clustermatch::commands::{self, ComputeConfig, PairConfig};
use clustermatch::Error;
use std::process::ExitCode;

/// Exit status for bad input data, matching clap's status for bad arguments.
const EXIT_INPUT_ERROR: u8 = 2;

// Main orchestrator function
fn main() -> ExitCode {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            exit_code(&e)
        }
    }
}

fn exit_code(error: &anyhow::Error) -> ExitCode {
    let input_error = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(Error::is_input_error);

    if input_error {
        ExitCode::from(EXIT_INPUT_ERROR)
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compute {
            matrix,
            n_clusters,
            jobs,
            method,
            format,
            square,
            return_parts,
            output,
        } => {
            let settings =
                cli::resolve_config(cli.config.as_deref(), ConfigOverrides { jobs, n_clusters })?;
            commands::handle_compute(
                ComputeConfig {
                    matrix,
                    method,
                    format,
                    square,
                    return_parts,
                    output,
                },
                &settings,
            )
        }
        Commands::Pair {
            x,
            y,
            n_clusters,
            jobs,
            format,
            return_parts,
        } => {
            let settings =
                cli::resolve_config(cli.config.as_deref(), ConfigOverrides { jobs, n_clusters })?;
            commands::handle_pair(
                PairConfig {
                    x,
                    y,
                    format,
                    return_parts,
                },
                &settings,
            )
        }
        Commands::Init { force } => {
            let current = std::env::current_dir()?;
            commands::init_config(&current, force)
        }
    }
}
