//! Command-line interface for sequencing delivery stops.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod sequence;

pub use error::CliError;

use sequence::{SequenceArgs, run_sequence};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_START_LAT: &str = "start-lat";
pub(crate) const ARG_START_LNG: &str = "start-lng";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_REQUEST: &str = "DROPLINE_CMDS_SEQUENCE_REQUEST_PATH";

/// Run the dropline CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Sequence(args) => run_sequence(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dropline",
    about = "Order delivery stops into a driving route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence the stops in a JSON manifest.
    Sequence(SequenceArgs),
}

#[cfg(test)]
mod tests;
