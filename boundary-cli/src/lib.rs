//! Command-line interface for computing concave hulls of point layers.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod hull;

pub use error::CliError;

pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_LAYER: &str = "layer";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_OUTPUT_LAYER: &str = "output-layer";
pub(crate) const ARG_DRIVER: &str = "driver";
pub(crate) const ARG_CRS: &str = "crs";
pub(crate) const ARG_PERCENTILE: &str = "percentile";
pub(crate) const ARG_TOLERANCE: &str = "tolerance";
pub(crate) const ENV_INPUT: &str = "BOUNDARY_CMDS_HULL_INPUT";

/// Run the boundary CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, a source
/// cannot be ingested, the hull cannot be exported, or the report cannot be
/// written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Hull(args) => hull::run_hull(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "boundary",
    about = "Concave hull generation for point layers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ingest point layers and export their concave hull.
    Hull(hull::HullArgs),
}

#[cfg(test)]
mod tests;
