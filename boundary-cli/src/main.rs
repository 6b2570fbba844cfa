//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match boundary_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(boundary_cli::CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("boundary: {err}");
            ExitCode::FAILURE
        }
    }
}
