//! Entry point for the `trailmark` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use trailmark_cli::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match trailmark_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Lets clap print help and version text with its own exit codes.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("trailmark: {err}");
            ExitCode::FAILURE
        }
    }
}
