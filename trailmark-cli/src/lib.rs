//! Command-line interface for the Trailmark check-in engine.
#![forbid(unsafe_code)]

use std::fmt;
use std::io::{BufRead, Write};

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod distance;
mod error;
mod gems;
mod play;

pub use error::CliError;

use distance::DistanceArgs;
use gems::GemsArgs;
use play::PlayArgs;

const ARG_CATALOG: &str = "catalog";
const ARG_SEED: &str = "seed";
const ARG_STORE: &str = "store";
const DEFAULT_STORE: &str = "trailmark-gems.json";

/// Run the Trailmark CLI with the current process arguments, environment and
/// standard streams.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration or the selected
/// command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout().lock();
    dispatch(cli.command, &mut input, &mut output)
}

fn dispatch(
    command: Command,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Play(args) => play::run_play(args, input, output),
        Command::Distance(args) => distance::run_distance(&args, output),
        Command::Gems(args) => gems::run_gems(args, output),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "trailmark",
    about = "Geofenced check-ins, rewards and hidden gems",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play an interactive check-in session on the terminal.
    Play(PlayArgs),
    /// Measure the great-circle distance between two positions.
    Distance(DistanceArgs),
    /// Submit and browse hidden gems.
    Gems(GemsArgs),
}

fn say(output: &mut dyn Write, args: fmt::Arguments<'_>) -> Result<(), CliError> {
    output.write_fmt(args).map_err(CliError::WriteOutput)
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match trailmark_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
