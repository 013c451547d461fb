//! Interactive check-in session for the Trailmark CLI.

use std::io::{BufRead, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trailmark_core::{
    Catalog, CheckInOutcome, MessageProvider, RewardSession, TemplateMessageProvider, builtin,
    describe_or_fallback,
};
use trailmark_data::load_catalog;

use crate::{ARG_CATALOG, ARG_SEED, CliError, require_existing, say};

/// CLI arguments for the `play` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Offer targets one at a time and check in by typing a \
                 position as 'lat,lon' or 'lat lon'. Type 'reset' to start \
                 over or 'exit' to stop. Without a catalog file the built-in \
                 Kerala tour is played.",
    about = "Play an interactive check-in session"
)]
#[ortho_config(prefix = "TRAILMARK")]
pub(crate) struct PlayArgs {
    /// CSV catalog with columns id,name,lat,lon,radius_m,points.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Seed for target selection; a random seed is drawn when omitted.
    #[arg(long = ARG_SEED, value_name = "u64")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl PlayArgs {
    pub(crate) fn into_config(self) -> Result<PlayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(PlayConfig::from(merged))
    }
}

/// Resolved `play` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayConfig {
    /// Catalog file, or `None` for the built-in tour.
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Fixed seed, or `None` to draw one.
    pub(crate) seed: Option<u64>,
}

impl PlayConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.catalog {
            Some(path) => require_existing(path, ARG_CATALOG),
            None => Ok(()),
        }
    }

    pub(crate) fn load_catalog(&self) -> Result<Catalog, CliError> {
        match &self.catalog {
            Some(path) => Ok(load_catalog(path)?),
            None => Ok(builtin::kerala_tour()),
        }
    }
}

impl From<PlayArgs> for PlayConfig {
    fn from(args: PlayArgs) -> Self {
        Self {
            catalog: args.catalog,
            seed: args.seed,
        }
    }
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PlayCommand {
    CheckIn { latitude: f64, longitude: f64 },
    Reset,
    Exit,
}

/// Why a line of player input was not understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("enter a position as 'lat,lon' or 'lat lon', or type 'reset' or 'exit'")]
    Unrecognised,
    #[error("'{value}' is not a number")]
    NotANumber { value: String },
}

impl PlayCommand {
    pub(crate) fn parse(line: &str) -> Result<Self, InputError> {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(Self::Exit);
        }
        if trimmed.eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }

        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let [lat, lon] = parts.as_slice() else {
            return Err(InputError::Unrecognised);
        };
        Ok(Self::CheckIn {
            latitude: parse_number(lat)?,
            longitude: parse_number(lon)?,
        })
    }
}

fn parse_number(value: &str) -> Result<f64, InputError> {
    value.parse().map_err(|_| InputError::NotANumber {
        value: value.to_owned(),
    })
}

pub(crate) fn run_play(
    args: PlayArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let catalog = config.load_catalog()?;
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!("starting session over {} targets with seed {seed}", catalog.len());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    play_session(catalog, &mut rng, &TemplateMessageProvider, input, output)?;
    Ok(())
}

/// Drive a session from `input` until it completes, the player exits or input
/// ends. Returns the final score.
pub(crate) fn play_session<R>(
    catalog: Catalog,
    rng: &mut R,
    provider: &dyn MessageProvider,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<u64, CliError>
where
    R: Rng + ?Sized,
{
    let mut session = RewardSession::new(catalog, rng);
    let total = session.catalog().len();
    say(output, format_args!("Welcome! {total} targets to find.\n"))?;
    announce(&session, provider, output)?;

    let mut line = String::new();
    while !session.is_complete() {
        say(output, format_args!("> "))?;
        output.flush().map_err(CliError::WriteOutput)?;
        line.clear();
        if input.read_line(&mut line).map_err(CliError::ReadInput)? == 0 {
            break;
        }
        match PlayCommand::parse(&line) {
            Ok(PlayCommand::Exit) => break,
            Ok(PlayCommand::Reset) => {
                session.reset(rng);
                say(output, format_args!("Progress cleared. Score: 0\n"))?;
                announce(&session, provider, output)?;
            }
            Ok(PlayCommand::CheckIn {
                latitude,
                longitude,
            }) => match session.attempt_check_in(latitude, longitude) {
                Ok(outcome) => {
                    report(&outcome, session.score(), output)?;
                    if outcome.is_accepted() {
                        session.select_next_target(rng);
                        announce(&session, provider, output)?;
                    }
                }
                Err(err) => say(output, format_args!("{err}\n"))?,
            },
            Err(err) => say(output, format_args!("{err}\n"))?,
        }
    }

    let progress = session.progress();
    say(
        output,
        format_args!(
            "Final score: {} ({} of {} targets visited)\n",
            session.score(),
            progress.visited,
            progress.total
        ),
    )?;
    Ok(session.score())
}

fn announce(
    session: &RewardSession,
    provider: &dyn MessageProvider,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(target) = session.current() else {
        return say(output, format_args!("Congratulations, every target is visited!\n"));
    };
    let message = describe_or_fallback(provider, target);
    say(
        output,
        format_args!(
            "Target: {} ({} points)\n{message}\n",
            target.name(),
            target.points()
        ),
    )
}

fn report(outcome: &CheckInOutcome, score: u64, output: &mut dyn Write) -> Result<(), CliError> {
    match outcome {
        CheckInOutcome::Accepted {
            target,
            distance_meters,
            points_awarded,
        } => say(
            output,
            format_args!(
                "Checked in at {} ({distance_meters:.1} m away). +{points_awarded} points! Score: {score}\n",
                target.name()
            ),
        ),
        CheckInOutcome::Rejected {
            target,
            distance_meters,
        } => say(
            output,
            format_args!(
                "Not there yet: {distance_meters:.1} m from {}, get within {:.0} m.\n",
                target.name(),
                target.radius_meters()
            ),
        ),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlayConfig, CliError> {
    let merged = PlayArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(PlayConfig::from(merged))
}
