//! Distance command for the Trailmark CLI.

use std::io::Write;

use clap::Args;
use trailmark_core::{distance_meters, is_within_radius, validate_coordinate};

use crate::{CliError, say};

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub(crate) struct DistanceArgs {
    /// Latitude of the first position.
    pub(crate) lat1: f64,
    /// Longitude of the first position.
    pub(crate) lon1: f64,
    /// Latitude of the second position.
    pub(crate) lat2: f64,
    /// Longitude of the second position.
    pub(crate) lon2: f64,
    /// Also report whether the positions are within this many metres.
    #[arg(long, value_name = "metres")]
    pub(crate) radius: Option<f64>,
}

pub(crate) fn run_distance(args: &DistanceArgs, output: &mut dyn Write) -> Result<(), CliError> {
    let from = validate_coordinate(args.lat1, args.lon1)?;
    let to = validate_coordinate(args.lat2, args.lon2)?;
    if let Some(radius) = args.radius
        && !(radius.is_finite() && radius > 0.0)
    {
        return Err(CliError::InvalidRadius { radius });
    }

    let distance = distance_meters(from, to);
    say(output, format_args!("Distance: {distance:.1} m\n"))?;
    let Some(radius) = args.radius else {
        return Ok(());
    };
    let verdict = if is_within_radius(distance, radius) {
        "inside"
    } else {
        "outside"
    };
    say(output, format_args!("Check-in radius {radius} m: {verdict}\n"))
}
