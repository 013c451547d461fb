//! Great-circle distance and radius checks.
//!
//! Distances are measured on a sphere of radius [`EARTH_RADIUS_METERS`] using
//! the haversine formula:
//!
//! ```text
//! a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
//! d = 2R · atan2(√a, √(1−a))
//! ```
//!
//! Every function accepts any finite input; range checks belong to callers
//! (see [`validate_coordinate`](crate::validate_coordinate)).

use geo::Coord;

/// Mean Earth radius used for every distance in the engine, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in metres between two WGS84 coordinates.
///
/// Coordinates use `x = longitude`, `y = latitude`. The result is symmetric in
/// its arguments and zero for identical points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailmark_core::distance_meters;
///
/// let munnar = Coord { x: 77.0595, y: 10.0892 };
/// assert_eq!(distance_meters(munnar, munnar), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn distance_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let phi_a = a.y.to_radians();
    let phi_b = b.y.to_radians();
    let delta_phi = (b.y - a.y).to_radians();
    let delta_lambda = (b.x - a.x).to_radians();

    let half_chord = (delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_METERS * angle
}

/// Great-circle distance in metres between two latitude/longitude pairs.
///
/// Equivalent to [`distance_meters`] for callers holding raw degrees.
///
/// # Examples
/// ```
/// use trailmark_core::distance_between;
///
/// let there = distance_between(10.0892, 77.0595, 9.9669, 76.2406);
/// let back = distance_between(9.9669, 76.2406, 10.0892, 77.0595);
/// assert!((there - back).abs() < 1e-6);
/// ```
#[must_use]
pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_meters(Coord { x: lon1, y: lat1 }, Coord { x: lon2, y: lat2 })
}

/// Report whether `distance` falls inside `radius_meters`.
///
/// The boundary is inclusive: a candidate exactly on the radius is accepted.
///
/// # Examples
/// ```
/// use trailmark_core::is_within_radius;
///
/// assert!(is_within_radius(1000.0, 1000.0));
/// assert!(!is_within_radius(1000.1, 1000.0));
/// ```
#[must_use]
pub fn is_within_radius(distance: f64, radius_meters: f64) -> bool {
    distance <= radius_meters
}

/// Travel `distance` metres from `origin` along an initial `bearing_degrees`
/// (clockwise from north) and return the destination.
///
/// Uses the same sphere as [`distance_meters`], so measuring back from
/// `origin` yields `distance` up to rounding. Longitude is normalised to
/// `-180.0..=180.0`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use trailmark_core::proximity::{destination_point, distance_meters};
///
/// let origin = Coord { x: 77.0595, y: 10.0892 };
/// let east = destination_point(origin, 90.0, 250.0);
/// assert!((distance_meters(origin, east) - 250.0).abs() < 1e-6);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "spherical destination formula is floating-point trigonometry"
)]
pub fn destination_point(origin: Coord<f64>, bearing_degrees: f64, distance: f64) -> Coord<f64> {
    let angular = distance / EARTH_RADIUS_METERS;
    let bearing = bearing_degrees.to_radians();
    let phi_origin = origin.y.to_radians();
    let lambda_origin = origin.x.to_radians();

    let sin_phi =
        phi_origin.sin() * angular.cos() + phi_origin.cos() * angular.sin() * bearing.cos();
    let phi = sin_phi.clamp(-1.0, 1.0).asin();
    let lambda = lambda_origin
        + (bearing.sin() * angular.sin() * phi_origin.cos())
            .atan2(angular.cos() - phi_origin.sin() * sin_phi);

    Coord {
        x: normalise_longitude(lambda.to_degrees()),
        y: phi.to_degrees(),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "wrapping longitude uses modular float arithmetic"
)]
fn normalise_longitude(longitude: f64) -> f64 {
    (longitude + 540.0).rem_euclid(360.0) - 180.0
}
