//! Points of interest and coordinate validation.

use geo::Coord;
use thiserror::Error;

/// Valid latitude range in decimal degrees.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in decimal degrees.
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A coordinate component was non-finite or out of range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude was not a finite value in `-90.0..=90.0`.
    #[error("latitude {0} must be a finite value between -90 and 90")]
    Latitude(f64),
    /// Longitude was not a finite value in `-180.0..=180.0`.
    #[error("longitude {0} must be a finite value between -180 and 180")]
    Longitude(f64),
}

/// Check a latitude/longitude pair and return it as a WGS84 coordinate.
///
/// The returned [`Coord`] uses `x = longitude` and `y = latitude`. Values are
/// never clamped: anything outside the valid ranges, including `NaN` and
/// infinities, is rejected.
///
/// # Errors
/// Returns [`CoordinateError::Latitude`] before
/// [`CoordinateError::Longitude`] when both components are invalid.
///
/// # Examples
/// ```
/// use trailmark_core::{CoordinateError, validate_coordinate};
///
/// let coord = validate_coordinate(10.0892, 77.0595).expect("valid coordinate");
/// assert_eq!(coord.y, 10.0892);
/// assert_eq!(
///     validate_coordinate(91.0, 0.0),
///     Err(CoordinateError::Latitude(91.0))
/// );
/// ```
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<Coord<f64>, CoordinateError> {
    validate_latitude(latitude)?;
    validate_longitude(longitude)?;
    Ok(Coord {
        x: longitude,
        y: latitude,
    })
}

pub(crate) fn validate_latitude(latitude: f64) -> Result<f64, CoordinateError> {
    if LATITUDE_RANGE.contains(&latitude) {
        Ok(latitude)
    } else {
        Err(CoordinateError::Latitude(latitude))
    }
}

pub(crate) fn validate_longitude(longitude: f64) -> Result<f64, CoordinateError> {
    if LONGITUDE_RANGE.contains(&longitude) {
        Ok(longitude)
    } else {
        Err(CoordinateError::Longitude(longitude))
    }
}

/// A named check-in target with an acceptance radius and a reward.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Fields are
/// private so a constructed value always satisfies the invariants checked by
/// [`PointOfInterest::new`].
///
/// # Examples
/// ```
/// use trailmark_core::PointOfInterest;
///
/// # fn main() -> Result<(), trailmark_core::PointOfInterestError> {
/// let poi = PointOfInterest::new(1, "Munnar Hills", 10.0892, 77.0595, 1000.0, 50)?;
/// assert_eq!(poi.name(), "Munnar Hills");
/// assert_eq!(poi.location().x, 77.0595);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    id: u64,
    name: String,
    location: Coord<f64>,
    radius_meters: f64,
    points: u32,
}

/// Errors returned by [`PointOfInterest::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointOfInterestError {
    /// The name was empty or whitespace.
    #[error("point of interest {id} must have a non-blank name")]
    BlankName {
        /// Identifier of the rejected target.
        id: u64,
    },
    /// Latitude or longitude was out of range.
    #[error("point of interest {id} has an invalid coordinate")]
    InvalidCoordinate {
        /// Identifier of the rejected target.
        id: u64,
        /// The offending coordinate component.
        #[source]
        source: CoordinateError,
    },
    /// The acceptance radius was not a finite, strictly positive value.
    #[error("point of interest {id} radius {radius} must be finite and positive")]
    InvalidRadius {
        /// Identifier of the rejected target.
        id: u64,
        /// Radius supplied by the caller, in metres.
        radius: f64,
    },
}

impl PointOfInterest {
    /// Validate and construct a target.
    ///
    /// Surrounding whitespace is trimmed from `name`.
    ///
    /// # Errors
    /// Returns [`PointOfInterestError`] when the name is blank, the coordinate
    /// is out of range or the radius is not finite and positive.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        points: u32,
    ) -> Result<Self, PointOfInterestError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(PointOfInterestError::BlankName { id });
        }
        let location = validate_coordinate(latitude, longitude)
            .map_err(|source| PointOfInterestError::InvalidCoordinate { id, source })?;
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(PointOfInterestError::InvalidRadius {
                id,
                radius: radius_meters,
            });
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            location,
            radius_meters,
            points,
        })
    }

    /// Unique identifier within a catalog.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Display label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Acceptance radius in metres. Always finite and positive.
    #[must_use]
    pub const fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Reward granted for a successful check-in.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }
}
