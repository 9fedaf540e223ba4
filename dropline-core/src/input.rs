//! Validation of sequencing input.
//!
//! Every sequencer rejects the same inputs before doing any work: an empty
//! stop set, or any coordinate outside the WGS84 latitude/longitude bounds.
//! Non-finite values are outside every range and are rejected too.

use std::fmt;
use std::ops::RangeInclusive;

use geo::Coord;
use thiserror::Error;

use crate::Stop;

/// Valid latitudes in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Where a rejected coordinate came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateSource {
    /// The driver's start point.
    Start,
    /// The stop with this identifier.
    Stop(String),
}

impl fmt::Display for CoordinateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start point"),
            Self::Stop(id) => write!(f, "stop {id:?}"),
        }
    }
}

/// Reasons a sequencing input is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// No stops were supplied.
    #[error("at least one stop is required")]
    EmptyStops,
    /// A latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {value} of {at} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Owner of the offending coordinate.
        at: CoordinateSource,
        /// Offending latitude.
        value: f64,
    },
    /// A longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {value} of {at} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Owner of the offending coordinate.
        at: CoordinateSource,
        /// Offending longitude.
        value: f64,
    },
}

/// Check that `stops` is non-empty and every coordinate, including `start`,
/// lies within WGS84 bounds.
///
/// The start point is checked first, then stops in input order; the first
/// offending coordinate is reported.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropline_core::{InputError, Stop, validate_stops};
///
/// let start = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(validate_stops(&[], start), Err(InputError::EmptyStops));
/// assert!(validate_stops(&[Stop::at("a", 10.0, 10.0)], start).is_ok());
/// assert!(validate_stops(&[Stop::at("b", 91.0, 10.0)], start).is_err());
/// ```
pub fn validate_stops(stops: &[Stop], start: Coord<f64>) -> Result<(), InputError> {
    if stops.is_empty() {
        return Err(InputError::EmptyStops);
    }
    check_coordinate(start, || CoordinateSource::Start)?;
    for stop in stops {
        check_coordinate(stop.location, || CoordinateSource::Stop(stop.id.clone()))?;
    }
    Ok(())
}

fn check_coordinate(
    location: Coord<f64>,
    source: impl Fn() -> CoordinateSource,
) -> Result<(), InputError> {
    if !LATITUDE_RANGE.contains(&location.y) {
        return Err(InputError::LatitudeOutOfRange {
            at: source(),
            value: location.y,
        });
    }
    if !LONGITUDE_RANGE.contains(&location.x) {
        return Err(InputError::LongitudeOutOfRange {
            at: source(),
            value: location.x,
        });
    }
    Ok(())
}
