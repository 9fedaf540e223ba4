//! Core domain types for the Dropline delivery engine.
//!
//! The crate defines delivery [`Stop`]s, ordered [`Route`]s, the coordinate
//! validation shared by every sequencer, the [`DistanceMetric`] contract, and
//! the [`Sequencer`] trait that concrete ordering strategies implement.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]

mod distance;
mod input;
mod route;
mod sequencer;
mod stop;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{DistanceMetric, EARTH_RADIUS_KM, HaversineDistance, haversine_km};
pub use input::{CoordinateSource, InputError, LATITUDE_RANGE, LONGITUDE_RANGE, validate_stops};
pub use route::{DIRECTIONS_BASE_URL, Route, RouteError};
pub use sequencer::{Diagnostics, SequenceError, SequenceRequest, SequenceResponse, Sequencer};
pub use stop::{LatLng, Stop, StopDetails};
