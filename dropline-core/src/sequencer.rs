//! Sequencing requests and responses, and the [`Sequencer`] strategy trait.

use std::collections::HashSet;
use std::time::Duration;

use geo::Coord;
use log::warn;
use thiserror::Error;

use crate::{InputError, Route, Stop, validate_stops};

#[cfg(feature = "serde")]
use crate::LatLng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for a sequencing request.
///
/// `start` is optional; sequencers fall back to their configured default
/// start point when it is absent.
///
/// In JSON the start point uses `lat`/`lng`:
/// `{"start": {"lat": -33.61, "lng": -70.57}, "stops": [...]}`.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropline_core::{SequenceRequest, Stop};
///
/// let request = SequenceRequest::new(vec![Stop::at("a", 0.0, 1.0)])
///     .with_start(Coord { x: 0.0, y: 0.0 });
/// assert_eq!(request.stops.len(), 1);
/// assert!(request.start.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "SequenceRequestRecord", into = "SequenceRequestRecord")
)]
pub struct SequenceRequest {
    /// Driver origin; `None` means "use the configured default".
    pub start: Option<Coord<f64>>,
    /// Stops to order.
    pub stops: Vec<Stop>,
}

impl SequenceRequest {
    /// Construct a request without an explicit start point.
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self { start: None, stops }
    }

    /// Set the start point.
    #[must_use]
    pub const fn with_start(mut self, start: Coord<f64>) -> Self {
        self.start = Some(start);
        self
    }

    /// Validate the request and resolve its start point.
    ///
    /// Returns the request's own start, or `default_start` when none was
    /// given. Duplicate stop identifiers are logged but not rejected.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when there are no stops or any coordinate is
    /// out of range.
    ///
    /// # Examples
    /// ```rust
    /// use geo::Coord;
    /// use dropline_core::{SequenceRequest, Stop};
    ///
    /// let fallback = Coord { x: -70.5758, y: -33.6117 };
    /// let request = SequenceRequest::new(vec![Stop::at("a", -33.6, -70.5)]);
    /// assert_eq!(request.validate(fallback), Ok(fallback));
    /// ```
    pub fn validate(&self, default_start: Coord<f64>) -> Result<Coord<f64>, InputError> {
        let start = self.start.unwrap_or(default_start);
        validate_stops(&self.stops, start)?;
        self.warn_on_duplicate_ids();
        Ok(start)
    }

    fn warn_on_duplicate_ids(&self) {
        let mut seen = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if !seen.insert(stop.id.as_str()) {
                warn!("duplicate stop id {:?} in sequencing request", stop.id);
            }
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct SequenceRequestRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<LatLng>,
    stops: Vec<Stop>,
}

#[cfg(feature = "serde")]
impl From<SequenceRequestRecord> for SequenceRequest {
    fn from(record: SequenceRequestRecord) -> Self {
        Self {
            start: record.start.map(Coord::from),
            stops: record.stops,
        }
    }
}

#[cfg(feature = "serde")]
impl From<SequenceRequest> for SequenceRequestRecord {
    fn from(request: SequenceRequest) -> Self {
        Self {
            start: request.start.map(LatLng::from),
            stops: request.stops,
        }
    }
}

/// Statistics gathered while sequencing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent ordering stops.
    pub solve_time: Duration,
    /// Number of distance computations performed while ordering.
    pub distance_evaluations: u64,
}

/// Response from a successful sequencing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceResponse {
    /// The ordered route.
    pub route: Route,
    /// The start point the route was ordered from.
    pub start: Coord<f64>,
    /// Cumulative distance from the start through every stop, in kilometres.
    pub total_distance_km: f64,
    /// Run statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Sequencer::sequence`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// The stop set was empty or a coordinate was out of range.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Order a set of stops into a route.
///
/// Implementations must return a permutation of the request's stops and must
/// reject invalid input with [`SequenceError::InvalidInput`] rather than
/// panicking. Sequencers must be `Send + Sync` so callers can move the work
/// off an interactive thread.
pub trait Sequencer: Send + Sync {
    /// Sequence a request, producing an ordered route or an error.
    fn sequence(&self, request: &SequenceRequest) -> Result<SequenceResponse, SequenceError>;
}
