//! Ordered delivery routes.
//!
//! A [`Route`] is produced by a sequencer and may be adjusted afterwards by
//! manual reordering. No operation adds, drops, or duplicates stops.

use geo::Coord;
use thiserror::Error;
use url::Url;

use crate::{DistanceMetric, Stop};

/// Base of the map hand-off URL; stop addresses are appended as path segments.
pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir";

/// Errors returned by [`Route`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A position did not refer to a stop on the route.
    #[error("stop index {index} is out of bounds for a route of {len} stops")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Number of stops on the route.
        len: usize,
    },
    /// The directions base URL could not be parsed.
    #[error("invalid directions URL: {0}")]
    DirectionsUrl(#[from] url::ParseError),
    /// The directions base URL cannot carry path segments.
    #[error("directions URL cannot carry stop addresses")]
    OpaqueDirectionsUrl,
}

/// Stops in visiting order.
///
/// # Examples
/// ```
/// use dropline_core::{Route, Stop};
///
/// let route = Route::new(vec![Stop::at("a", 0.0, 1.0), Stop::at("b", 0.0, 2.0)]);
/// assert_eq!(route.stop_ids().collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Construct a route visiting `stops` in the given order.
    #[must_use]
    pub const fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Construct a route without stops.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Consume the route, returning its stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stop identifiers in visiting order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.stops.iter().map(|stop| stop.id.as_str())
    }

    /// Move the stop at `from` so that it ends up at position `to`.
    ///
    /// `to` is clamped to the last position, so dragging past the end of the
    /// list lands on the final slot. Returns the final position of the moved
    /// stop.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::IndexOutOfBounds`] when `from` is not a valid
    /// position.
    ///
    /// # Examples
    /// ```
    /// use dropline_core::{Route, Stop};
    ///
    /// let mut route = Route::new(vec![
    ///     Stop::at("a", 0.0, 1.0),
    ///     Stop::at("b", 0.0, 2.0),
    ///     Stop::at("c", 0.0, 3.0),
    /// ]);
    /// assert_eq!(route.move_stop(0, 10)?, 2);
    /// assert_eq!(route.stop_ids().collect::<Vec<_>>(), ["b", "c", "a"]);
    /// # Ok::<(), dropline_core::RouteError>(())
    /// ```
    pub fn move_stop(&mut self, from: usize, to: usize) -> Result<usize, RouteError> {
        let len = self.stops.len();
        if from >= len {
            return Err(RouteError::IndexOutOfBounds { index: from, len });
        }
        let target = to.min(len.saturating_sub(1));
        if target != from {
            let stop = self.stops.remove(from);
            self.stops.insert(target, stop);
            log::debug!("moved stop from position {from} to {target}");
        }
        Ok(target)
    }

    /// Cumulative leg distance from `start` through every stop, in
    /// kilometres. An empty route has zero length.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "leg distances are accumulated as floats"
    )]
    pub fn total_distance_km<D>(&self, start: Coord<f64>, metric: &D) -> f64
    where
        D: DistanceMetric + ?Sized,
    {
        self.stops
            .iter()
            .fold((start, 0.0), |(from, total), stop| {
                (stop.location, total + metric.distance_km(from, stop.location))
            })
            .1
    }

    /// Map directions URL visiting each stop's address in order.
    ///
    /// Addresses are percent-encoded as path segments; stops without an
    /// address are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DirectionsUrl`] or
    /// [`RouteError::OpaqueDirectionsUrl`] if [`DIRECTIONS_BASE_URL`] cannot
    /// be extended.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use dropline_core::{Route, Stop, StopDetails};
    ///
    /// let stop = Stop::new(
    ///     "5",
    ///     Coord { x: -70.57, y: -33.61 },
    ///     StopDetails::new("PR23", "CRISTOPHER", "TOCOPMAL 60, PUENTE ALTO"),
    /// );
    /// let url = Route::new(vec![stop]).directions_url()?;
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://www.google.com/maps/dir/TOCOPMAL%2060,%20PUENTE%20ALTO"
    /// );
    /// # Ok::<(), dropline_core::RouteError>(())
    /// ```
    pub fn directions_url(&self) -> Result<Url, RouteError> {
        let mut url = Url::parse(DIRECTIONS_BASE_URL)?;
        url.path_segments_mut()
            .map_err(|()| RouteError::OpaqueDirectionsUrl)?
            .pop_if_empty()
            .extend(
                self.stops
                    .iter()
                    .map(|stop| stop.details.address.as_str())
                    .filter(|address| !address.is_empty()),
            );
        Ok(url)
    }
}

impl From<Vec<Stop>> for Route {
    fn from(stops: Vec<Stop>) -> Self {
        Self::new(stops)
    }
}
