//! Delivery stops and their display attributes.

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single delivery destination.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// [`StopDetails`] are carried through sequencing unchanged.
///
/// In JSON a stop is a flat record using `lat` and `lng`:
///
/// ```json
/// {"id": "4", "lat": -33.61, "lng": -70.57, "code": "PR25",
///  "client": "HERNAN DAVID SOTO SARAVIA", "address": "PASAJE JORGE ORREGO SALAS 742"}
/// ```
///
/// # Examples
/// ```
/// use dropline_core::Stop;
///
/// let stop = Stop::at("1", -33.6117, -70.5758);
/// assert_eq!(stop.latitude(), -33.6117);
/// assert_eq!(stop.longitude(), -70.5758);
/// assert!(stop.details.code.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "StopRecord", into = "StopRecord")
)]
pub struct Stop {
    /// Identifier, unique within a route.
    pub id: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Opaque display attributes.
    pub details: StopDetails,
}

impl Stop {
    /// Construct a stop with the provided display attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, location: Coord<f64>, details: StopDetails) -> Self {
        Self {
            id: id.into(),
            location,
            details,
        }
    }

    /// Construct a stop without display attributes.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use dropline_core::Stop;
    ///
    /// let stop = Stop::without_details("p4", Coord { x: 1.0, y: 2.0 });
    /// assert_eq!(stop.id, "p4");
    /// ```
    #[must_use]
    pub fn without_details(id: impl Into<String>, location: Coord<f64>) -> Self {
        Self::new(id, location, StopDetails::default())
    }

    /// Construct a stop from latitude and longitude in degrees.
    #[must_use]
    pub fn at(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::without_details(
            id,
            Coord {
                x: longitude,
                y: latitude,
            },
        )
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

/// Display attributes of a delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopDetails {
    /// Order code printed on the parcel, e.g. `PR24`.
    pub code: String,
    /// Recipient name.
    pub client: String,
    /// Street address used for map hand-off.
    pub address: String,
    /// Delivery window as shown to the driver, e.g. `08:00 - 21:00`.
    pub time_window: Option<String>,
}

impl StopDetails {
    /// Construct details without a delivery window.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        client: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            client: client.into(),
            address: address.into(),
            time_window: None,
        }
    }

    /// Attach a delivery window.
    #[must_use]
    pub fn with_time_window(mut self, window: impl Into<String>) -> Self {
        self.time_window = Some(window.into());
        self
    }
}

/// Latitude/longitude pair as exchanged with the mobile client.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropline_core::LatLng;
///
/// let coord: Coord<f64> = LatLng { lat: -33.6, lng: -70.5 }.into();
/// assert_eq!(coord, Coord { x: -70.5, y: -33.6 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct StopRecord {
    id: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    code: String,
    #[serde(default)]
    client: String,
    #[serde(default)]
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_window: Option<String>,
}

#[cfg(feature = "serde")]
impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        Self {
            id: record.id,
            location: Coord {
                x: record.lng,
                y: record.lat,
            },
            details: StopDetails {
                code: record.code,
                client: record.client,
                address: record.address,
                time_window: record.time_window,
            },
        }
    }
}

#[cfg(feature = "serde")]
impl From<Stop> for StopRecord {
    fn from(stop: Stop) -> Self {
        Self {
            id: stop.id,
            lat: stop.location.y,
            lng: stop.location.x,
            code: stop.details.code,
            client: stop.details.client,
            address: stop.details.address,
            time_window: stop.details.time_window,
        }
    }
}
