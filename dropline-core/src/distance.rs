//! Great-circle distances between stops.
//!
//! The [`DistanceMetric`] trait abstracts how far apart two coordinates are.
//! [`HaversineDistance`] is the default metric used by every sequencer.

use geo::Coord;

/// Fixed Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Measure the distance between two WGS84 coordinates in kilometres.
///
/// Implementations must be non-negative and symmetric, and must return zero
/// when both coordinates are identical.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use dropline_core::{DistanceMetric, HaversineDistance};
///
/// let a = Coord { x: 0.0, y: 0.0 };
/// let b = Coord { x: 1.0, y: 0.0 };
/// let d = HaversineDistance.distance_km(a, b);
/// assert!((d - 111.195).abs() < 0.001);
/// ```
pub trait DistanceMetric {
    /// Return the distance from `from` to `to` in kilometres.
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64;
}

impl<D: DistanceMetric + ?Sized> DistanceMetric for &D {
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        (**self).distance_km(from, to)
    }
}

/// Haversine great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HaversineDistance;

impl DistanceMetric for HaversineDistance {
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        haversine_km(from, to)
    }
}

/// Haversine distance between `from` and `to` in kilometres.
///
/// The square root of the haversine term is taken with `hypot` so nearby
/// points do not underflow to zero, and it is clamped to `[0, 1]` so rounding
/// near antipodal points cannot produce `NaN`. Distinct points always yield a
/// positive distance, at least [`f64::MIN_POSITIVE`].
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use dropline_core::haversine_km;
///
/// let here = Coord { x: -70.5758, y: -33.6117 };
/// assert_eq!(haversine_km(here, here), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    if from == to {
        return 0.0;
    }
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let half_dlat = (to.y - from.y).to_radians() / 2.0;
    let half_dlng = (to.x - from.x).to_radians() / 2.0;

    let lat_weight = (lat_from.cos() * lat_to.cos()).max(0.0).sqrt();
    let root_a = half_dlat.sin().hypot(lat_weight * half_dlng.sin());
    let distance = 2.0 * EARTH_RADIUS_KM * root_a.clamp(0.0, 1.0).asin();
    // Sub-normal degree differences vanish when converted to radians.
    if distance > 0.0 {
        distance
    } else {
        f64::MIN_POSITIVE
    }
}
