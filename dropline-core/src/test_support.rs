//! Test-only helpers shared by unit, behaviour, and property tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use std::collections::HashMap;

use geo::Coord;

use crate::{DistanceMetric, Stop, StopDetails};

/// Construct a stop at `(lat, lng)` without display attributes.
#[must_use]
pub fn stop(id: &str, lat: f64, lng: f64) -> Stop {
    Stop::at(id, lat, lng)
}

/// Construct a stop carrying an order code.
#[must_use]
pub fn coded_stop(id: &str, code: &str, lat: f64, lng: f64) -> Stop {
    Stop::new(
        id,
        Coord { x: lng, y: lat },
        StopDetails::new(code, String::new(), String::new()),
    )
}

/// Flat-plane metric treating degrees as kilometres.
///
/// Useful when a test needs exact, hand-checkable distances.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanarDistance;

impl DistanceMetric for PlanarDistance {
    #[expect(clippy::float_arithmetic, reason = "Euclidean distance")]
    fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        (to.x - from.x).hypot(to.y - from.y)
    }
}

/// Whether `output` holds exactly the stops of `input`, in any order.
///
/// Stops are compared by identifier and location so duplicate identifiers
/// are counted rather than collapsed.
#[must_use]
pub fn is_permutation(input: &[Stop], output: &[Stop]) -> bool {
    if input.len() != output.len() {
        return false;
    }
    let mut counts: HashMap<(&str, u64, u64), i64> = HashMap::new();
    for stop in input {
        *counts.entry(key(stop)).or_default() += 1;
    }
    for stop in output {
        *counts.entry(key(stop)).or_default() -= 1;
    }
    counts.values().all(|count| *count == 0)
}

fn key(stop: &Stop) -> (&str, u64, u64) {
    (
        stop.id.as_str(),
        stop.location.x.to_bits(),
        stop.location.y.to_bits(),
    )
}
