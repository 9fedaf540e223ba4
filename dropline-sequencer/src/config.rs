//! Configuration shared by the sequencers.

use geo::Coord;

/// Start point used when neither the request nor the caller supplies one:
/// Puente Alto, Santiago (latitude -33.6117, longitude -70.5758).
pub const DEFAULT_START: Coord<f64> = Coord {
    x: -70.5758,
    y: -33.6117,
};

/// Configuration for the sequencers in this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Origin used when a request carries no start point.
    pub default_start: Coord<f64>,
}

impl SequencerConfig {
    /// Configuration with a custom default start point.
    #[must_use]
    pub const fn with_default_start(default_start: Coord<f64>) -> Self {
        Self { default_start }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::with_default_start(DEFAULT_START)
    }
}
