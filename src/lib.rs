//! Facade crate for the dropline delivery sequencer.
//!
//! This crate re-exports the core domain types and exposes the bundled
//! sequencers behind the `sequencer` feature.
//!
//! ```rust
//! # #[cfg(feature = "sequencer")]
//! # {
//! use dropline::{SequenceRequest, Sequencer, Stop, NearestNeighbourSequencer};
//! use geo::Coord;
//!
//! let request = SequenceRequest::new(vec![Stop::at("A", 0.0, 1.0), Stop::at("B", 0.0, 0.5)])
//!     .with_start(Coord { x: 0.0, y: 0.0 });
//! let response = NearestNeighbourSequencer::new().sequence(&request)?;
//! assert_eq!(response.route.stop_ids().collect::<Vec<_>>(), ["B", "A"]);
//! # }
//! # Ok::<(), dropline::SequenceError>(())
//! ```

#![forbid(unsafe_code)]

pub use dropline_core::{
    CoordinateSource, Diagnostics, DistanceMetric, HaversineDistance, InputError, LatLng, Route,
    RouteError, SequenceError, SequenceRequest, SequenceResponse, Sequencer, Stop, StopDetails,
    haversine_km,
};

#[cfg(feature = "sequencer")]
pub use dropline_sequencer::{
    CodeOrderSequencer, DEFAULT_START, NearestNeighbourSequencer, SequencerConfig, sequence,
};
