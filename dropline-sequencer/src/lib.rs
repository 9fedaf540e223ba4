//! Route sequencers for Dropline.
//!
//! This crate provides [`NearestNeighbourSequencer`], the default
//! implementation of the [`Sequencer`](dropline_core::Sequencer) trait. It
//! orders stops greedily: starting from the driver's origin it repeatedly
//! visits the closest remaining stop by haversine distance. Ties go to the
//! stop that appears first in the input, so identical input always yields an
//! identical route.
//!
//! [`CodeOrderSequencer`] orders stops by the number embedded in their order
//! code instead.
//!
//! Both sequencers are synchronous and pure. The greedy search performs
//! `n(n+1)/2` distance evaluations for `n` stops.

#![forbid(unsafe_code)]

mod code_order;
mod config;
mod nearest;

pub use code_order::CodeOrderSequencer;
pub use config::{DEFAULT_START, SequencerConfig};
pub use nearest::{NearestNeighbourSequencer, sequence};
