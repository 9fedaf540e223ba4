//! Ordering by the number embedded in each stop's order code.

use std::time::Instant;

use dropline_core::{
    Diagnostics, HaversineDistance, Route, SequenceError, SequenceRequest, SequenceResponse,
    Sequencer, Stop,
};
use log::debug;

use crate::SequencerConfig;

/// Sequencer ordering stops by the digits of their order code.
///
/// `PR07` sorts before `PR24`. Codes compare by their digits only, so
/// prefixes are ignored. Stops whose code has no digits follow every numbered
/// stop in input order; equal numbers also keep input order.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropline_core::{SequenceRequest, Sequencer, Stop, StopDetails};
/// use dropline_sequencer::CodeOrderSequencer;
///
/// let coded = |id: &str, code: &str| {
///     Stop::new(id, Coord { x: 0.0, y: 0.0 }, StopDetails::new(code, "", ""))
/// };
/// let request = SequenceRequest::new(vec![coded("1", "PR24"), coded("2", "PR07")]);
/// let response = CodeOrderSequencer::new().sequence(&request)?;
/// assert_eq!(response.route.stop_ids().collect::<Vec<_>>(), ["2", "1"]);
/// # Ok::<(), dropline_core::SequenceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeOrderSequencer {
    config: SequencerConfig,
}

impl CodeOrderSequencer {
    /// Construct a sequencer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a sequencer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: SequencerConfig) -> Self {
        Self { config }
    }
}

impl Sequencer for CodeOrderSequencer {
    fn sequence(&self, request: &SequenceRequest) -> Result<SequenceResponse, SequenceError> {
        let started_at = Instant::now();
        let start = request.validate(self.config.default_start)?;

        let mut ordered: Vec<&Stop> = request.stops.iter().collect();
        // `sort_by_key` is stable, so ties keep input order.
        ordered.sort_by_key(|stop| sort_key(&stop.details.code));
        let route = Route::new(ordered.into_iter().cloned().collect());
        let total_distance_km = route.total_distance_km(start, &HaversineDistance);
        debug!("ordered {} stops by code", route.len());

        Ok(SequenceResponse {
            route,
            start,
            total_distance_km,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                distance_evaluations: 0,
            },
        })
    }
}

/// Numbered codes first, ascending; codes without digits last.
fn sort_key(code: &str) -> (bool, u64) {
    code_number(code).map_or((true, 0), |number| (false, number))
}

/// Number formed by the ASCII digits of `code`, saturating at `u64::MAX`.
fn code_number(code: &str) -> Option<u64> {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}
