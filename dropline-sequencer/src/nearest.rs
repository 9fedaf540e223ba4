//! Greedy nearest-neighbour sequencing.

use std::time::Instant;

use dropline_core::{
    Diagnostics, DistanceMetric, HaversineDistance, Route, SequenceError, SequenceRequest,
    SequenceResponse, Sequencer, Stop, validate_stops,
};
use geo::Coord;
use log::debug;

use crate::SequencerConfig;

/// Order `stops` by greedy nearest-neighbour from `start` using haversine
/// distance.
///
/// The output is a permutation of `stops`. On equal distances the stop that
/// appears first in `stops` is visited first.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidInput`] when `stops` is empty or any
/// coordinate, `start` included, is outside WGS84 bounds.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropline_core::Stop;
/// use dropline_sequencer::sequence;
///
/// let stops = [
///     Stop::at("A", 0.0, 1.0),
///     Stop::at("B", 0.0, 5.0),
///     Stop::at("C", 0.0, 2.0),
/// ];
/// let ordered = sequence(&stops, Coord { x: 0.0, y: 0.0 })?;
/// let ids: Vec<_> = ordered.iter().map(|s| s.id.as_str()).collect();
/// assert_eq!(ids, ["A", "C", "B"]);
/// # Ok::<(), dropline_core::SequenceError>(())
/// ```
pub fn sequence(stops: &[Stop], start: Coord<f64>) -> Result<Vec<Stop>, SequenceError> {
    validate_stops(stops, start)?;
    let (ordered, _) = nearest_neighbour_order(stops, start, &HaversineDistance);
    Ok(ordered)
}

/// Sequencer visiting the closest remaining stop at every step.
///
/// Generic over the [`DistanceMetric`]; [`HaversineDistance`] is the default.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropline_core::{SequenceRequest, Sequencer, Stop};
/// use dropline_sequencer::NearestNeighbourSequencer;
///
/// let request = SequenceRequest::new(vec![
///     Stop::at("far", 0.0, 3.0),
///     Stop::at("near", 0.0, 1.0),
/// ])
/// .with_start(Coord { x: 0.0, y: 0.0 });
/// let response = NearestNeighbourSequencer::new().sequence(&request)?;
/// assert_eq!(response.route.stop_ids().collect::<Vec<_>>(), ["near", "far"]);
/// # Ok::<(), dropline_core::SequenceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NearestNeighbourSequencer<D = HaversineDistance> {
    metric: D,
    config: SequencerConfig,
}

impl NearestNeighbourSequencer {
    /// Construct a haversine sequencer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    /// Construct a haversine sequencer with explicit configuration.
    #[must_use]
    pub const fn with_config(config: SequencerConfig) -> Self {
        Self::with_metric(HaversineDistance, config)
    }
}

impl Default for NearestNeighbourSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DistanceMetric> NearestNeighbourSequencer<D> {
    /// Construct a sequencer using a custom distance metric.
    #[must_use]
    pub const fn with_metric(metric: D, config: SequencerConfig) -> Self {
        Self { metric, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }
}

impl<D> Sequencer for NearestNeighbourSequencer<D>
where
    D: DistanceMetric + Send + Sync,
{
    fn sequence(&self, request: &SequenceRequest) -> Result<SequenceResponse, SequenceError> {
        let started_at = Instant::now();
        let start = request.validate(self.config.default_start)?;

        let (ordered, distance_evaluations) =
            nearest_neighbour_order(&request.stops, start, &self.metric);
        let route = Route::new(ordered);
        let total_distance_km = route.total_distance_km(start, &self.metric);
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            distance_evaluations,
        };
        debug!(
            "sequenced {} stops over {total_distance_km:.3} km with {distance_evaluations} distance evaluations",
            route.len()
        );

        Ok(SequenceResponse {
            route,
            start,
            total_distance_km,
            diagnostics,
        })
    }
}

/// Greedy traversal; returns the ordered stops and the number of distance
/// evaluations performed.
fn nearest_neighbour_order<D>(stops: &[Stop], start: Coord<f64>, metric: &D) -> (Vec<Stop>, u64)
where
    D: DistanceMetric + ?Sized,
{
    // `remaining` keeps input order so the first minimum found is the
    // earliest stop in the input.
    let mut remaining: Vec<&Stop> = stops.iter().collect();
    let mut ordered = Vec::with_capacity(stops.len());
    let mut evaluations = 0_u64;
    let mut current = start;

    while let Some(index) = nearest_index(&remaining, current, metric, &mut evaluations) {
        let next = remaining.remove(index);
        current = next.location;
        ordered.push(next.clone());
    }
    (ordered, evaluations)
}

fn nearest_index<D>(
    remaining: &[&Stop],
    from: Coord<f64>,
    metric: &D,
    evaluations: &mut u64,
) -> Option<usize>
where
    D: DistanceMetric + ?Sized,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, stop) in remaining.iter().enumerate() {
        let distance = metric.distance_km(from, stop.location);
        *evaluations = evaluations.saturating_add(1);
        best = match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        };
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_START;
    use dropline_core::test_support::{PlanarDistance, is_permutation, stop};
    use dropline_core::{CoordinateSource, InputError};
    use rstest::{fixture, rstest};

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    fn ids(stops: &[Stop]) -> Vec<&str> {
        stops.iter().map(|s| s.id.as_str()).collect()
    }

    #[fixture]
    fn line_stops() -> Vec<Stop> {
        vec![stop("A", 0.0, 1.0), stop("B", 0.0, 5.0), stop("C", 0.0, 2.0)]
    }

    #[rstest]
    fn visits_stops_in_increasing_distance_along_a_line(line_stops: Vec<Stop>) {
        let ordered = sequence(&line_stops, ORIGIN).expect("valid input");
        assert_eq!(ids(&ordered), ["A", "C", "B"]);
    }

    #[rstest]
    #[case::a_first(vec![stop("A", 1.0, 0.0), stop("B", -1.0, 0.0)], ["A", "B"])]
    #[case::b_first(vec![stop("B", -1.0, 0.0), stop("A", 1.0, 0.0)], ["B", "A"])]
    fn ties_go_to_the_earliest_input_stop(#[case] stops: Vec<Stop>, #[case] expected: [&str; 2]) {
        let ordered = sequence(&stops, ORIGIN).expect("valid input");
        assert_eq!(ids(&ordered), expected);
    }

    #[rstest]
    #[case(ORIGIN)]
    #[case(Coord { x: 179.0, y: -89.0 })]
    fn single_stop_is_returned_unchanged(#[case] start: Coord<f64>) {
        let only = stop("only", 45.0, 45.0);
        let ordered = sequence(std::slice::from_ref(&only), start).expect("valid input");
        assert_eq!(ordered, vec![only]);
    }

    #[rstest]
    fn empty_input_is_rejected() {
        assert_eq!(
            sequence(&[], ORIGIN),
            Err(SequenceError::InvalidInput(InputError::EmptyStops))
        );
    }

    #[rstest]
    fn out_of_range_start_is_rejected(line_stops: Vec<Stop>) {
        let err = sequence(&line_stops, Coord { x: 0.0, y: -91.0 }).expect_err("bad start");
        assert!(matches!(
            err,
            SequenceError::InvalidInput(InputError::LatitudeOutOfRange {
                at: CoordinateSource::Start,
                ..
            })
        ));
    }

    #[rstest]
    fn output_is_a_permutation_even_with_duplicate_locations() {
        let stops = vec![
            stop("a", 1.0, 1.0),
            stop("b", 1.0, 1.0),
            stop("c", 0.0, 0.0),
            stop("d", 1.0, 1.0),
        ];
        let ordered = sequence(&stops, ORIGIN).expect("valid input");
        assert!(is_permutation(&stops, &ordered));
        assert_eq!(ids(&ordered), ["c", "a", "b", "d"]);
    }

    #[rstest]
    fn counts_triangular_number_of_evaluations(line_stops: Vec<Stop>) {
        let (_, evaluations) = nearest_neighbour_order(&line_stops, ORIGIN, &HaversineDistance);
        assert_eq!(evaluations, 6);
    }

    #[rstest]
    #[case::default(NearestNeighbourSequencer::new(), DEFAULT_START)]
    #[case::configured(
        NearestNeighbourSequencer::with_config(SequencerConfig::with_default_start(
            Coord { x: 10.0, y: 0.0 }
        )),
        Coord { x: 10.0, y: 0.0 }
    )]
    fn exposes_its_configuration(
        #[case] sequencer: NearestNeighbourSequencer,
        #[case] expected: Coord<f64>,
    ) {
        assert_eq!(sequencer.config().default_start, expected);
    }

    #[rstest]
    fn uses_the_configured_default_start_when_request_has_none() {
        let config = SequencerConfig::with_default_start(Coord { x: 10.0, y: 0.0 });
        let sequencer = NearestNeighbourSequencer::with_config(config);
        let request = SequenceRequest::new(vec![stop("west", 0.0, 1.0), stop("east", 0.0, 9.0)]);
        let response = sequencer.sequence(&request).expect("valid request");
        assert_eq!(response.start, Coord { x: 10.0, y: 0.0 });
        assert_eq!(response.route.stop_ids().collect::<Vec<_>>(), ["east", "west"]);
    }

    #[rstest]
    fn reports_route_length_with_the_active_metric() {
        let sequencer =
            NearestNeighbourSequencer::with_metric(PlanarDistance, SequencerConfig::default());
        let request = SequenceRequest::new(vec![stop("b", 4.0, 3.0), stop("a", 0.0, 3.0)])
            .with_start(ORIGIN);
        let response = sequencer.sequence(&request).expect("valid request");
        assert_eq!(response.route.stop_ids().collect::<Vec<_>>(), ["a", "b"]);
        assert!((response.total_distance_km - 7.0).abs() < 1e-9);
        assert_eq!(response.diagnostics.distance_evaluations, 3);
    }
}
