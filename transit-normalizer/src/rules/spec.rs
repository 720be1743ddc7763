//! Canonical stop sequences and per-route trip specifications.

use std::collections::HashMap;

use crate::domain::Direction;

/// How strongly a canonical entry constrains a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopMarker {
    /// Part of the route's real path; used to decide which direction a
    /// trip runs in.
    Hard,
    /// Only used to place the stop when ordering; never required.
    Soft,
}

/// One entry of a canonical stop sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalStop {
    pub stop_id: String,
    pub marker: StopMarker,
}

impl CanonicalStop {
    pub fn hard(stop_id: &str) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            marker: StopMarker::Hard,
        }
    }

    pub fn soft(stop_id: &str) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            marker: StopMarker::Soft,
        }
    }

    pub fn is_hard(&self) -> bool {
        self.marker == StopMarker::Hard
    }
}

/// The expected path of a route in one direction.
///
/// A stop id may appear more than once (loops). Stops the trip serves but
/// that are not listed are placed by the reconciler relative to their
/// listed neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalStopSequence {
    stops: Vec<CanonicalStop>,
    /// Stop id → canonical indices, ascending.
    index: HashMap<String, Vec<usize>>,
}

impl CanonicalStopSequence {
    pub fn new(stops: Vec<CanonicalStop>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, stop) in stops.iter().enumerate() {
            index.entry(stop.stop_id.clone()).or_default().push(i);
        }
        Self { stops, index }
    }

    /// All canonical indices of `stop_id`, ascending.
    pub fn positions(&self, stop_id: &str) -> &[usize] {
        self.index.get(stop_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical index for the `occurrence`-th (0-based) visit of a stop.
    ///
    /// Visits beyond the listed ones reuse the last listed index.
    pub fn position_of(&self, stop_id: &str, occurrence: usize) -> Option<usize> {
        let positions = self.positions(stop_id);
        positions
            .get(occurrence)
            .or_else(|| positions.last())
            .copied()
    }

    pub fn get(&self, position: usize) -> Option<&CanonicalStop> {
        self.stops.get(position)
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.index.contains_key(stop_id)
    }

    pub fn stops(&self) -> &[CanonicalStop] {
        &self.stops
    }

    pub fn hard_count(&self) -> usize {
        self.stops.iter().filter(|s| s.is_hard()).count()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// One direction of a route trip specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSpec {
    pub direction: Direction,
    /// Headsign label given to every trip in this direction.
    pub headsign: String,
    pub sequence: CanonicalStopSequence,
}

impl DirectionSpec {
    pub fn new(direction: Direction, headsign: &str, stops: Vec<CanonicalStop>) -> Self {
        Self {
            direction,
            headsign: headsign.to_string(),
            sequence: CanonicalStopSequence::new(stops),
        }
    }
}

/// Reference paths of a route in both of its directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTripSpec {
    pub first: DirectionSpec,
    pub second: DirectionSpec,
}

impl RouteTripSpec {
    pub fn new(first: DirectionSpec, second: DirectionSpec) -> Self {
        Self { first, second }
    }

    /// The spec for `direction`, if the route runs in it.
    pub fn for_direction(&self, direction: Direction) -> Option<&DirectionSpec> {
        [&self.first, &self.second]
            .into_iter()
            .find(|spec| spec.direction == direction)
    }

    /// Both direction specs, first then second.
    pub fn directions(&self) -> [&DirectionSpec; 2] {
        [&self.first, &self.second]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_sequence() -> CanonicalStopSequence {
        CanonicalStopSequence::new(vec![
            CanonicalStop::hard("hub"),
            CanonicalStop::soft("a"),
            CanonicalStop::hard("far"),
            CanonicalStop::soft("b"),
            CanonicalStop::hard("hub"),
        ])
    }

    #[test]
    fn positions_of_repeated_stop() {
        let seq = loop_sequence();
        assert_eq!(seq.positions("hub"), &[0, 4]);
        assert_eq!(seq.positions("far"), &[2]);
        assert!(seq.positions("nowhere").is_empty());
    }

    #[test]
    fn position_by_occurrence() {
        let seq = loop_sequence();
        assert_eq!(seq.position_of("hub", 0), Some(0));
        assert_eq!(seq.position_of("hub", 1), Some(4));
        // A third visit reuses the last listed position.
        assert_eq!(seq.position_of("hub", 2), Some(4));
        assert_eq!(seq.position_of("a", 3), Some(1));
        assert_eq!(seq.position_of("nowhere", 0), None);
    }

    #[test]
    fn markers() {
        let seq = loop_sequence();
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.hard_count(), 3);
        assert!(seq.get(1).is_some_and(|s| !s.is_hard()));
        assert!(seq.contains("b"));
    }

    #[test]
    fn direction_lookup() {
        let spec = RouteTripSpec::new(
            DirectionSpec::new(Direction::East, "Calgary", vec![CanonicalStop::hard("x")]),
            DirectionSpec::new(Direction::West, "Banff", vec![CanonicalStop::hard("y")]),
        );
        assert_eq!(
            spec.for_direction(Direction::West).map(|d| d.headsign.as_str()),
            Some("Banff")
        );
        assert!(spec.for_direction(Direction::North).is_none());
    }
}
