//! Splitting undifferentiated trips into per-direction copies.

use std::ops::RangeInclusive;

use tracing::{error, trace};

use crate::domain::{Direction, NormalizeError, StableRouteId};
use crate::feed::{RawStopTime, RawTrip};
use crate::rules::{CanonicalStopSequence, RouteTripSpec};

use super::compare::{occurrences, sort_raw};

/// The part of a trip that runs in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPart {
    pub direction: Direction,
    /// Raw stops of the part, in raw order.
    pub stops: Vec<RawStopTime>,
}

/// Whether any raw stop is a hard stop of `sequence`.
pub fn visits_hard_stop(raw: &[RawStopTime], sequence: &CanonicalStopSequence) -> bool {
    raw.iter().any(|stop| {
        sequence
            .positions(&stop.stop_id)
            .iter()
            .any(|position| sequence.get(*position).is_some_and(|c| c.is_hard()))
    })
}

/// Raw index span of the longest run of hard stops visited in canonical
/// order. Needs at least two hard stops; the earliest run wins a tie.
pub fn hard_run(raw: &[RawStopTime], sequence: &CanonicalStopSequence) -> Option<RangeInclusive<usize>> {
    let hits = raw
        .iter()
        .zip(occurrences(raw))
        .enumerate()
        .filter_map(|(raw_index, (stop, occurrence))| {
            let position = sequence.position_of(&stop.stop_id, occurrence)?;
            sequence
                .get(position)
                .filter(|canonical| canonical.is_hard())
                .map(|_| (raw_index, position))
        });

    // (hard stop count, first raw index, last raw index)
    let mut best: Option<(usize, usize, usize)> = None;
    let mut current: Option<(usize, usize, usize)> = None;
    let mut last_position = 0;

    for (raw_index, position) in hits {
        let run = match current {
            Some((count, start, _)) if position > last_position => (count + 1, start, raw_index),
            _ => (1, raw_index, raw_index),
        };
        current = Some(run);
        last_position = position;

        if best.is_none_or(|(count, _, _)| run.0 > count) {
            best = Some(run);
        }
    }

    best.filter(|(count, _, _)| *count >= 2)
        .map(|(_, start, end)| start..=end)
}

/// Split a trip that was not classified into one copy per direction whose
/// canonical path it covers.
///
/// Each copy keeps the raw span from the first to the last hard stop of
/// its run, unlisted stops included.
pub fn split_trip(
    route_id: StableRouteId,
    trip: &RawTrip,
    spec: &RouteTripSpec,
) -> Result<Vec<SplitPart>, NormalizeError> {
    let raw = sort_raw(&trip.stops);

    let parts: Vec<SplitPart> = spec
        .directions()
        .into_iter()
        .filter_map(|direction| {
            let span = hard_run(&raw, &direction.sequence)?;
            trace!(
                %route_id,
                trip_id = %trip.trip_id,
                direction = %direction.direction,
                ?span,
                "split trip"
            );
            Some(SplitPart {
                direction: direction.direction,
                stops: raw[span].to_vec(),
            })
        })
        .collect();

    if parts.is_empty() {
        error!(%route_id, ?trip, "trip matches no canonical path");
        return Err(NormalizeError::UnreconcilableTrip {
            route_id,
            trip: Box::new(trip.clone()),
        });
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CanonicalStop, DirectionSpec};

    fn stops(ids: &[&str]) -> Vec<RawStopTime> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| RawStopTime::new(id, i as u32 + 1))
            .collect()
    }

    fn trip(ids: &[&str]) -> RawTrip {
        RawTrip {
            trip_id: "loop-1".into(),
            route_id: "r3".into(),
            service_id: "wk".into(),
            direction_id: None,
            headsign: Some("Banff - Canmore".into()),
            stops: stops(ids),
        }
    }

    fn part_ids(part: &SplitPart) -> Vec<&str> {
        part.stops.iter().map(|s| s.stop_id.as_str()).collect()
    }

    /// Canmore ↔ Banff with a soft stop on each leg.
    fn route_3() -> RouteTripSpec {
        RouteTripSpec::new(
            DirectionSpec::new(
                Direction::North,
                "Banff HS",
                vec![
                    CanonicalStop::hard("canmore"),
                    CanonicalStop::soft("rotary"),
                    CanonicalStop::hard("banff"),
                ],
            ),
            DirectionSpec::new(
                Direction::South,
                "Canmore",
                vec![
                    CanonicalStop::hard("banff"),
                    CanonicalStop::soft("collegiate"),
                    CanonicalStop::hard("canmore"),
                ],
            ),
        )
    }

    #[test]
    fn hard_run_spans_unlisted_stops() {
        let seq = route_3().first.sequence;
        let raw = stops(&["x", "canmore", "y", "rotary", "banff", "z"]);
        assert_eq!(hard_run(&raw, &seq), Some(1..=4));
    }

    #[test]
    fn soft_stops_never_count() {
        let seq = route_3().first.sequence;
        let raw = stops(&["canmore", "rotary"]);
        assert_eq!(hard_run(&raw, &seq), None);
    }

    #[test]
    fn hard_run_needs_canonical_order() {
        let seq = route_3().first.sequence;
        let raw = stops(&["banff", "canmore"]);
        assert_eq!(hard_run(&raw, &seq), None);
    }

    #[test]
    fn loop_trip_splits_into_both_directions() {
        let t = trip(&["canmore", "rotary", "banff", "w", "collegiate", "canmore"]);
        let parts = split_trip(StableRouteId::new(3), &t, &route_3()).unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].direction, Direction::North);
        assert_eq!(part_ids(&parts[0]), vec!["canmore", "rotary", "banff"]);
        assert_eq!(parts[1].direction, Direction::South);
        assert_eq!(
            part_ids(&parts[1]),
            vec!["banff", "w", "collegiate", "canmore"]
        );
    }

    #[test]
    fn one_way_trip_gives_one_part() {
        let t = trip(&["banff", "collegiate", "canmore"]);
        let parts = split_trip(StableRouteId::new(3), &t, &route_3()).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].direction, Direction::South);
    }

    #[test]
    fn raw_order_is_taken_from_sequence_numbers() {
        let mut t = trip(&["canmore", "rotary", "banff"]);
        t.stops.reverse();
        let parts = split_trip(StableRouteId::new(3), &t, &route_3()).unwrap();
        assert_eq!(parts[0].direction, Direction::North);
        assert_eq!(part_ids(&parts[0]), vec!["canmore", "rotary", "banff"]);
    }

    #[test]
    fn hard_stop_visits() {
        let seq = route_3().first.sequence;
        assert!(visits_hard_stop(&stops(&["x", "banff"]), &seq));
        assert!(!visits_hard_stop(&stops(&["rotary", "x"]), &seq));
        assert!(!visits_hard_stop(&[], &seq));
    }

    #[test]
    fn unreconcilable_trip() {
        let t = trip(&["rotary", "somewhere", "collegiate"]);
        let err = split_trip(StableRouteId::new(3), &t, &route_3()).unwrap_err();
        match err {
            NormalizeError::UnreconcilableTrip { route_id, trip } => {
                assert_eq!(route_id, StableRouteId::new(3));
                assert_eq!(trip.trip_id, "loop-1");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
