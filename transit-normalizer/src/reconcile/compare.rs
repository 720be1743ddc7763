//! Stop ordering against a canonical sequence.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::feed::RawStopTime;
use crate::rules::CanonicalStopSequence;

/// Where one stop visit lands relative to the canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPlacement {
    /// Canonical index the visit sorts at. `None` sorts before everything.
    pub anchor: Option<usize>,
    /// Whether the stop itself is in the canonical sequence.
    pub listed: bool,
    /// Index in the raw (sequence-sorted) trip.
    pub raw_index: usize,
}

/// Compare two placements: the one visited earlier along the canonical
/// path sorts first.
///
/// Listed stops go before unlisted stops sharing their anchor, and raw
/// order breaks any remaining tie.
pub fn compare_early(a: &StopPlacement, b: &StopPlacement) -> Ordering {
    a.anchor
        .cmp(&b.anchor)
        .then_with(|| b.listed.cmp(&a.listed))
        .then_with(|| a.raw_index.cmp(&b.raw_index))
}

/// Stops sorted by raw sequence number; equal numbers keep feed order.
pub fn sort_raw(stops: &[RawStopTime]) -> Vec<RawStopTime> {
    let mut raw = stops.to_vec();
    raw.sort_by_key(|stop| stop.sequence);
    raw
}

/// 0-based visit count of each stop, in raw order.
pub(super) fn occurrences(stops: &[RawStopTime]) -> Vec<usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    stops
        .iter()
        .map(|stop| {
            let count = seen.entry(stop.stop_id.as_str()).or_default();
            let occurrence = *count;
            *count += 1;
            occurrence
        })
        .collect()
}

/// Place every visit of a raw-sorted trip.
///
/// The k-th visit of a listed stop takes that stop's k-th canonical index.
/// An unlisted stop anchors to the lower of the nearest listed visits
/// before and after it; one with no listed visit before it anchors to the
/// start.
pub fn placements(raw: &[RawStopTime], sequence: &CanonicalStopSequence) -> Vec<StopPlacement> {
    let positions: Vec<Option<usize>> = raw
        .iter()
        .zip(occurrences(raw))
        .map(|(stop, occurrence)| sequence.position_of(&stop.stop_id, occurrence))
        .collect();

    let mut previous = vec![None; raw.len()];
    let mut last = None;
    for (i, position) in positions.iter().enumerate() {
        previous[i] = last;
        if position.is_some() {
            last = *position;
        }
    }

    let mut next = vec![None; raw.len()];
    let mut upcoming = None;
    for (i, position) in positions.iter().enumerate().rev() {
        next[i] = upcoming;
        if position.is_some() {
            upcoming = *position;
        }
    }

    positions
        .iter()
        .enumerate()
        .map(|(raw_index, position)| match position {
            Some(p) => StopPlacement {
                anchor: Some(*p),
                listed: true,
                raw_index,
            },
            None => StopPlacement {
                anchor: match (previous[raw_index], next[raw_index]) {
                    (Some(before), Some(after)) => Some(before.min(after)),
                    (before, _) => before,
                },
                listed: false,
                raw_index,
            },
        })
        .collect()
}

/// A stop visit with its final 0-based position in the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedStop {
    pub stop: RawStopTime,
    pub order: usize,
}

/// Order a trip's stops, against `sequence` when one is given.
///
/// Without a sequence, or when none of the stops are listed, the result is
/// the raw order. Duplicate visits are kept.
pub fn order_stops(
    stops: &[RawStopTime],
    sequence: Option<&CanonicalStopSequence>,
) -> Vec<PlacedStop> {
    let raw = sort_raw(stops);

    let mut indices: Vec<usize> = (0..raw.len()).collect();
    if let Some(sequence) = sequence {
        let placed = placements(&raw, sequence);
        indices.sort_by(|a, b| compare_early(&placed[*a], &placed[*b]));
    }

    indices
        .into_iter()
        .enumerate()
        .map(|(order, i)| PlacedStop {
            stop: raw[i].clone(),
            order,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::CanonicalStop;

    fn stops(ids: &[&str]) -> Vec<RawStopTime> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| RawStopTime::new(id, (i as u32 + 1) * 10))
            .collect()
    }

    fn ids(placed: &[PlacedStop]) -> Vec<&str> {
        placed.iter().map(|p| p.stop.stop_id.as_str()).collect()
    }

    fn sequence(ids: &[&str]) -> CanonicalStopSequence {
        CanonicalStopSequence::new(ids.iter().map(|id| CanonicalStop::hard(id)).collect())
    }

    #[test]
    fn listed_before_unlisted_at_same_anchor() {
        let listed = StopPlacement {
            anchor: Some(2),
            listed: true,
            raw_index: 5,
        };
        let unlisted = StopPlacement {
            anchor: Some(2),
            listed: false,
            raw_index: 1,
        };
        assert_eq!(compare_early(&listed, &unlisted), Ordering::Less);
        assert_eq!(compare_early(&unlisted, &listed), Ordering::Greater);
    }

    #[test]
    fn missing_anchor_sorts_first() {
        let leading = StopPlacement {
            anchor: None,
            listed: false,
            raw_index: 3,
        };
        let first = StopPlacement {
            anchor: Some(0),
            listed: true,
            raw_index: 0,
        };
        assert_eq!(compare_early(&leading, &first), Ordering::Less);
    }

    #[test]
    fn raw_order_without_sequence() {
        let mut trip = stops(&["a", "b", "c"]);
        trip.swap(0, 2);
        let placed = order_stops(&trip, None);
        assert_eq!(ids(&placed), vec!["a", "b", "c"]);
        assert_eq!(
            placed.iter().map(|p| p.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn equal_sequence_numbers_keep_feed_order() {
        let trip = vec![RawStopTime::new("b", 1), RawStopTime::new("a", 1)];
        assert_eq!(ids(&order_stops(&trip, None)), vec!["b", "a"]);
    }

    #[test]
    fn reversed_trip_is_put_in_canonical_order() {
        let seq = sequence(&["a", "b", "c", "d"]);
        let placed = order_stops(&stops(&["d", "c", "b", "a"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["a", "b", "c", "d"]);
        // Raw sequence numbers travel with their stops.
        assert_eq!(placed[0].stop.sequence, 40);
    }

    #[test]
    fn unlisted_stop_follows_lower_neighbour() {
        let seq = sequence(&["a", "b", "c"]);

        let placed = order_stops(&stops(&["a", "x", "b", "c"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["a", "x", "b", "c"]);

        let placed = order_stops(&stops(&["c", "x", "a"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["a", "x", "c"]);
    }

    #[test]
    fn unlisted_run_keeps_raw_order() {
        let seq = sequence(&["a", "b"]);
        let placed = order_stops(&stops(&["a", "x", "y", "z", "b"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["a", "x", "y", "z", "b"]);
    }

    #[test]
    fn leading_and_trailing_unlisted_stops() {
        let seq = sequence(&["a", "b"]);
        let placed = order_stops(&stops(&["start", "a", "b", "end"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["start", "a", "b", "end"]);
    }

    #[test]
    fn nothing_listed_is_raw_order() {
        let seq = sequence(&["a", "b"]);
        let placed = order_stops(&stops(&["z", "y", "x"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["z", "y", "x"]);
    }

    #[test]
    fn loop_keeps_both_visits() {
        let seq = sequence(&["hub", "far", "hub"]);
        let placed = order_stops(&stops(&["hub", "mid", "far", "hub"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["hub", "mid", "far", "hub"]);
        assert_eq!(placed[0].stop.sequence, 10);
        assert_eq!(placed[3].stop.sequence, 40);
    }

    #[test]
    fn extra_visits_reuse_last_listed_position() {
        let seq = sequence(&["a", "b"]);
        let placed = order_stops(&stops(&["a", "b", "b"]), Some(&seq));
        assert_eq!(ids(&placed), vec!["a", "b", "b"]);
        assert_eq!(placed[2].stop.sequence, 30);
    }

    #[test]
    fn occurrence_counts() {
        let trip = stops(&["a", "b", "a", "a"]);
        assert_eq!(occurrences(&trip), vec![0, 0, 1, 2]);
    }
}
