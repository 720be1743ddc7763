//! Whole-feed normalization.
//!
//! Turns a [`FeedSnapshot`] into [`NormalizedTrip`]s: routes get stable ids,
//! trips get a direction and a cleaned headsign, and stops are put in
//! corrected order with cleaned names. The first rule mismatch aborts the
//! run.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, trace, warn};

use crate::classify::{Classification, DirectionClassifier};
use crate::domain::{Direction, NormalizeError, NormalizedTrip, OrderedStop, StableRouteId};
use crate::feed::{FeedSnapshot, RawRoute, RawStop, RawStopTime, RawTrip};
use crate::reconcile::{order_stops, split_trip, visits_hard_stop};
use crate::routes::{ResolvedRoute, RouteResolver};
use crate::rules::{CanonicalStopSequence, RouteRules};
use crate::text::{clean_stop_name, clean_trip_headsign};

/// Which service ids are still worth exporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    /// `None` keeps every service.
    useful: Option<HashSet<String>>,
}

impl ServiceFilter {
    /// Keep every trip.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only trips running one of `service_ids`. An empty list keeps
    /// nothing.
    pub fn only<I, S>(service_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            useful: Some(service_ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Filter from the snapshot's useful service ids.
    pub fn from_snapshot(snapshot: &FeedSnapshot) -> Self {
        match &snapshot.useful_service_ids {
            Some(ids) => Self::only(ids.iter().cloned()),
            None => Self::all(),
        }
    }

    pub fn keeps(&self, service_id: &str) -> bool {
        self.useful
            .as_ref()
            .is_none_or(|useful| useful.contains(service_id))
    }
}

/// Normalizes feeds against one rule table.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    rules: &'a RouteRules,
    resolver: RouteResolver,
}

impl<'a> Normalizer<'a> {
    pub fn new(rules: &'a RouteRules, resolver: RouteResolver) -> Self {
        Self { rules, resolver }
    }

    /// Resolve every feed route, keyed by feed route id.
    ///
    /// Fails if a route cannot be resolved or two feed routes end up with
    /// the same stable id.
    pub fn resolve_routes(
        &self,
        routes: &[RawRoute],
    ) -> Result<HashMap<String, ResolvedRoute>, NormalizeError> {
        let mut by_feed_id = HashMap::with_capacity(routes.len());
        let mut owners: HashMap<StableRouteId, &str> = HashMap::with_capacity(routes.len());

        for route in routes {
            let resolved = self.resolver.resolve(route)?;
            let previous = owners.insert(resolved.id, &route.route_id);
            if let Some(first) = previous.filter(|first| *first != route.route_id) {
                error!(id = %resolved.id, first, second = %route.route_id, "route id collision");
                return Err(NormalizeError::RouteIdCollision {
                    id: resolved.id,
                    first: first.to_string(),
                    second: route.route_id.clone(),
                });
            }
            by_feed_id.insert(route.route_id.clone(), resolved);
        }

        Ok(by_feed_id)
    }

    /// Normalize one trip of an already resolved route.
    ///
    /// Returns one output trip, or one per direction when an
    /// undifferentiated trip is split. Split copies get the direction
    /// appended to their trip id ("t1-north").
    ///
    /// On a route with canonical paths, a classified trip must visit at
    /// least one hard stop of its direction.
    pub fn normalize_trip(
        &self,
        route: &ResolvedRoute,
        trip: &RawTrip,
        stop_names: &HashMap<&str, String>,
    ) -> Result<Vec<NormalizedTrip>, NormalizeError> {
        let classifier = DirectionClassifier::new(self.rules);

        let Some(spec) = self.rules.trip_spec(route.id) else {
            let direction = classifier.classify(route.id, trip)?;
            let headsign = clean_trip_headsign(trip.headsign.as_deref().unwrap_or_default());
            let stops = ordered(&trip.stops, None, stop_names);
            return Ok(vec![output(route, trip, direction, headsign, stops)]);
        };

        match classifier.try_classify(route.id, trip)? {
            Classification::Classified(direction) => {
                let Some(direction_spec) = spec
                    .for_direction(direction)
                    .filter(|d| visits_hard_stop(&trip.stops, &d.sequence))
                else {
                    error!(route_id = %route.id, %direction, ?trip, "trip is off its canonical path");
                    return Err(NormalizeError::UnreconcilableTrip {
                        route_id: route.id,
                        trip: Box::new(trip.clone()),
                    });
                };
                let headsign = spec_headsign(Some(direction_spec.headsign.as_str()), trip);
                let stops = ordered(&trip.stops, Some(&direction_spec.sequence), stop_names);
                Ok(vec![output(route, trip, direction, headsign, stops)])
            }
            Classification::Unclassified => {
                debug!(route_id = %route.id, trip_id = %trip.trip_id, "splitting trip");
                let parts = split_trip(route.id, trip, spec)?;
                Ok(parts
                    .into_iter()
                    .map(|part| {
                        let direction_spec = spec.for_direction(part.direction);
                        let sequence = direction_spec.map(|d| &d.sequence);
                        let headsign =
                            spec_headsign(direction_spec.map(|d| d.headsign.as_str()), trip);
                        let stops = ordered(&part.stops, sequence, stop_names);
                        let mut copy = output(route, trip, part.direction, headsign, stops);
                        copy.trip_id = format!("{}-{}", trip.trip_id, part.direction);
                        copy
                    })
                    .collect())
            }
        }
    }

    /// Normalize a whole feed.
    ///
    /// Output is sorted by route id, direction then trip id.
    pub fn normalize_feed(
        &self,
        snapshot: &FeedSnapshot,
    ) -> Result<Vec<NormalizedTrip>, NormalizeError> {
        let routes = self.resolve_routes(&snapshot.routes)?;
        let filter = ServiceFilter::from_snapshot(snapshot);
        let stop_names = clean_stop_names(&snapshot.stops);

        let mut trips = Vec::with_capacity(snapshot.trips.len());
        let mut skipped = 0usize;

        for trip in &snapshot.trips {
            if !filter.keeps(&trip.service_id) {
                trace!(trip_id = %trip.trip_id, service_id = %trip.service_id, "skipping trip");
                skipped += 1;
                continue;
            }

            let Some(route) = routes.get(&trip.route_id) else {
                error!(trip_id = %trip.trip_id, route_id = %trip.route_id, "unknown route");
                return Err(NormalizeError::UnknownRoute {
                    route_id: trip.route_id.clone(),
                    trip_id: trip.trip_id.clone(),
                });
            };

            trips.extend(self.normalize_trip(route, trip, &stop_names)?);
        }

        check_merge(&trips)?;

        trips.sort_by(|a, b| {
            a.route_id
                .cmp(&b.route_id)
                .then_with(|| a.direction.cmp(&b.direction))
                .then_with(|| a.trip_id.cmp(&b.trip_id))
        });

        debug!(
            routes = routes.len(),
            trips = trips.len(),
            skipped,
            "normalized feed"
        );
        Ok(trips)
    }
}

/// Check that trips sharing a route and direction share one headsign.
pub fn check_merge(trips: &[NormalizedTrip]) -> Result<(), NormalizeError> {
    let mut headsigns: HashMap<(StableRouteId, Direction), &str> = HashMap::new();

    for trip in trips {
        let existing = *headsigns
            .entry((trip.route_id, trip.direction))
            .or_insert(trip.headsign.as_str());
        if existing != trip.headsign {
            warn!(
                route_id = %trip.route_id,
                direction = %trip.direction,
                existing,
                incoming = %trip.headsign,
                "unexpected trips to merge"
            );
            return Err(NormalizeError::UnexpectedMerge {
                route_id: trip.route_id,
                direction: trip.direction,
                existing: existing.to_string(),
                incoming: trip.headsign.clone(),
            });
        }
    }

    Ok(())
}

/// Cleaned stop names keyed by stop id.
pub fn clean_stop_names(stops: &[RawStop]) -> HashMap<&str, String> {
    stops
        .iter()
        .map(|stop| (stop.stop_id.as_str(), clean_stop_name(&stop.name)))
        .collect()
}

/// The direction label when the route has one, the trip's own otherwise.
fn spec_headsign(label: Option<&str>, trip: &RawTrip) -> String {
    clean_trip_headsign(label.or(trip.headsign.as_deref()).unwrap_or_default())
}

fn ordered(
    stops: &[RawStopTime],
    sequence: Option<&CanonicalStopSequence>,
    stop_names: &HashMap<&str, String>,
) -> Vec<OrderedStop> {
    order_stops(stops, sequence)
        .into_iter()
        .map(|placed| OrderedStop {
            stop_name: stop_names.get(placed.stop.stop_id.as_str()).cloned(),
            stop_id: placed.stop.stop_id,
            raw_sequence: placed.stop.sequence,
            order: placed.order,
        })
        .collect()
}

fn output(
    route: &ResolvedRoute,
    trip: &RawTrip,
    direction: Direction,
    headsign: String,
    stops: Vec<OrderedStop>,
) -> NormalizedTrip {
    NormalizedTrip {
        trip_id: trip.trip_id.clone(),
        route_id: route.id,
        route_short_name: route.short_name.clone(),
        route_long_name: route.long_name.clone(),
        direction,
        headsign,
        stops,
    }
}
