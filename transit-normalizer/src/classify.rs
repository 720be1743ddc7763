//! Trip direction classification.
//!
//! Feeds are inconsistent between versions about whether a trip's
//! direction is flagged or has to be read from its headsign, so both are
//! supported for every route:
//!
//! 1. a feed `direction_id` of 0 or 1 picks from the route's direction pair
//! 2. otherwise the exact headsign text is looked up in the route's table
//!
//! A trip neither path classifies is an unanticipated feed change.

use tracing::{error, trace};

use crate::domain::{Direction, NormalizeError, StableRouteId};
use crate::feed::RawTrip;
use crate::rules::RouteRules;

/// Outcome of classifying one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No flag and no registered headsign.
    Unclassified,
    Classified(Direction),
}

impl Classification {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Classification::Classified(direction) => Some(direction),
            Classification::Unclassified => None,
        }
    }
}

/// Classifies trips using the per-route direction pair and headsign table.
#[derive(Debug, Clone, Copy)]
pub struct DirectionClassifier<'a> {
    rules: &'a RouteRules,
}

impl<'a> DirectionClassifier<'a> {
    pub fn new(rules: &'a RouteRules) -> Self {
        Self { rules }
    }

    /// Classify a trip, leaving it unclassified when no rule applies.
    ///
    /// A flag other than 0 or 1 is always an error.
    pub fn try_classify(
        &self,
        route_id: StableRouteId,
        trip: &RawTrip,
    ) -> Result<Classification, NormalizeError> {
        let Some(rule) = self.rules.get(route_id) else {
            return Ok(Classification::Unclassified);
        };

        if let Some(flag) = trip.direction_id {
            return match rule.pair.from_flag(flag) {
                Some(direction) => {
                    trace!(%route_id, trip_id = %trip.trip_id, flag, %direction, "classified by flag");
                    Ok(Classification::Classified(direction))
                }
                None => {
                    error!(%route_id, ?trip, flag, "invalid direction flag");
                    Err(NormalizeError::InvalidDirectionFlag {
                        route_id,
                        flag,
                        trip: Box::new(trip.clone()),
                    })
                }
            };
        }

        let by_headsign = trip
            .headsign
            .as_deref()
            .and_then(|text| rule.headsigns.get(text))
            .copied();
        match by_headsign {
            Some(direction) => {
                trace!(%route_id, trip_id = %trip.trip_id, %direction, "classified by headsign");
                Ok(Classification::Classified(direction))
            }
            None => Ok(Classification::Unclassified),
        }
    }

    /// Classify a trip, failing when it stays unclassified.
    pub fn classify(
        &self,
        route_id: StableRouteId,
        trip: &RawTrip,
    ) -> Result<Direction, NormalizeError> {
        match self.try_classify(route_id, trip)? {
            Classification::Classified(direction) => Ok(direction),
            Classification::Unclassified => {
                error!(%route_id, ?trip, "unexpected trip");
                Err(NormalizeError::UnclassifiableDirection {
                    route_id,
                    trip: Box::new(trip.clone()),
                })
            }
        }
    }
}
