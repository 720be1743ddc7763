//! Normalization error types.
//!
//! Every variant is fatal for the run: the rules are exhaustive and
//! hand-verified for one feed, so any gap means a rule update is needed.
//! Each variant carries the raw payload that triggered it so the failure
//! can be reproduced in a test.

use super::{Direction, StableRouteId};
use crate::feed::{RawRoute, RawTrip};

/// Fatal rule mismatches raised while normalizing a feed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NormalizeError {
    /// Route naming matches no numeric pattern and no exception entry
    #[error("unexpected route id for {route:?}")]
    UnresolvableRoute { route: RawRoute },

    /// Two different feed routes resolved to the same stable id
    #[error("route id {id} assigned to both feed routes {first:?} and {second:?}")]
    RouteIdCollision {
        id: StableRouteId,
        first: String,
        second: String,
    },

    /// Trip belongs to a feed route that is not in the routes table
    #[error("trip {trip_id:?} references unknown feed route {route_id:?}")]
    UnknownRoute { route_id: String, trip_id: String },

    /// Neither the direction flag nor the headsign table classify the trip
    #[error("{route_id}: unexpected trip {trip:?}")]
    UnclassifiableDirection {
        route_id: StableRouteId,
        trip: Box<RawTrip>,
    },

    /// Feed direction flag is not 0 or 1
    #[error("{route_id}: invalid direction flag {flag} on trip {trip:?}")]
    InvalidDirectionFlag {
        route_id: StableRouteId,
        flag: u8,
        trip: Box<RawTrip>,
    },

    /// Trip stops fit neither canonical direction of the route
    #[error("{route_id}: cannot reconcile stops of trip {trip:?}")]
    UnreconcilableTrip {
        route_id: StableRouteId,
        trip: Box<RawTrip>,
    },

    /// Two trips of one route and direction disagree on their headsign
    #[error(
        "{route_id} {direction}: unexpected trips to merge {existing:?} & {incoming:?}"
    )]
    UnexpectedMerge {
        route_id: StableRouteId,
        direction: Direction,
        existing: String,
        incoming: String,
    },
}

impl NormalizeError {
    /// The stable route id involved, when one was already assigned.
    pub fn route_id(&self) -> Option<StableRouteId> {
        match self {
            NormalizeError::UnresolvableRoute { .. } | NormalizeError::UnknownRoute { .. } => None,
            NormalizeError::RouteIdCollision { id, .. } => Some(*id),
            NormalizeError::UnclassifiableDirection { route_id, .. }
            | NormalizeError::InvalidDirectionFlag { route_id, .. }
            | NormalizeError::UnreconcilableTrip { route_id, .. }
            | NormalizeError::UnexpectedMerge { route_id, .. } => Some(*route_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> RawTrip {
        RawTrip {
            trip_id: "t9".into(),
            route_id: "r9".into(),
            service_id: "wk".into(),
            direction_id: None,
            headsign: Some("Nowhere".into()),
            stops: Vec::new(),
        }
    }

    #[test]
    fn error_display() {
        let err = NormalizeError::UnresolvableRoute {
            route: RawRoute::new("r", "Zed", ""),
        };
        assert!(err.to_string().starts_with("unexpected route id for"));
        assert!(err.to_string().contains("Zed"));

        let err = NormalizeError::UnclassifiableDirection {
            route_id: StableRouteId::new(9),
            trip: Box::new(trip()),
        };
        assert!(err.to_string().starts_with("9: unexpected trip"));
        assert!(err.to_string().contains("Nowhere"));

        let err = NormalizeError::UnexpectedMerge {
            route_id: StableRouteId::new(1),
            direction: Direction::North,
            existing: "Downtown".into(),
            incoming: "Downtown Banff".into(),
        };
        assert_eq!(
            err.to_string(),
            "1 north: unexpected trips to merge \"Downtown\" & \"Downtown Banff\""
        );
    }

    #[test]
    fn route_id_accessor() {
        let err = NormalizeError::UnreconcilableTrip {
            route_id: StableRouteId::new(3),
            trip: Box::new(trip()),
        };
        assert_eq!(err.route_id(), Some(StableRouteId::new(3)));

        let err = NormalizeError::UnresolvableRoute {
            route: RawRoute::new("r", "", ""),
        };
        assert_eq!(err.route_id(), None);
    }
}
