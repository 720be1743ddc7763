//! JSON rule file format.
//!
//! ```json
//! {
//!   "routes": [
//!     {
//!       "route_id": 19008,
//!       "directions": ["north", "south"],
//!       "headsigns": { "Lake Louise": "north", "Banff": "south" },
//!       "trip_spec": [
//!         { "direction": "north", "headsign": "Lk Louise",
//!           "stops": ["2428685", { "stop_id": "2512558", "soft": true }, "2483623"] },
//!         { "direction": "south", "headsign": "Banff HS",
//!           "stops": ["2483623", { "stop_id": "2512557", "soft": true }, "2428685"] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::{Direction, DirectionPair};
use crate::feed::FeedError;

use super::spec::{CanonicalStop, DirectionSpec, RouteTripSpec};
use super::store::{RouteRule, RouteRules};

#[derive(Debug, Deserialize)]
pub(super) struct RulesFile {
    routes: Vec<RouteRuleFile>,
}

#[derive(Debug, Deserialize)]
struct RouteRuleFile {
    route_id: i64,
    directions: [Direction; 2],
    #[serde(default)]
    headsigns: HashMap<String, Direction>,
    #[serde(default)]
    trip_spec: Option<Vec<DirectionSpecFile>>,
}

#[derive(Debug, Deserialize)]
struct DirectionSpecFile {
    direction: Direction,
    headsign: String,
    stops: Vec<StopEntry>,
}

/// A bare stop id is a hard stop; the object form can mark it soft.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StopEntry {
    Id(String),
    Marked {
        stop_id: String,
        #[serde(default)]
        soft: bool,
    },
}

impl StopEntry {
    fn into_stop(self) -> CanonicalStop {
        match self {
            StopEntry::Id(id) => CanonicalStop::hard(&id),
            StopEntry::Marked { stop_id, soft: true } => CanonicalStop::soft(&stop_id),
            StopEntry::Marked { stop_id, soft: false } => CanonicalStop::hard(&stop_id),
        }
    }
}

impl RulesFile {
    pub(super) fn into_rules(self) -> Result<RouteRules, FeedError> {
        self.routes
            .into_iter()
            .try_fold(RouteRules::builder(), |builder, route| {
                let id = route.route_id;
                Ok::<_, FeedError>(builder.add(id, route.into_rule()?))
            })?
            .build()
    }
}

impl RouteRuleFile {
    fn into_rule(self) -> Result<RouteRule, FeedError> {
        let pair = DirectionPair::new(self.directions[0], self.directions[1]);
        let mut rule = RouteRule::new(pair);
        rule.headsigns = self.headsigns;

        if let Some(mut specs) = self.trip_spec {
            let route = self.route_id;
            let mut take = |direction: Direction| {
                let pos = specs
                    .iter()
                    .position(|s| s.direction == direction)
                    .ok_or_else(|| FeedError::InvalidRule {
                        route,
                        message: format!("trip spec has no {direction} sequence"),
                    })?;
                let spec = specs.swap_remove(pos);
                let stops = spec.stops.into_iter().map(StopEntry::into_stop).collect();
                Ok::<_, FeedError>(DirectionSpec::new(spec.direction, &spec.headsign, stops))
            };
            let first = take(pair.first)?;
            let second = take(pair.second)?;
            if let Some(extra) = specs.first() {
                return Err(FeedError::InvalidRule {
                    route,
                    message: format!("trip spec has an extra {} sequence", extra.direction),
                });
            }
            rule = rule.trip_spec(RouteTripSpec::new(first, second));
        }

        Ok(rule)
    }
}
