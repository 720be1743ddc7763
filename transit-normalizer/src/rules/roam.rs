//! Built-in rules for the Roam Transit feed (Banff, Canmore, Lake Louise).

use crate::domain::{Direction, DirectionPair};
use crate::feed::FeedError;

use super::spec::{CanonicalStop, DirectionSpec, RouteTripSpec};
use super::store::{RouteRule, RouteRules};

use Direction::{East, North, South, West};

/// 5B: Canmore local, Dyrgas Gate ↔ Glacier Drive.
const ROUTE_5B: i64 = 2_005;
/// 8S: Lake Louise via the 1A.
const ROUTE_8S: i64 = 19_008;
/// 8X: Lake Louise express.
const ROUTE_8X: i64 = 24_008;
/// On-It regional service to Calgary.
const ROUTE_ON_IT: i64 = 10_981;

fn hard(id: &str) -> CanonicalStop {
    CanonicalStop::hard(id)
}

fn soft(id: &str) -> CanonicalStop {
    CanonicalStop::soft(id)
}

fn north_south(north: &str, south: &str) -> RouteRule {
    RouteRule::new(DirectionPair::north_south())
        .headsign(north, North)
        .headsign(south, South)
}

/// Create the Roam Transit rule table.
///
/// Headsign tables cover only the headsigns observed in the feed. Routes
/// 3, 5B and 8S also carry canonical paths because their trips arrive with
/// out-of-order or undifferentiated stop sequences.
pub fn roam_rules() -> Result<RouteRules, FeedError> {
    RouteRules::builder()
        .add(1, north_south("Downtown Banff", "Banff Gondola"))
        .add(2, north_south("Tunnel Mountain", "Banff"))
        .add(
            3,
            north_south("Banff", "Canmore").trip_spec(RouteTripSpec::new(
                DirectionSpec::new(
                    North,
                    "Banff HS",
                    vec![
                        hard("2428659"), // Canmore 9th Street
                        soft("2428657"), // Canmore Benchlands Overpass South
                        soft("2428656"), // Canmore Holiday Inn
                        soft("2428700"), // Rotary Park
                        soft("2428680"), // Banff Train Station Elk Street
                        hard("2428685"), // Banff High School
                    ],
                ),
                DirectionSpec::new(
                    South,
                    "Canmore",
                    vec![
                        hard("2428685"), // Banff High School
                        soft("2428661"), // Canmore Collegiate
                        hard("2428659"), // Canmore 9th Street
                    ],
                ),
            )),
        )
        .add(4, north_south("Banff", "Cave and Basin"))
        .add(5, north_south("Cougar Creek", "Three Sisters"))
        .add(
            ROUTE_5B,
            north_south("Cougar Creek", "Three Sisters").trip_spec(RouteTripSpec::new(
                DirectionSpec::new(
                    North,
                    "Glacier Dr",
                    vec![
                        hard("2428637"), // Dyrgas Gate
                        soft("2428621"), // Boulder Crescent
                        hard("2428655"), // Glacier Drive South
                    ],
                ),
                DirectionSpec::new(
                    South,
                    "Dyrgas Gt",
                    vec![
                        hard("2428655"), // Glacier Drive South
                        soft("2428644"), // Canmore Shopping Area North
                        hard("2428637"), // Dyrgas Gate
                    ],
                ),
            )),
        )
        .add(6, north_south("Lake Minnewanka", "Banff"))
        .add(7, north_south("Downtown Banff", "Banff Centre"))
        .add(8, north_south("Lake Louise", "Banff"))
        .add(
            ROUTE_8S,
            north_south("Lake Louise", "Banff").trip_spec(RouteTripSpec::new(
                DirectionSpec::new(
                    North,
                    "Lk Louise",
                    vec![
                        hard("2428685"), // Banff High School Transit Hub
                        soft("2512558"),
                        hard("2483623"), // Lake Louise Lakeshore
                    ],
                ),
                DirectionSpec::new(
                    South,
                    "Banff HS",
                    vec![
                        hard("2483623"), // Lake Louise Lakeshore
                        soft("2512557"),
                        hard("2428685"), // Banff High School Transit Hub
                    ],
                ),
            )),
        )
        .add(ROUTE_8X, north_south("Lake Louise", "Banff"))
        .add(9, north_south("Johnston Canyon", "Banff"))
        .add(10, north_south("Moraine Lake", "Banff"))
        .add(
            ROUTE_ON_IT,
            RouteRule::new(DirectionPair::new(East, West))
                .headsign("Calgary", East)
                .headsign("Banff", West),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StableRouteId;

    #[test]
    fn roam_rules_are_valid() {
        let rules = roam_rules().unwrap();
        assert_eq!(rules.len(), 14);
    }

    #[test]
    fn canonical_routes() {
        let rules = roam_rules().unwrap();
        let with_spec: Vec<i64> = rules
            .route_ids()
            .into_iter()
            .filter(|id| rules.trip_spec(*id).is_some())
            .map(StableRouteId::get)
            .collect();
        assert_eq!(with_spec, vec![3, ROUTE_5B, ROUTE_8S]);
    }

    #[test]
    fn on_it_runs_east_west() {
        let rules = roam_rules().unwrap();
        let rule = rules.get(StableRouteId::new(ROUTE_ON_IT)).unwrap();
        assert_eq!(rule.pair, DirectionPair::east_west());
        assert_eq!(rule.headsigns.get("Calgary"), Some(&East));
    }

    #[test]
    fn eight_s_south_headsign() {
        let rules = roam_rules().unwrap();
        let spec = rules.trip_spec(StableRouteId::new(ROUTE_8S)).unwrap();
        assert_eq!(
            spec.for_direction(South).map(|d| d.headsign.as_str()),
            Some("Banff HS")
        );
    }
}
