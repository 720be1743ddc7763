//! Normalizer output types handed to the output writer.

use serde::{Deserialize, Serialize};

use super::{Direction, StableRouteId};

/// A stop of a normalized trip, in corrected order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedStop {
    pub stop_id: String,
    /// Cleaned stop name, if the stop is known to the feed.
    pub stop_name: Option<String>,
    /// The feed's original `stop_sequence`.
    pub raw_sequence: u32,
    /// Corrected 0-based position within the trip.
    pub order: usize,
}

/// One output trip: a feed trip (or one direction of it) after
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTrip {
    /// Feed trip id, with the direction appended for split copies.
    pub trip_id: String,
    pub route_id: StableRouteId,
    /// Display code for the route (e.g. "8S", "TSP").
    pub route_short_name: String,
    pub route_long_name: String,
    pub direction: Direction,
    pub headsign: String,
    /// Stops sorted by `order`.
    pub stops: Vec<OrderedStop>,
}

impl NormalizedTrip {
    /// Stop ids in corrected order.
    pub fn stop_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.stop_id.as_str()).collect()
    }
}

/// GTFS `route_type` for bus service.
pub const ROUTE_TYPE_BUS: u16 = 3;

/// Agency-wide values shared by every route of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyInfo {
    /// Brand colour, six hex digits without `#`.
    pub color: String,
    /// GTFS `route_type` of every route.
    pub route_type: u16,
}

impl AgencyInfo {
    /// Roam Transit: dark grey, buses only.
    pub fn roam() -> Self {
        Self {
            color: "231F20".to_string(),
            route_type: ROUTE_TYPE_BUS,
        }
    }
}

/// The complete normalizer output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFeed {
    pub agency: AgencyInfo,
    pub trips: Vec<NormalizedTrip>,
}
