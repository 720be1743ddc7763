//! Raw feed record DTOs.
//!
//! These types mirror the parsed GTFS records handed over by the feed
//! reader. Field names follow the GTFS column names so a snapshot can be
//! dumped straight from the parsed tables. Optional columns use `Option`
//! or default to empty strings, the same way GTFS leaves cells blank.

use serde::{Deserialize, Serialize};

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRoute {
    /// Opaque feed route id (`route_id`).
    pub route_id: String,

    /// Agency short name, may be empty or non-numeric (`route_short_name`).
    #[serde(rename = "route_short_name", default)]
    pub short_name: String,

    /// Agency long name (`route_long_name`).
    #[serde(rename = "route_long_name", default)]
    pub long_name: String,
}

impl RawRoute {
    pub fn new(route_id: &str, short_name: &str, long_name: &str) -> Self {
        Self {
            route_id: route_id.to_string(),
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
        }
    }
}

/// A row of `stop_times.txt`, reduced to what ordering needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawStopTime {
    pub stop_id: String,

    /// Feed `stop_sequence`. Increasing along the trip but not
    /// necessarily contiguous.
    #[serde(rename = "stop_sequence")]
    pub sequence: u32,
}

impl RawStopTime {
    pub fn new(stop_id: &str, sequence: u32) -> Self {
        Self {
            stop_id: stop_id.to_string(),
            sequence,
        }
    }
}

/// A row of `trips.txt` with its stop times attached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawTrip {
    pub trip_id: String,

    /// Feed route id this trip belongs to.
    pub route_id: String,

    #[serde(default)]
    pub service_id: String,

    /// Feed `direction_id`, absent in some feed versions.
    #[serde(default)]
    pub direction_id: Option<u8>,

    /// Feed `trip_headsign`.
    #[serde(rename = "trip_headsign", default)]
    pub headsign: Option<String>,

    /// Stop times, in any order.
    #[serde(default)]
    pub stops: Vec<RawStopTime>,
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawStop {
    pub stop_id: String,

    #[serde(rename = "stop_name", default)]
    pub name: String,
}

/// Everything the normalizer needs from one feed, pre-loaded in memory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    pub routes: Vec<RawRoute>,

    #[serde(default)]
    pub trips: Vec<RawTrip>,

    #[serde(default)]
    pub stops: Vec<RawStop>,

    /// Service ids still running in the exported date range.
    ///
    /// `None` means no calendar filtering was done and every trip is kept.
    #[serde(default)]
    pub useful_service_ids: Option<Vec<String>>,
}
