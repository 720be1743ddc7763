//! Per-route rules: direction pairs, headsign tables and canonical paths.
//!
//! The table is immutable configuration data. It is constructed once
//! (from [`roam_rules`] or a JSON file) and then passed by reference to
//! the classifier and reconciler, which are pure functions of it.

mod file;
mod roam;
mod spec;
mod store;

pub use roam::roam_rules;
pub use spec::{CanonicalStop, CanonicalStopSequence, DirectionSpec, RouteTripSpec, StopMarker};
pub use store::{RouteRule, RouteRules, RouteRulesBuilder};
