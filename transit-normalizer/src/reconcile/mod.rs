//! Stop-sequence reconciliation.
//!
//! Feed stop sequences are not reliable for some routes: stops arrive out
//! of order, or a single trip covers both directions of a route. Routes
//! with a [`RouteTripSpec`](crate::rules::RouteTripSpec) are reordered
//! against their canonical paths here, and undifferentiated trips are cut
//! into one copy per direction.

mod compare;
mod split;

pub use compare::{PlacedStop, StopPlacement, compare_early, order_stops, placements, sort_raw};
pub use split::{SplitPart, hard_run, split_trip, visits_hard_stop};
