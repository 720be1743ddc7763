//! Domain types for the feed normalizer.
//!
//! These are the validated values that flow out of normalization: stable
//! route ids, trip directions and the output shape, plus the fatal
//! error taxonomy.

mod direction;
mod error;
mod output;
mod route_id;

pub use direction::{Direction, DirectionPair, InvalidDirection};
pub use error::NormalizeError;
pub use output::{AgencyInfo, NormalizedFeed, NormalizedTrip, OrderedStop, ROUTE_TYPE_BUS};
pub use route_id::StableRouteId;
