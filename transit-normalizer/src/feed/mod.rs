//! Feed records consumed by the normalizer.
//!
//! The feed reader (outside this crate) parses and decompresses the GTFS
//! archive and hands over a [`FeedSnapshot`]: routes, trips with their stop
//! times, stop names and the calendar-derived set of useful service ids.

mod error;
mod load;
mod types;

pub use error::FeedError;
pub use load::{load_snapshot, read_json, write_json};
pub use types::{FeedSnapshot, RawRoute, RawStop, RawStopTime, RawTrip};
