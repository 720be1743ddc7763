//! Free-text label cleanup.
//!
//! Route long names, trip headsigns and stop names go through the same
//! ordered steps: route marker removal, "and" → "&", street-type
//! abbreviations, known phrases, then whitespace/separator/casing tidy-up.
//! Stop names additionally get ordinal and stop-code handling. All entry
//! points are total and idempotent; text no rule recognises passes
//! through unchanged.

mod abbreviations;
mod clean;

pub use clean::{
    clean_and, clean_label, clean_numbers, clean_phrases, clean_route_long_name,
    clean_stop_name, clean_street_types, clean_trip_headsign, strip_route_marker,
};
