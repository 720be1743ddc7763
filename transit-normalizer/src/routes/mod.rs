//! Route identity resolution.
//!
//! Agencies name routes inconsistently ("8", "8S", "On-It", or no short
//! name at all). This module turns each raw route into a stable numeric id
//! and a display code, failing fast on any naming scheme it does not know.

mod resolver;

pub use resolver::{ResolvedRoute, RouteResolver};
