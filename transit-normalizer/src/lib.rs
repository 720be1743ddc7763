//! Transit feed normalizer.
//!
//! Takes a parsed schedule feed and produces a canonical one: stable
//! numeric route ids, cleaned labels, classified trip directions and stop
//! sequences corrected against hand-curated reference paths.

pub mod classify;
pub mod config;
pub mod domain;
pub mod feed;
pub mod normalize;
pub mod reconcile;
pub mod routes;
pub mod rules;
pub mod text;
