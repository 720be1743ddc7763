//! Stable route identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The deterministic numeric identifier assigned to a route.
///
/// Plain numeric short names map straight to their value; suffixed and
/// specially-named routes live in reserved ranges (see
/// [`crate::routes::RouteResolver`]). Downstream consumers key everything
/// on this value, so it must never change between runs for the same feed.
///
/// # Examples
///
/// ```
/// use transit_normalizer::domain::StableRouteId;
///
/// let id = StableRouteId::new(19_008);
/// assert_eq!(id.get(), 19_008);
/// assert_eq!(id.to_string(), "19008");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StableRouteId(i64);

impl StableRouteId {
    /// Wrap a raw numeric id.
    pub const fn new(id: i64) -> Self {
        StableRouteId(id)
    }

    /// Returns the numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for StableRouteId {
    fn from(id: i64) -> Self {
        StableRouteId(id)
    }
}

impl fmt::Debug for StableRouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StableRouteId({})", self.0)
    }
}

impl fmt::Display for StableRouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(format!("{}", StableRouteId::new(10_981)), "10981");
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", StableRouteId::new(8)),
            "StableRouteId(8)"
        );
    }

    #[test]
    fn ordering_follows_value() {
        assert!(StableRouteId::new(3) < StableRouteId::new(19_008));
        assert_eq!(StableRouteId::from(5), StableRouteId::new(5));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&StableRouteId::new(2005)).unwrap();
        assert_eq!(json, "2005");

        let back: StableRouteId = serde_json::from_str("24008").unwrap();
        assert_eq!(back.get(), 24_008);
    }
}
