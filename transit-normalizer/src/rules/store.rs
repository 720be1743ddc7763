//! Per-route rule store.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Direction, DirectionPair, StableRouteId};
use crate::feed::{FeedError, read_json};

use super::file::RulesFile;
use super::spec::RouteTripSpec;

/// Everything the classifier and reconciler know about one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// The route's two operative directions; feed flags index into it.
    pub pair: DirectionPair,
    /// Exact headsign text → direction, for trips without a flag.
    pub headsigns: HashMap<String, Direction>,
    /// Canonical paths; `None` routes are passed through unsplit.
    pub trip_spec: Option<RouteTripSpec>,
}

impl RouteRule {
    pub fn new(pair: DirectionPair) -> Self {
        Self {
            pair,
            headsigns: HashMap::new(),
            trip_spec: None,
        }
    }

    /// Register an observed headsign.
    pub fn headsign(mut self, text: &str, direction: Direction) -> Self {
        self.headsigns.insert(text.to_string(), direction);
        self
    }

    /// Attach canonical paths.
    pub fn trip_spec(mut self, spec: RouteTripSpec) -> Self {
        self.trip_spec = Some(spec);
        self
    }

    /// Check the rule is internally consistent.
    fn validate(&self, id: StableRouteId) -> Result<(), FeedError> {
        let invalid = |message: String| FeedError::InvalidRule {
            route: id.get(),
            message,
        };

        if self.pair.first == self.pair.second {
            return Err(invalid(format!(
                "direction pair repeats {}",
                self.pair.first
            )));
        }

        for (text, direction) in &self.headsigns {
            if !self.pair.contains(*direction) {
                return Err(invalid(format!(
                    "headsign {text:?} maps to {direction}, which is not in the pair"
                )));
            }
        }

        if let Some(spec) = &self.trip_spec {
            if spec.first.direction != self.pair.first || spec.second.direction != self.pair.second
            {
                return Err(invalid(
                    "trip spec directions differ from the direction pair".to_string(),
                ));
            }
            for dir in spec.directions() {
                if dir.sequence.hard_count() < 2 {
                    return Err(invalid(format!(
                        "{} sequence needs at least two hard stops",
                        dir.direction
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Read-only rule table keyed by stable route id.
///
/// Built once before any trip is processed and only borrowed afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteRules {
    rules: HashMap<StableRouteId, RouteRule>,
}

impl RouteRules {
    /// Start building a rule table.
    pub fn builder() -> RouteRulesBuilder {
        RouteRulesBuilder::default()
    }

    /// Parse a rule table from JSON text.
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        let file: RulesFile = serde_json::from_str(text).map_err(|source| FeedError::Json {
            path: "<rules>".into(),
            source,
        })?;
        file.into_rules()
    }

    /// Load a rule table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        let file: RulesFile = read_json(path)?;
        file.into_rules()
    }

    pub fn get(&self, id: StableRouteId) -> Option<&RouteRule> {
        self.rules.get(&id)
    }

    /// The trip spec for a route, if it has canonical paths.
    pub fn trip_spec(&self, id: StableRouteId) -> Option<&RouteTripSpec> {
        self.get(id).and_then(|rule| rule.trip_spec.as_ref())
    }

    /// Route ids with rules, ascending.
    pub fn route_ids(&self) -> Vec<StableRouteId> {
        let mut ids: Vec<_> = self.rules.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for [`RouteRules`].
#[derive(Debug, Default)]
pub struct RouteRulesBuilder {
    rules: Vec<(StableRouteId, RouteRule)>,
}

impl RouteRulesBuilder {
    /// Add the rule for a route.
    pub fn add(mut self, id: i64, rule: RouteRule) -> Self {
        self.rules.push((StableRouteId::new(id), rule));
        self
    }

    /// Validate every rule and build the table.
    ///
    /// Fails on inconsistent rules and on a route added twice.
    pub fn build(self) -> Result<RouteRules, FeedError> {
        let mut rules = HashMap::with_capacity(self.rules.len());
        for (id, rule) in self.rules {
            rule.validate(id)?;
            if rules.insert(id, rule).is_some() {
                return Err(FeedError::InvalidRule {
                    route: id.get(),
                    message: "route has more than one rule".to_string(),
                });
            }
        }
        Ok(RouteRules { rules })
    }
}
