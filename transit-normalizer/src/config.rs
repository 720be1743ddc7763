//! Batch driver configuration.

use std::path::{Path, PathBuf};

/// Environment variable naming the feed snapshot JSON file.
pub const FEED_SNAPSHOT_VAR: &str = "FEED_SNAPSHOT";
/// Environment variable naming an optional rules JSON file.
pub const FEED_RULES_VAR: &str = "FEED_RULES";
/// Environment variable naming an optional output file.
pub const FEED_OUTPUT_VAR: &str = "FEED_OUTPUT";

/// Where the normalizer reads its input and writes its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Feed snapshot to normalize.
    pub feed_path: PathBuf,

    /// Rules file. The built-in Roam Transit rules are used when `None`.
    pub rules_path: Option<PathBuf>,

    /// Output file. Written to stdout when `None`.
    pub output_path: Option<PathBuf>,
}

impl NormalizerConfig {
    /// Create a new configuration with the given paths.
    pub fn new(
        feed_path: impl Into<PathBuf>,
        rules_path: Option<PathBuf>,
        output_path: Option<PathBuf>,
    ) -> Self {
        Self {
            feed_path: feed_path.into(),
            rules_path,
            output_path,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from a variable lookup, falling back to
    /// the defaults for unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            feed_path: var(FEED_SNAPSHOT_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.feed_path),
            rules_path: var(FEED_RULES_VAR).map(PathBuf::from),
            output_path: var(FEED_OUTPUT_VAR).map(PathBuf::from),
        }
    }

    /// Apply command-line arguments: `[feed] [output]`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut args = args.into_iter();
        if let Some(feed) = args.next() {
            self.feed_path = feed.into();
        }
        if let Some(output) = args.next() {
            self.output_path = Some(output.into());
        }
        self
    }

    pub fn feed_path(&self) -> &Path {
        &self.feed_path
    }

    pub fn rules_path(&self) -> Option<&Path> {
        self.rules_path.as_deref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            feed_path: PathBuf::from("feed.json"),
            rules_path: None,
            output_path: None,
        }
    }
}
