//! Feed and rule file loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a feed snapshot or a rules file.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// File could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not the expected JSON shape
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Rules file parsed but describes an inconsistent rule
    #[error("invalid rule for route {route}: {message}")]
    InvalidRule { route: i64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::InvalidRule {
            route: 3,
            message: "direction east is not in the pair".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid rule for route 3: direction east is not in the pair"
        );

        let err = FeedError::Io {
            path: PathBuf::from("feed.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("I/O error on feed.json"));
    }
}
