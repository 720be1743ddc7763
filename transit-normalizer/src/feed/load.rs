//! Reading and writing JSON hand-off files.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::FeedError;
use super::types::FeedSnapshot;

/// Load a feed snapshot written by the feed reader.
pub fn load_snapshot(path: &Path) -> Result<FeedSnapshot, FeedError> {
    read_json(path)
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let text = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| FeedError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON and write it to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FeedError> {
    let text = serde_json::to_string_pretty(value).map_err(|source| FeedError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}
