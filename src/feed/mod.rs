//! Feed adapters: typed snapshot schemas and validation into domain quotes.
//!
//! The core never performs I/O beyond reading these snapshot files; live
//! transports are external collaborators with the same data shapes.
//! Absent or malformed fields become per-record skip reasons at ingestion
//! instead of ad hoc defaults scattered downstream.

pub mod exchange;
pub mod results;
pub mod sportsbook;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{Quote, SkippedQuote};
use crate::error::FeedError;

/// Quotes produced from one snapshot, plus every record that was dropped.
#[derive(Debug, Default)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    pub skipped: Vec<SkippedQuote>,
}

pub(crate) fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| FeedError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
