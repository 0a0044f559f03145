use std::path::PathBuf;

use thiserror::Error;

/// Probability codec errors with structured variants.
///
/// These are fatal to a single quote's processing only: the quote is
/// excluded from matching, never retried, and the batch continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("American odds of zero are undefined")]
    InvalidOdds,

    #[error("exchange price {cents}¢ outside valid range 1..=99")]
    InvalidPrice { cents: i64 },

    #[error("probability {value} outside open interval (0, 1)")]
    ProbabilityOutOfRange { value: String },

    #[error("cannot average an empty odds list")]
    EmptyOddsList,
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while loading a feed snapshot.
///
/// Malformed individual records inside a snapshot are not errors; they
/// become per-quote skip reasons and the rest of the batch proceeds.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read snapshot {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
