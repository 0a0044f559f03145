//! Fairline - expected-value analysis of event-contract prices against
//! sportsbook odds.
//!
//! The pipeline is a pure batch computation over two snapshots:
//!
//! 1. [`feed`] - Load and validate exchange and sportsbook snapshots into
//!    normalized [`domain::Quote`]s; malformed records become per-quote
//!    skip reasons, never batch failures.
//! 2. [`matcher`] - Pair each exchange quote with every sportsbook quote
//!    for the identical bet, exact on converted lines.
//! 3. [`ev`] - Price each pair: contract cost vs vig-removed fair
//!    probability, ranked by percent EV.
//! 4. [`grading`] / [`report`] - Settle logged quotes once games finish.
//!
//! # Modules
//!
//! - [`codec`] - American odds, exchange cents and probability conversions
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Quotes, matched pairs, outcomes
//! - [`error`] - Error types for the crate
//! - [`lines`] - Exchange threshold to sportsbook line conversion
//! - [`teams`] - Team code table, event-code parsing, fuzzy name matching

pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod ev;
pub mod feed;
pub mod grading;
pub mod lines;
pub mod matcher;
pub mod report;
pub mod teams;

pub use error::{Error, Result};
