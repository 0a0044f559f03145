//! Source-agnostic domain types.
//!
//! - [`quote`] - One priced side of one bet, plus the canonical game record
//! - [`matched`] - Exchange/sportsbook quote pairs and per-quote skip reasons
//! - [`outcome`] - Final scores and graded bet outcomes

pub mod matched;
pub mod outcome;
pub mod quote;

pub use matched::{MatchConfidence, MatchedPair, SkipReason, SkippedQuote};
pub use outcome::{FinalScore, GradedResult, Outcome, Winner};
pub use quote::{BetType, CanonicalGame, Purchase, Quote, RawPrice, Side, Source};
