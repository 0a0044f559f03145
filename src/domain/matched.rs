//! Matched pairs and per-quote skip accounting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quote::Quote;

/// How the team sides of a pair were judged identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchConfidence {
    /// Both sides resolved through the abbreviation table.
    Exact,
    /// Matched by nickname substring; permissive, may over-match.
    FuzzyTeamName,
}

/// One exchange quote paired with one sportsbook quote representing the
/// identical bet.
///
/// Line equality is exact (no tolerance) after conversion; only the team
/// naming may be fuzzy. A single exchange quote can appear in several
/// pairs, one per bookmaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPair {
    pub exchange_quote: Quote,
    pub sportsbook_quote: Quote,
    /// The line in sportsbook convention that both quotes were reduced to.
    /// `None` for moneylines.
    pub line_basis: Option<Decimal>,
    pub match_confidence: MatchConfidence,
}

/// Why a quote was excluded from matching.
///
/// All of these are local to the single quote; the batch always completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Spread/total quote without a numeric line.
    MissingLineValue,
    /// Neither team token resolved; only fuzzy matching was available and
    /// it found nothing authoritative.
    UnresolvedTeams,
    /// Price failed codec validation (zero odds or out-of-range cents).
    InvalidPrice(String),
    /// Market did not carry exactly two outcomes, so vig removal was
    /// impossible.
    IncompleteMarket,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLineValue => write!(f, "missing line value"),
            Self::UnresolvedTeams => write!(f, "unresolved team tokens"),
            Self::InvalidPrice(detail) => write!(f, "invalid price: {detail}"),
            Self::IncompleteMarket => write!(f, "market lacks two outcomes"),
        }
    }
}

/// A quote that was dropped from a batch, with the reason recorded for
/// operator review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedQuote {
    /// Label of the offending quote or raw record.
    pub label: String,
    pub reason: SkipReason,
}

impl SkippedQuote {
    #[must_use]
    pub fn new(label: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            label: label.into(),
            reason,
        }
    }
}
