//! Quote and game records shared by every pipeline stage.
//!
//! A [`Quote`] is one priced side of one bet as collected from a source.
//! Quotes are append-only: once created they are never mutated, and every
//! derived figure (fair probability, EV, grade) lives in its own record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a quote was collected from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The event-contract exchange (prices in cents on the dollar).
    Exchange,
    /// A sportsbook, identified by the odds feed's bookmaker key.
    Bookmaker(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exchange => write!(f, "exchange"),
            Self::Bookmaker(key) => write!(f, "{key}"),
        }
    }
}

/// The three supported wager types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Moneyline,
    Spread,
    Total,
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moneyline => write!(f, "moneyline"),
            Self::Spread => write!(f, "spread"),
            Self::Total => write!(f, "total"),
        }
    }
}

/// Which outcome of the bet this quote prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// A team winning (moneyline) or covering (spread).
    Team(String),
    /// Combined score over the line.
    Over,
    /// Combined score under the line.
    Under,
}

impl Side {
    /// Team name for team-sided quotes.
    #[must_use]
    pub fn team(&self) -> Option<&str> {
        match self {
            Self::Team(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team(name) => write!(f, "{name}"),
            Self::Over => write!(f, "over"),
            Self::Under => write!(f, "under"),
        }
    }
}

/// Exchange contract direction.
///
/// A "no" purchase on a threshold market inverts the bet: "no" on
/// "wins by over 4.5" is the other team plus the points, and "no" on an
/// over-line is the under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purchase {
    Yes,
    No,
}

/// The price as quoted by the source, before any conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawPrice {
    /// Signed American odds (+150 underdog, -150 favorite).
    American(i32),
    /// Exchange contract cost in cents on the dollar, 1..=99.
    Cents(i64),
}

impl RawPrice {
    #[must_use]
    pub fn cents(&self) -> Option<i64> {
        match self {
            Self::Cents(c) => Some(*c),
            Self::American(_) => None,
        }
    }

    #[must_use]
    pub fn american(&self) -> Option<i32> {
        match self {
            Self::American(odds) => Some(*odds),
            Self::Cents(_) => None,
        }
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::American(odds) => write!(f, "{odds:+}"),
            Self::Cents(cents) => write!(f, "{cents}¢"),
        }
    }
}

/// One priced side of one bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub source: Source,
    /// Canonical game key (date + away + home codes).
    pub game_id: String,
    pub away_team: String,
    pub home_team: String,
    pub bet_type: BetType,
    pub side: Side,
    /// Set for exchange quotes only; sportsbook quotes have no yes/no axis.
    pub purchase: Option<Purchase>,
    /// Threshold or handicap line. `None` for moneylines; a spread/total
    /// quote without one is malformed and is skipped, not processed.
    pub line_value: Option<Decimal>,
    pub price: RawPrice,
    /// Vig-included implied probability.
    pub implied_probability_raw: Decimal,
    /// Vig-removed probability. `None` until both sides of the market were
    /// available for the computation.
    pub implied_probability_fair: Option<Decimal>,
    pub collected_at: DateTime<Utc>,
}

impl Quote {
    /// Short human label used in logs and skip reports.
    #[must_use]
    pub fn label(&self) -> String {
        match self.line_value {
            Some(line) => format!("{} {} {} @ {}", self.game_id, self.bet_type, self.side, line),
            None => format!("{} {} {}", self.game_id, self.bet_type, self.side),
        }
    }
}

/// A real-world contest, exactly one per game across all sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalGame {
    pub game_id: String,
    pub away_team: String,
    pub home_team: String,
    pub sport: String,
    pub scheduled_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn raw_price_accessors() {
        assert_eq!(RawPrice::Cents(48).cents(), Some(48));
        assert_eq!(RawPrice::Cents(48).american(), None);
        assert_eq!(RawPrice::American(-110).american(), Some(-110));
        assert_eq!(RawPrice::American(-110).cents(), None);
    }

    #[test]
    fn raw_price_display() {
        assert_eq!(RawPrice::American(150).to_string(), "+150");
        assert_eq!(RawPrice::American(-110).to_string(), "-110");
        assert_eq!(RawPrice::Cents(48).to_string(), "48¢");
    }

    #[test]
    fn quote_label_includes_line_when_present() {
        let quote = Quote {
            source: Source::Exchange,
            game_id: "25SEP15LACLV".into(),
            away_team: "Los Angeles Chargers".into(),
            home_team: "Las Vegas Raiders".into(),
            bet_type: BetType::Total,
            side: Side::Over,
            purchase: Some(Purchase::Yes),
            line_value: Some(dec!(44)),
            price: RawPrice::Cents(52),
            implied_probability_raw: dec!(0.52),
            implied_probability_fair: None,
            collected_at: Utc::now(),
        };

        assert_eq!(quote.label(), "25SEP15LACLV total over @ 44");
    }
}
