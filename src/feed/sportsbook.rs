//! Sportsbook odds snapshot ingestion.
//!
//! Events arrive as `{id, away_team, home_team, commence_time,
//! bookmakers: [{key, markets: [{key, outcomes: [{name, price, point?}]}]}]}`
//! with American odds. Every two-outcome market has its vig removed at
//! ingestion, so downstream consumers always see both the raw and the
//! fair probability on each quote.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use super::QuoteBatch;
use crate::codec;
use crate::domain::{
    BetType, CanonicalGame, Quote, RawPrice, Side, SkipReason, SkippedQuote, Source,
};
use crate::error::FeedError;
use crate::teams;

#[derive(Debug, Clone, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    pub away_team: String,
    pub home_team: String,
    pub commence_time: DateTime<Utc>,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    #[serde(default)]
    pub markets: Vec<BookMarket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookMarket {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<BookOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookOutcome {
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub point: Option<Decimal>,
}

/// Load a sportsbook odds snapshot file.
///
/// # Errors
///
/// Fails only when the file cannot be read or parsed as a whole.
pub fn load_snapshot(path: &Path) -> Result<Vec<OddsEvent>, FeedError> {
    super::read_snapshot(path)
}

/// Validate and normalize events into quotes with fair probabilities.
///
/// Vig removal needs both sides, so any market without exactly two
/// outcomes is skipped with a recorded reason.
#[must_use]
pub fn normalize(events: &[OddsEvent], collected_at: DateTime<Utc>) -> QuoteBatch {
    let mut batch = QuoteBatch::default();

    for event in events {
        let game_id = canonical_game_id(event);
        for bookmaker in &event.bookmakers {
            for market in &bookmaker.markets {
                let Some(bet_type) = bet_type_for_key(&market.key) else {
                    debug!(market = %market.key, "ignoring unsupported market type");
                    continue;
                };
                if let Err(reason) =
                    normalize_market(event, &game_id, bookmaker, market, bet_type, collected_at, &mut batch)
                {
                    let label = format!("{game_id} {} {}", bookmaker.key, market.key);
                    batch.skipped.push(SkippedQuote::new(label, reason));
                }
            }
        }
    }

    batch
}

/// Prices are a market-level concern (vig removal needs both sides), so
/// an invalid price fails the whole market. Everything past that point
/// is local to the single outcome: a spread outcome without its point is
/// skipped on its own while its sibling still emits, regardless of which
/// side of the market came first.
#[allow(clippy::too_many_arguments)]
fn normalize_market(
    event: &OddsEvent,
    game_id: &str,
    bookmaker: &Bookmaker,
    market: &BookMarket,
    bet_type: BetType,
    collected_at: DateTime<Utc>,
    batch: &mut QuoteBatch,
) -> Result<(), SkipReason> {
    let [first, second] = market.outcomes.as_slice() else {
        return Err(SkipReason::IncompleteMarket);
    };

    let prob_a = codec::american_to_probability(first.price)
        .map_err(|e| SkipReason::InvalidPrice(e.to_string()))?;
    let prob_b = codec::american_to_probability(second.price)
        .map_err(|e| SkipReason::InvalidPrice(e.to_string()))?;
    let fair = codec::remove_vig(prob_a, prob_b)
        .map_err(|e| SkipReason::InvalidPrice(e.to_string()))?;
    if fair.degenerate {
        info!(
            game = %game_id,
            bookmaker = %bookmaker.key,
            market = %market.key,
            "degenerate market: probabilities sum at or below 1, passed through"
        );
    }

    for (outcome, raw, fair_prob) in [
        (first, prob_a, fair.fair_a),
        (second, prob_b, fair.fair_b),
    ] {
        match outcome_quote(event, game_id, bookmaker, bet_type, outcome, raw, fair_prob, collected_at) {
            Ok(quote) => batch.quotes.push(quote),
            Err(reason) => {
                let label = format!(
                    "{game_id} {} {} {}",
                    bookmaker.key, market.key, outcome.name
                );
                batch.skipped.push(SkippedQuote::new(label, reason));
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn outcome_quote(
    event: &OddsEvent,
    game_id: &str,
    bookmaker: &Bookmaker,
    bet_type: BetType,
    outcome: &BookOutcome,
    raw: Decimal,
    fair: Decimal,
    collected_at: DateTime<Utc>,
) -> Result<Quote, SkipReason> {
    let side = outcome_side(outcome, bet_type)?;
    let line_value = match bet_type {
        BetType::Moneyline => None,
        BetType::Spread | BetType::Total => {
            Some(outcome.point.ok_or(SkipReason::MissingLineValue)?)
        }
    };

    Ok(Quote {
        source: Source::Bookmaker(bookmaker.key.clone()),
        game_id: game_id.to_string(),
        away_team: event.away_team.clone(),
        home_team: event.home_team.clone(),
        bet_type,
        side,
        purchase: None,
        line_value,
        price: RawPrice::American(outcome.price),
        implied_probability_raw: raw,
        implied_probability_fair: Some(fair),
        collected_at,
    })
}

fn bet_type_for_key(key: &str) -> Option<BetType> {
    match key {
        "h2h" => Some(BetType::Moneyline),
        "spreads" => Some(BetType::Spread),
        "totals" => Some(BetType::Total),
        _ => None,
    }
}

fn outcome_side(outcome: &BookOutcome, bet_type: BetType) -> Result<Side, SkipReason> {
    match bet_type {
        BetType::Total => {
            if outcome.name.eq_ignore_ascii_case("over") {
                Ok(Side::Over)
            } else if outcome.name.eq_ignore_ascii_case("under") {
                Ok(Side::Under)
            } else {
                Err(SkipReason::IncompleteMarket)
            }
        }
        BetType::Moneyline | BetType::Spread => Ok(Side::Team(outcome.name.clone())),
    }
}

/// Canonical game record for an event whose team names both resolve to
/// table codes. The key uses the exchange's date + away + home scheme so
/// quotes from both sources carry the same `game_id`.
#[must_use]
pub fn canonical_game(event: &OddsEvent) -> Option<CanonicalGame> {
    let away = teams::code_for(&event.away_team)?;
    let home = teams::code_for(&event.home_team)?;
    let date = event
        .commence_time
        .format("%y%b%d")
        .to_string()
        .to_uppercase();
    Some(CanonicalGame {
        game_id: format!("{date}{away}{home}"),
        away_team: event.away_team.clone(),
        home_team: event.home_team.clone(),
        sport: "NFL".to_string(),
        scheduled_time: event.commence_time,
    })
}

/// Cross-source game key, falling back to the feed's own event id when
/// the teams cannot be resolved.
fn canonical_game_id(event: &OddsEvent) -> String {
    canonical_game(event).map_or_else(|| event.id.clone(), |game| game.game_id)
}
