//! Exchange market snapshot ingestion.
//!
//! Markets arrive as `{ticker, title, status, yes_bid, yes_ask, ...}`.
//! The ticker encodes the series, the event code (date + away + home with
//! no delimiter), and for moneylines the team or for totals the threshold:
//!
//! - `KXNFLGAME-25SEP15LACLV-LAC` — moneyline, Chargers side
//! - `KXNFLSPREAD-25SEP21CINDEN` — spread, line and team in the title
//!   ("Denver wins by over 7.5 points?")
//! - `KXNFLTOTAL-25SEP15LACLV-44` — total, threshold in the ticker
//!
//! Each threshold market yields two quotes: the "yes" side as quoted and
//! the derived "no" side (complement price, inverted direction).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use super::QuoteBatch;
use crate::codec;
use crate::domain::{BetType, Purchase, Quote, RawPrice, Side, SkipReason, SkippedQuote, Source};
use crate::error::FeedError;
use crate::teams::{self, TeamToken};

/// One market as supplied by the exchange feed.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeMarket {
    pub ticker: String,
    pub title: String,
    pub status: String,
    pub yes_bid: i64,
    pub yes_ask: i64,
    #[serde(default)]
    pub volume_24h: i64,
    #[serde(default)]
    pub open_interest: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeSnapshot {
    pub markets: Vec<ExchangeMarket>,
}

/// Load an exchange snapshot file.
///
/// # Errors
///
/// Fails only when the file cannot be read or parsed as a whole.
pub fn load_snapshot(path: &Path) -> Result<ExchangeSnapshot, FeedError> {
    super::read_snapshot(path)
}

/// Validate and normalize a snapshot into quotes.
///
/// Inactive markets are filtered out; malformed records become skip
/// reasons and the rest of the batch proceeds.
#[must_use]
pub fn normalize(snapshot: &ExchangeSnapshot, collected_at: DateTime<Utc>) -> QuoteBatch {
    let mut batch = QuoteBatch::default();

    for market in &snapshot.markets {
        if !market.status.eq_ignore_ascii_case("active") {
            debug!(ticker = %market.ticker, status = %market.status, "skipping inactive market");
            continue;
        }
        if let Err(reason) = normalize_market(market, collected_at, &mut batch) {
            batch
                .skipped
                .push(SkippedQuote::new(market.ticker.clone(), reason));
        }
    }

    batch
}

fn normalize_market(
    market: &ExchangeMarket,
    collected_at: DateTime<Utc>,
    batch: &mut QuoteBatch,
) -> Result<(), SkipReason> {
    let mut segments = market.ticker.split('-');
    let series = segments.next().unwrap_or_default();
    let event = segments.next().unwrap_or_default();
    let trailing = segments.next();

    let bet_type = bet_type_for_series(series);
    let (away_team, home_team, game_id) = resolve_event(event, &market.ticker);

    let yes_ask = validate_cents(market.yes_ask)?;

    match bet_type {
        BetType::Moneyline => {
            // One market per team; only the yes side is a distinct quote.
            let side_token = trailing.ok_or(SkipReason::UnresolvedTeams)?;
            let side = Side::Team(teams::resolve(side_token));
            batch.quotes.push(quote(
                &game_id, &away_team, &home_team, bet_type, side, Purchase::Yes, None, yes_ask,
                collected_at,
            ));
        }
        BetType::Spread => {
            let (title_team, line) =
                parse_spread_title(&market.title).ok_or(SkipReason::MissingLineValue)?;
            let favored = snap_to_game_team(&title_team, &away_team, &home_team);
            let other = opponent_of(&favored, &away_team, &home_team);

            batch.quotes.push(quote(
                &game_id,
                &away_team,
                &home_team,
                bet_type,
                Side::Team(favored),
                Purchase::Yes,
                Some(line),
                yes_ask,
                collected_at,
            ));
            match validate_cents(100 - market.yes_bid) {
                Ok(no_ask) => batch.quotes.push(quote(
                    &game_id,
                    &away_team,
                    &home_team,
                    bet_type,
                    Side::Team(other),
                    Purchase::No,
                    Some(line),
                    no_ask,
                    collected_at,
                )),
                Err(reason) => batch
                    .skipped
                    .push(SkippedQuote::new(no_side_label(&market.ticker), reason)),
            }
        }
        BetType::Total => {
            let line = trailing
                .and_then(|s| s.parse::<Decimal>().ok())
                .ok_or(SkipReason::MissingLineValue)?;

            batch.quotes.push(quote(
                &game_id,
                &away_team,
                &home_team,
                bet_type,
                Side::Over,
                Purchase::Yes,
                Some(line),
                yes_ask,
                collected_at,
            ));
            match validate_cents(100 - market.yes_bid) {
                Ok(no_ask) => batch.quotes.push(quote(
                    &game_id,
                    &away_team,
                    &home_team,
                    bet_type,
                    Side::Under,
                    Purchase::No,
                    Some(line),
                    no_ask,
                    collected_at,
                )),
                Err(reason) => batch
                    .skipped
                    .push(SkippedQuote::new(no_side_label(&market.ticker), reason)),
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn quote(
    game_id: &str,
    away: &str,
    home: &str,
    bet_type: BetType,
    side: Side,
    purchase: Purchase,
    line: Option<Decimal>,
    ask_cents: i64,
    collected_at: DateTime<Utc>,
) -> Quote {
    Quote {
        source: Source::Exchange,
        game_id: game_id.to_string(),
        away_team: away.to_string(),
        home_team: home.to_string(),
        bet_type,
        side,
        purchase: Some(purchase),
        line_value: line,
        price: RawPrice::Cents(ask_cents),
        implied_probability_raw: Decimal::from(ask_cents) / Decimal::ONE_HUNDRED,
        implied_probability_fair: None,
        collected_at,
    }
}

fn bet_type_for_series(series: &str) -> BetType {
    if series.contains("SPREAD") {
        BetType::Spread
    } else if series.contains("TOTAL") {
        BetType::Total
    } else {
        BetType::Moneyline
    }
}

/// Canonical team names and game key for an event code. Unresolvable codes
/// keep the quote flowing (fuzzy matching may still apply downstream) but
/// are logged for operator review.
fn resolve_event(event: &str, ticker: &str) -> (String, String, String) {
    match teams::parse_event_code(event) {
        Some(parsed) if parsed.is_resolved() => {
            let away = parsed
                .away
                .canonical_name()
                .unwrap_or_default()
                .to_string();
            let home = parsed
                .home
                .canonical_name()
                .unwrap_or_default()
                .to_string();
            (away, home, event.to_string())
        }
        _ => {
            warn!(%ticker, "unresolved team codes in event identifier");
            (
                TeamToken::Unknown.to_string(),
                TeamToken::Unknown.to_string(),
                event.to_string(),
            )
        }
    }
}

fn no_side_label(ticker: &str) -> String {
    format!("{ticker} (no side)")
}

fn validate_cents(cents: i64) -> Result<i64, SkipReason> {
    codec::cents_to_probability(cents)
        .map(|_| cents)
        .map_err(|e| SkipReason::InvalidPrice(e.to_string()))
}

/// Pull the favored team and threshold out of a spread title like
/// "Denver wins by over 7.5 points?".
fn parse_spread_title(title: &str) -> Option<(String, Decimal)> {
    let (team, rest) = title.split_once(" wins by over ")?;
    let number = rest.split_whitespace().next()?;
    let line = number
        .trim_end_matches(|c: char| !c.is_ascii_digit())
        .parse::<Decimal>()
        .ok()?;
    Some((team.trim().to_string(), line))
}

/// Snap a title team name onto one of the game's canonical names.
fn snap_to_game_team(title_team: &str, away: &str, home: &str) -> String {
    if teams::fuzzy_side_match(title_team, away) {
        away.to_string()
    } else if teams::fuzzy_side_match(title_team, home) {
        home.to_string()
    } else {
        title_team.to_string()
    }
}

fn opponent_of(team: &str, away: &str, home: &str) -> String {
    if team == away {
        home.to_string()
    } else {
        away.to_string()
    }
}
