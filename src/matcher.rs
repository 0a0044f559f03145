//! Cross-market matching: pairing one exchange quote with every sportsbook
//! quote that represents the identical bet.
//!
//! Matching is exact on the converted line and permissive only on team
//! naming. Most exchange quotes have no sportsbook counterpart; an empty
//! result is normal, not an error. Per-quote failures (a spread with no
//! line) are recorded and skipped so the batch always completes.

use tracing::debug;

use crate::domain::{
    BetType, MatchConfidence, MatchedPair, Purchase, Quote, Side, SkipReason, SkippedQuote,
};
use crate::lines::{LineMarket, LineRules};
use crate::teams;

/// Outcome of matching a batch: all pairs found plus every quote that was
/// skipped, with its reason.
#[derive(Debug, Default)]
pub struct MatchReport {
    pub pairs: Vec<MatchedPair>,
    pub skipped: Vec<SkippedQuote>,
}

impl MatchReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.skipped.is_empty()
    }
}

/// Match every exchange quote against the sportsbook quote set.
///
/// Matching is independent per game, so quotes for one game never read
/// another game's state.
#[must_use]
pub fn match_all(exchange: &[Quote], sportsbook: &[Quote], rules: &LineRules) -> MatchReport {
    let mut report = MatchReport::default();
    for quote in exchange {
        match match_quote(quote, sportsbook, rules) {
            Ok(pairs) => {
                if pairs.is_empty() {
                    debug!(quote = %quote.label(), "no sportsbook counterpart");
                }
                report.pairs.extend(pairs);
            }
            Err(reason) => {
                debug!(quote = %quote.label(), %reason, "quote skipped");
                report.skipped.push(SkippedQuote::new(quote.label(), reason));
            }
        }
    }
    report
}

/// Find all sportsbook quotes representing the same bet as one exchange
/// quote. Returns one pair per bookmaker, never an average.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the exchange quote itself is unusable;
/// finding nothing is `Ok(vec![])`.
pub fn match_quote(
    exchange: &Quote,
    sportsbook: &[Quote],
    rules: &LineRules,
) -> Result<Vec<MatchedPair>, SkipReason> {
    match exchange.bet_type {
        BetType::Moneyline => Ok(match_moneyline(exchange, sportsbook)),
        BetType::Spread => match_spread(exchange, sportsbook, rules),
        BetType::Total => match_total(exchange, sportsbook, rules),
    }
}

fn match_moneyline(exchange: &Quote, sportsbook: &[Quote]) -> Vec<MatchedPair> {
    sportsbook
        .iter()
        .filter(|book| book.bet_type == BetType::Moneyline)
        .filter_map(|book| {
            let game = same_game(exchange, book)?;
            let side = same_team_side(&exchange.side, &book.side)?;
            Some(MatchedPair {
                exchange_quote: exchange.clone(),
                sportsbook_quote: book.clone(),
                line_basis: None,
                match_confidence: weakest(game, side),
            })
        })
        .collect()
}

fn match_spread(
    exchange: &Quote,
    sportsbook: &[Quote],
    rules: &LineRules,
) -> Result<Vec<MatchedPair>, SkipReason> {
    let threshold = exchange.line_value.ok_or(SkipReason::MissingLineValue)?;
    // Sportsbook quotes carry the handicap from the covering team's view,
    // so the expected line is signed by the purchase direction.
    let purchase = exchange.purchase.unwrap_or(Purchase::Yes);
    let expected = rules.sportsbook_spread(threshold, purchase);

    let pairs = sportsbook
        .iter()
        .filter(|book| book.bet_type == BetType::Spread)
        .filter(|book| book.line_value == Some(expected))
        .filter_map(|book| {
            let game = same_game(exchange, book)?;
            let side = same_team_side(&exchange.side, &book.side)?;
            Some(MatchedPair {
                exchange_quote: exchange.clone(),
                sportsbook_quote: book.clone(),
                line_basis: Some(expected),
                match_confidence: weakest(game, side),
            })
        })
        .collect();
    Ok(pairs)
}

fn match_total(
    exchange: &Quote,
    sportsbook: &[Quote],
    rules: &LineRules,
) -> Result<Vec<MatchedPair>, SkipReason> {
    let threshold = exchange.line_value.ok_or(SkipReason::MissingLineValue)?;
    let expected = rules.exchange_to_sportsbook(threshold, LineMarket::Total);

    let pairs = sportsbook
        .iter()
        .filter(|book| book.bet_type == BetType::Total)
        .filter(|book| book.line_value == Some(expected))
        .filter_map(|book| {
            let game = same_game(exchange, book)?;
            // Over/under direction: the feed already inverted "no"
            // purchases to the under side, so sides compare directly.
            if exchange.side != book.side {
                return None;
            }
            Some(MatchedPair {
                exchange_quote: exchange.clone(),
                sportsbook_quote: book.clone(),
                line_basis: Some(expected),
                match_confidence: game,
            })
        })
        .collect();
    Ok(pairs)
}

/// Same contest check via canonical team names, fuzzy as a fallback.
fn same_game(a: &Quote, b: &Quote) -> Option<MatchConfidence> {
    let away = same_name(&a.away_team, &b.away_team)?;
    let home = same_name(&a.home_team, &b.home_team)?;
    Some(weakest(away, home))
}

fn same_team_side(a: &Side, b: &Side) -> Option<MatchConfidence> {
    match (a, b) {
        (Side::Team(left), Side::Team(right)) => same_name(left, right),
        (Side::Over, Side::Over) | (Side::Under, Side::Under) => Some(MatchConfidence::Exact),
        _ => None,
    }
}

fn same_name(a: &str, b: &str) -> Option<MatchConfidence> {
    if a.eq_ignore_ascii_case(b) {
        Some(MatchConfidence::Exact)
    } else if teams::fuzzy_side_match(a, b) {
        Some(MatchConfidence::FuzzyTeamName)
    } else {
        None
    }
}

fn weakest(a: MatchConfidence, b: MatchConfidence) -> MatchConfidence {
    if a == MatchConfidence::Exact && b == MatchConfidence::Exact {
        MatchConfidence::Exact
    } else {
        MatchConfidence::FuzzyTeamName
    }
}
