//! Expected-value engine for matched exchange/sportsbook pairs.
//!
//! All figures are recomputed fresh each run from the current quotes;
//! nothing here is a source of truth.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::domain::MatchedPair;
use crate::error::CodecError;

/// Expected value of buying one exchange contract position, priced against
/// the sportsbook fair probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvResult {
    /// Vig-removed probability from the sportsbook side.
    pub fair_probability: Decimal,
    pub exchange_implied_probability: Decimal,
    /// Cost to acquire a `bet_amount` payout at this contract price.
    pub cost: Decimal,
    pub expected_payout: Decimal,
    pub ev_absolute: Decimal,
    /// Percent return on cost; defined as 0 when cost is 0.
    pub ev_percent: Decimal,
    /// Fair probability minus exchange implied probability.
    pub edge: Decimal,
    pub is_positive: bool,
}

/// Compute EV for a contract priced at `exchange_cents` against
/// `fair_probability`, sized to a `bet_amount` payout.
///
/// # Errors
///
/// Invalid cents (outside 1..=99) are rejected; a zero cost never panics,
/// it yields `ev_percent = 0`.
pub fn compute_ev(
    exchange_cents: i64,
    fair_probability: Decimal,
    bet_amount: Decimal,
) -> Result<EvResult, CodecError> {
    let exchange_implied = codec::cents_to_probability(exchange_cents)?;

    let cost = exchange_implied * bet_amount;
    let expected_payout = fair_probability * bet_amount;
    let ev_absolute = expected_payout - cost;
    let ev_percent = if cost.is_zero() {
        Decimal::ZERO
    } else {
        ev_absolute / cost * Decimal::ONE_HUNDRED
    };

    Ok(EvResult {
        fair_probability,
        exchange_implied_probability: exchange_implied,
        cost,
        expected_payout,
        ev_absolute,
        ev_percent,
        edge: fair_probability - exchange_implied,
        is_positive: ev_absolute > Decimal::ZERO,
    })
}

/// A matched pair with its EV figures, ready for ranking and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub pair: MatchedPair,
    pub ev: EvResult,
}

/// Price every matched pair that has both an exchange cents price and a
/// fair sportsbook probability. Pairs missing either are silently not
/// opportunities (the matcher already recorded why quotes were dropped).
#[must_use]
pub fn price_pairs(pairs: &[MatchedPair], bet_amount: Decimal) -> Vec<Opportunity> {
    pairs
        .iter()
        .filter_map(|pair| {
            let cents = pair.exchange_quote.price.cents()?;
            let fair = pair.sportsbook_quote.implied_probability_fair?;
            let ev = compute_ev(cents, fair, bet_amount).ok()?;
            Some(Opportunity {
                pair: pair.clone(),
                ev,
            })
        })
        .collect()
}

/// Sort opportunities descending by percent EV. The sort is stable, so
/// ties keep their input order; no semantic tie-break is defined.
pub fn rank(opportunities: &mut [Opportunity]) {
    opportunities.sort_by(|a, b| b.ev.ev_percent.cmp(&a.ev.ev_percent));
}
