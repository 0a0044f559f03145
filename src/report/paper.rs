//! Paper-trade ledgers: simulated stakes on positive-EV opportunities.
//!
//! Every qualifying opportunity gets a flat stake; the ledger records the
//! worst and best case so a session can be settled by grading alone.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ev::Opportunity;

/// Stake sizing and the EV floor a trade must clear.
#[derive(Debug, Clone, Copy)]
pub struct PaperRules {
    /// Contract payout per trade, in dollars.
    pub bet_amount: Decimal,
    /// Minimum percent EV to take a trade.
    pub min_ev_percent: Decimal,
}

/// One simulated trade, flattened for CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperTrade {
    pub placed_at: DateTime<Utc>,
    pub game_id: String,
    pub away_team: String,
    pub home_team: String,
    pub bet_type: String,
    pub side: String,
    pub line: Option<Decimal>,
    pub exchange_cents: i64,
    pub bookmaker: String,
    pub fair_probability: Decimal,
    pub ev_percent: Decimal,
    /// Dollars at risk: the contract cost.
    pub max_loss: Decimal,
    /// Dollars won if the contract settles yes: payout minus cost.
    pub max_win: Decimal,
}

impl PaperTrade {
    fn from_opportunity(opp: &Opportunity, placed_at: DateTime<Utc>) -> Self {
        let exchange = &opp.pair.exchange_quote;
        Self {
            placed_at,
            game_id: exchange.game_id.clone(),
            away_team: exchange.away_team.clone(),
            home_team: exchange.home_team.clone(),
            bet_type: exchange.bet_type.to_string(),
            side: exchange.side.to_string(),
            line: opp.pair.line_basis,
            exchange_cents: exchange.price.cents().unwrap_or_default(),
            bookmaker: opp.pair.sportsbook_quote.source.to_string(),
            fair_probability: opp.ev.fair_probability,
            ev_percent: opp.ev.ev_percent,
            max_loss: opp.ev.cost,
            max_win: Decimal::ZERO,
        }
    }
}

/// Select trades from ranked opportunities and size them.
///
/// Only positive-EV opportunities at or above the configured floor are
/// taken. Each trade stakes the full `bet_amount` payout; `max_loss` is
/// the contract cost and `max_win` is payout minus cost.
#[must_use]
pub fn select_trades(
    opportunities: &[Opportunity],
    rules: &PaperRules,
    placed_at: DateTime<Utc>,
) -> Vec<PaperTrade> {
    opportunities
        .iter()
        .filter(|opp| opp.ev.is_positive && opp.ev.ev_percent >= rules.min_ev_percent)
        .map(|opp| {
            let mut trade = PaperTrade::from_opportunity(opp, placed_at);
            trade.max_win = rules.bet_amount - opp.ev.cost;
            trade
        })
        .collect()
}

/// Ledger filename for a session started at `now`.
#[must_use]
pub fn ledger_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("paper_trades_{}.csv", now.format("%Y%m%d_%H%M")))
}

/// Append trades to a ledger, creating it with a header if absent.
///
/// # Errors
///
/// Fails on file or serialization errors.
pub fn write_ledger(path: &Path, trades: &[PaperTrade]) -> Result<()> {
    super::append_rows(path, trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BetType, MatchConfidence, MatchedPair, Purchase, Quote, RawPrice, Side, Source,
    };
    use crate::ev;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn opportunity(cents: i64, fair: Decimal) -> Opportunity {
        let collected_at = Utc::now();
        let exchange = Quote {
            source: Source::Exchange,
            game_id: "25SEP14KCDEN".into(),
            away_team: "Kansas City Chiefs".into(),
            home_team: "Denver Broncos".into(),
            bet_type: BetType::Moneyline,
            side: Side::Team("Kansas City Chiefs".into()),
            purchase: Some(Purchase::Yes),
            line_value: None,
            price: RawPrice::Cents(cents),
            implied_probability_raw: Decimal::from(cents) / Decimal::ONE_HUNDRED,
            implied_probability_fair: None,
            collected_at,
        };
        let book = Quote {
            source: Source::Bookmaker("draftkings".into()),
            game_id: "25SEP14KCDEN".into(),
            away_team: "Kansas City Chiefs".into(),
            home_team: "Denver Broncos".into(),
            bet_type: BetType::Moneyline,
            side: Side::Team("Kansas City Chiefs".into()),
            purchase: None,
            line_value: None,
            price: RawPrice::American(-110),
            implied_probability_raw: dec!(0.5238),
            implied_probability_fair: Some(fair),
            collected_at,
        };
        let pair = MatchedPair {
            exchange_quote: exchange,
            sportsbook_quote: book,
            line_basis: None,
            match_confidence: MatchConfidence::Exact,
        };
        Opportunity {
            ev: ev::compute_ev(cents, fair, dec!(20)).unwrap(),
            pair,
        }
    }

    fn rules() -> PaperRules {
        PaperRules {
            bet_amount: dec!(20),
            min_ev_percent: dec!(2),
        }
    }

    #[test]
    fn selects_only_positive_ev_above_floor() {
        let opps = vec![
            opportunity(48, dec!(0.5)),  // ~4.2% EV, taken
            opportunity(49, dec!(0.5)),  // ~2.04% EV, taken
            opportunity(50, dec!(0.505)), // 1% EV, below floor
            opportunity(65, dec!(0.5)),  // negative
        ];

        let trades = select_trades(&opps, &rules(), Utc::now());
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].exchange_cents, 48);
    }

    #[test]
    fn stake_figures_sum_to_the_payout() {
        let opps = vec![opportunity(48, dec!(0.5))];
        let trades = select_trades(&opps, &rules(), Utc::now());

        let trade = &trades[0];
        // 48¢ of a $20 payout costs $9.60
        assert_eq!(trade.max_loss, dec!(9.60));
        assert_eq!(trade.max_win, dec!(10.40));
        assert_eq!(trade.max_loss + trade.max_win, dec!(20));
    }

    #[test]
    fn ledger_filename_carries_the_session_stamp() {
        use chrono::TimeZone;
        let now = Utc.with_ymd_and_hms(2025, 9, 14, 13, 5, 0).unwrap();
        let path = ledger_path(Path::new("/tmp"), now);
        assert_eq!(
            path.to_str().unwrap(),
            "/tmp/paper_trades_20250914_1305.csv"
        );
    }

    #[test]
    fn ledger_round_trips_through_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let trades = select_trades(&[opportunity(48, dec!(0.5))], &rules(), Utc::now());

        write_ledger(&path, &trades).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let read: Vec<PaperTrade> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].max_loss, dec!(9.60));
    }
}
