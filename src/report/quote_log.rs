//! Append-only CSV log of priced opportunities and their eventual grades.
//!
//! A row is written once when an opportunity is observed and its raw
//! fields are never touched again; grading fills only the trailing
//! `outcome` and `graded_value` columns. Lines are stored in sportsbook
//! convention so rows grade directly against final scores.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::domain::{FinalScore, Outcome, Side};
use crate::error::Result;
use crate::ev::Opportunity;
use crate::grading::{self, TiePolicy};
use crate::teams;

/// One logged opportunity, flattened for CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    pub collected_at: DateTime<Utc>,
    pub game_id: String,
    pub away_team: String,
    pub home_team: String,
    pub bet_type: String,
    pub side: String,
    pub purchase: Option<String>,
    /// Sportsbook-convention line for the logged side.
    pub line: Option<Decimal>,
    pub exchange_cents: i64,
    pub bookmaker: String,
    pub american_odds: Option<i32>,
    pub fair_probability: Decimal,
    pub ev_percent: Decimal,
    pub edge: Decimal,
    pub outcome: Option<Outcome>,
    pub graded_value: Option<u8>,
}

impl QuoteRow {
    #[must_use]
    pub fn from_opportunity(opp: &Opportunity) -> Self {
        let exchange = &opp.pair.exchange_quote;
        let book = &opp.pair.sportsbook_quote;
        Self {
            collected_at: exchange.collected_at,
            game_id: exchange.game_id.clone(),
            away_team: exchange.away_team.clone(),
            home_team: exchange.home_team.clone(),
            bet_type: exchange.bet_type.to_string(),
            side: exchange.side.to_string(),
            purchase: exchange.purchase.map(|p| format!("{p:?}").to_lowercase()),
            line: opp.pair.line_basis,
            exchange_cents: exchange.price.cents().unwrap_or_default(),
            bookmaker: book.source.to_string(),
            american_odds: book.price.american(),
            fair_probability: opp.ev.fair_probability,
            ev_percent: opp.ev.ev_percent,
            edge: opp.ev.edge,
            outcome: None,
            graded_value: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Append rows to the log file, creating it with a header if absent.
///
/// # Errors
///
/// Fails on file or serialization errors.
pub fn append(path: &Path, rows: &[QuoteRow]) -> Result<()> {
    super::append_rows(path, rows)
}

/// Rewrite the whole log, used after grading fills outcome columns.
///
/// # Errors
///
/// Fails on file or serialization errors.
pub fn write(path: &Path, rows: &[QuoteRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(crate::error::Error::from)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read the full log back.
///
/// # Errors
///
/// Fails on file or deserialization errors.
pub fn read(path: &Path) -> Result<Vec<QuoteRow>> {
    let mut reader = csv::Reader::from_path(path).map_err(crate::error::Error::from)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Grade every pending row whose game has a final score. Rows without a
/// matching score, or that cannot be graded, stay pending. Returns the
/// number of rows graded this pass.
pub fn attach_results(rows: &mut [QuoteRow], scores: &[FinalScore], policy: TiePolicy) -> usize {
    let mut graded = 0;
    for row in rows.iter_mut().filter(|r| r.is_pending()) {
        let Some(score) = find_score(row, scores) else {
            continue;
        };
        match grade_row(row, score, policy) {
            Ok(outcome) => {
                row.outcome = Some(outcome);
                row.graded_value = outcome.graded_value();
                graded += 1;
            }
            Err(reason) => {
                debug!(game = %row.game_id, side = %row.side, %reason, "row left pending");
            }
        }
    }
    graded
}

fn find_score<'a>(row: &QuoteRow, scores: &'a [FinalScore]) -> Option<&'a FinalScore> {
    scores.iter().find(|s| {
        names_match(&row.away_team, &s.away_team) && names_match(&row.home_team, &s.home_team)
    })
}

fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || teams::fuzzy_side_match(a, b)
}

fn grade_row(
    row: &QuoteRow,
    score: &FinalScore,
    policy: TiePolicy,
) -> std::result::Result<Outcome, crate::domain::SkipReason> {
    use crate::domain::SkipReason;

    match row.bet_type.as_str() {
        "moneyline" => grading::grade_moneyline(&row.side, score, policy),
        "spread" => {
            let line = row.line.ok_or(SkipReason::MissingLineValue)?;
            grading::grade_spread(&row.side, line, score)
        }
        "total" => {
            let line = row.line.ok_or(SkipReason::MissingLineValue)?;
            let side = if row.side.eq_ignore_ascii_case("over") {
                Side::Over
            } else if row.side.eq_ignore_ascii_case("under") {
                Side::Under
            } else {
                return Err(SkipReason::UnresolvedTeams);
            };
            grading::grade_total(&side, line, score)
        }
        _ => Err(SkipReason::UnresolvedTeams),
    }
}
