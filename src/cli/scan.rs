//! The `scan` command: one pass over a pair of snapshots.

use chrono::Utc;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use crate::cli::{output, ScanArgs};
use crate::config::Config;
use crate::domain::SkippedQuote;
use crate::error::Result;
use crate::ev::{self, Opportunity};
use crate::feed;
use crate::matcher;
use crate::report::quote_log::{self, QuoteRow};

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Bet")]
    bet: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Fair")]
    fair: String,
    #[tabled(rename = "EV%")]
    ev_percent: String,
    #[tabled(rename = "Edge")]
    edge: String,
}

impl OpportunityRow {
    fn from(opp: &Opportunity) -> Self {
        let exchange = &opp.pair.exchange_quote;
        let book = &opp.pair.sportsbook_quote;
        Self {
            game: exchange.game_id.clone(),
            bet: exchange.bet_type.to_string(),
            side: exchange.side.to_string(),
            line: opp
                .pair
                .line_basis
                .map_or_else(|| "-".into(), |l| l.to_string()),
            price: exchange.price.to_string(),
            book: book.source.to_string(),
            odds: book.price.to_string(),
            fair: format!("{:.3}", opp.ev.fair_probability),
            ev_percent: output::ev_cell(
                &format!("{:+.2}%", opp.ev.ev_percent),
                opp.ev.is_positive,
            ),
            edge: format!("{:+.3}", opp.ev.edge),
        }
    }
}

pub fn execute(args: &ScanArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let bet_amount = args.bet.unwrap_or(config.scan.bet_amount);
    let opportunities = run_pipeline(&args.exchange, &args.odds, &config, bet_amount)?;

    let visible: Vec<&Opportunity> = opportunities
        .iter()
        .filter(|o| args.all || o.ev.is_positive)
        .collect();

    output::section("Opportunities");
    if visible.is_empty() {
        output::note("No opportunities found.");
    } else {
        let rows: Vec<OpportunityRow> = visible.iter().map(|o| OpportunityRow::from(o)).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{table}");
    }
    output::key_value("Bet amount", format!("${bet_amount}"));
    output::key_value("Positive EV", visible.iter().filter(|o| o.ev.is_positive).count());

    if let Some(log_path) = &args.log {
        let rows: Vec<QuoteRow> = opportunities.iter().map(QuoteRow::from_opportunity).collect();
        quote_log::append(log_path, &rows)?;
        output::ok(&format!(
            "logged {} opportunities to {}",
            rows.len(),
            log_path.display()
        ));
    }

    Ok(())
}

/// Load, normalize, match and price both snapshots. Shared with `paper`.
pub(crate) fn run_pipeline(
    exchange_path: &std::path::Path,
    odds_path: &std::path::Path,
    config: &Config,
    bet_amount: Decimal,
) -> Result<Vec<Opportunity>> {
    let now = Utc::now();

    let exchange_snapshot = feed::exchange::load_snapshot(exchange_path)?;
    let exchange_batch = feed::exchange::normalize(&exchange_snapshot, now);

    let odds_events = feed::sportsbook::load_snapshot(odds_path)?;
    let book_batch = feed::sportsbook::normalize(&odds_events, now);

    info!(
        exchange_quotes = exchange_batch.quotes.len(),
        sportsbook_quotes = book_batch.quotes.len(),
        "snapshots normalized"
    );

    let report = matcher::match_all(
        &exchange_batch.quotes,
        &book_batch.quotes,
        &config.lines.rules(),
    );

    report_skips(&exchange_batch.skipped);
    report_skips(&book_batch.skipped);
    report_skips(&report.skipped);

    let mut opportunities = ev::price_pairs(&report.pairs, bet_amount);
    ev::rank(&mut opportunities);
    Ok(opportunities)
}

fn report_skips(skipped: &[SkippedQuote]) {
    for skip in skipped {
        output::warn(&format!("skipped {}: {}", skip.label, skip.reason));
    }
}
