//! End-to-end pipeline tests: snapshot files in, ranked opportunities and
//! graded logs out.

use chrono::Utc;
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use fairline::domain::{BetType, MatchConfidence, Outcome, Side};
use fairline::feed::{exchange, results, sportsbook};
use fairline::grading::TiePolicy;
use fairline::lines::LineRules;
use fairline::report::quote_log::{self, QuoteRow};
use fairline::{ev, matcher};

fn write_snapshot(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write snapshot");
    path
}

const EXCHANGE_SNAPSHOT: &str = r#"{
  "markets": [
    {
      "ticker": "KXNFLGAME-25SEP15LACLV-LAC",
      "title": "Will the Los Angeles Chargers win?",
      "status": "active",
      "yes_bid": 46,
      "yes_ask": 48,
      "volume_24h": 1200,
      "open_interest": 800
    },
    {
      "ticker": "KXNFLTOTAL-25SEP15LACLV-44",
      "title": "Combined score over 44 points?",
      "status": "active",
      "yes_bid": 50,
      "yes_ask": 52
    }
  ]
}"#;

const ODDS_SNAPSHOT: &str = r#"[
  {
    "id": "evt-1",
    "away_team": "Los Angeles Chargers",
    "home_team": "Las Vegas Raiders",
    "commence_time": "2025-09-15T20:00:00Z",
    "bookmakers": [
      {
        "key": "draftkings",
        "markets": [
          {
            "key": "h2h",
            "outcomes": [
              { "name": "Los Angeles Chargers", "price": -110 },
              { "name": "Las Vegas Raiders", "price": -110 }
            ]
          },
          {
            "key": "totals",
            "outcomes": [
              { "name": "Over", "price": -105, "point": 43.5 },
              { "name": "Under", "price": -115, "point": 43.5 }
            ]
          }
        ]
      },
      {
        "key": "fanduel",
        "markets": [
          {
            "key": "h2h",
            "outcomes": [
              { "name": "Los Angeles Chargers", "price": -105 },
              { "name": "Las Vegas Raiders", "price": -115 }
            ]
          }
        ]
      }
    ]
  }
]"#;

const RESULTS_SNAPSHOT: &str = r#"[
  {
    "away_team": "Los Angeles Chargers",
    "home_team": "Las Vegas Raiders",
    "away_score": 27,
    "home_score": 20,
    "status": "STATUS_FINAL"
  }
]"#;

#[test]
fn snapshots_flow_to_ranked_opportunities() {
    let dir = TempDir::new().unwrap();
    let exchange_path = write_snapshot(&dir, "exchange.json", EXCHANGE_SNAPSHOT);
    let odds_path = write_snapshot(&dir, "odds.json", ODDS_SNAPSHOT);
    let now = Utc::now();

    let exchange_batch =
        exchange::normalize(&exchange::load_snapshot(&exchange_path).unwrap(), now);
    let book_batch = sportsbook::normalize(&sportsbook::load_snapshot(&odds_path).unwrap(), now);

    // 1 moneyline + over/under pair from the total market
    assert_eq!(exchange_batch.quotes.len(), 3);
    assert!(exchange_batch.skipped.is_empty());
    // draftkings h2h (2) + totals (2), fanduel h2h (2)
    assert_eq!(book_batch.quotes.len(), 6);

    let report = matcher::match_all(
        &exchange_batch.quotes,
        &book_batch.quotes,
        &LineRules::default(),
    );
    assert!(report.skipped.is_empty());

    // Moneyline matches both bookmakers separately; the total's over and
    // under sides each match draftkings at the converted 43.5 line.
    assert_eq!(report.pairs.len(), 4);
    let moneyline_pairs = report
        .pairs
        .iter()
        .filter(|p| p.exchange_quote.bet_type == BetType::Moneyline)
        .count();
    assert_eq!(moneyline_pairs, 2);
    assert!(report
        .pairs
        .iter()
        .all(|p| p.match_confidence == MatchConfidence::Exact));

    let mut opportunities = ev::price_pairs(&report.pairs, dec!(10));
    ev::rank(&mut opportunities);
    assert_eq!(opportunities.len(), 4);

    // 48¢ against a fair -110/-110 coin flip: 2% edge, positive EV.
    let best = &opportunities[0];
    assert_eq!(
        best.pair.exchange_quote.side,
        Side::Team("Los Angeles Chargers".into())
    );
    assert_eq!(best.ev.fair_probability, dec!(0.5));
    assert_eq!(best.ev.edge, dec!(0.02));
    assert_eq!(best.ev.ev_absolute, dec!(0.20));
    assert!(best.ev.is_positive);

    // Ranking is descending by percent EV.
    for window in opportunities.windows(2) {
        assert!(window[0].ev.ev_percent >= window[1].ev.ev_percent);
    }
}

#[test]
fn logged_opportunities_grade_against_final_scores() {
    let dir = TempDir::new().unwrap();
    let exchange_path = write_snapshot(&dir, "exchange.json", EXCHANGE_SNAPSHOT);
    let odds_path = write_snapshot(&dir, "odds.json", ODDS_SNAPSHOT);
    let results_path = write_snapshot(&dir, "results.json", RESULTS_SNAPSHOT);
    let log_path = dir.path().join("quotes.csv");
    let now = Utc::now();

    let exchange_batch =
        exchange::normalize(&exchange::load_snapshot(&exchange_path).unwrap(), now);
    let book_batch = sportsbook::normalize(&sportsbook::load_snapshot(&odds_path).unwrap(), now);
    let report = matcher::match_all(
        &exchange_batch.quotes,
        &book_batch.quotes,
        &LineRules::default(),
    );
    let opportunities = ev::price_pairs(&report.pairs, dec!(10));

    let rows: Vec<QuoteRow> = opportunities.iter().map(QuoteRow::from_opportunity).collect();
    quote_log::append(&log_path, &rows).unwrap();

    let records = results::load_snapshot(&results_path).unwrap();
    let scores = results::final_scores(&records);
    assert_eq!(scores.len(), 1);

    let mut logged = quote_log::read(&log_path).unwrap();
    let graded = quote_log::attach_results(&mut logged, &scores, TiePolicy::default());
    assert_eq!(graded, 4);

    // Chargers won 27-20: both moneyline rows win, 47 points beats the
    // 43.5 over and sinks the under.
    let wins = logged
        .iter()
        .filter(|r| r.outcome == Some(Outcome::Win))
        .count();
    let losses = logged
        .iter()
        .filter(|r| r.outcome == Some(Outcome::Loss))
        .count();
    assert_eq!(wins, 3);
    assert_eq!(losses, 1);

    // Rewritten log round-trips with grades intact.
    quote_log::write(&log_path, &logged).unwrap();
    let reread = quote_log::read(&log_path).unwrap();
    assert!(reread.iter().all(|r| !r.is_pending()));
}

#[test]
fn malformed_records_never_fail_the_batch() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        &dir,
        "exchange.json",
        r#"{
          "markets": [
            {
              "ticker": "KXNFLGAME-25SEP15LACLV-LAC",
              "title": "Will the Los Angeles Chargers win?",
              "status": "active",
              "yes_bid": 46,
              "yes_ask": 48
            },
            {
              "ticker": "KXNFLGAME-25SEP15GBDAL-GB",
              "title": "Will the Green Bay Packers win?",
              "status": "active",
              "yes_bid": 0,
              "yes_ask": 0
            }
          ]
        }"#,
    );

    let batch = exchange::normalize(&exchange::load_snapshot(&path).unwrap(), Utc::now());
    assert_eq!(batch.quotes.len(), 1);
    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].label, "KXNFLGAME-25SEP15GBDAL-GB");
}
