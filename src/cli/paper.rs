//! The `paper` command: scan and record simulated trades.

use chrono::Utc;

use crate::cli::{output, scan, PaperArgs};
use crate::config::Config;
use crate::error::Result;
use crate::report::paper;

pub fn execute(args: &PaperArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let mut rules = config.scan.paper_rules();
    if let Some(min_ev) = args.min_ev {
        rules.min_ev_percent = min_ev;
    }

    let opportunities =
        scan::run_pipeline(&args.exchange, &args.odds, &config, rules.bet_amount)?;

    let now = Utc::now();
    let trades = paper::select_trades(&opportunities, &rules, now);

    output::section("Paper trades");
    if trades.is_empty() {
        output::note(&format!(
            "No opportunities at or above {}% EV.",
            rules.min_ev_percent
        ));
        return Ok(());
    }

    for trade in &trades {
        output::note(&format!(
            "{} {} {} @ {}¢  EV {:+.2}%  risk ${} to win ${}",
            trade.game_id,
            trade.bet_type,
            trade.side,
            trade.exchange_cents,
            trade.ev_percent,
            trade.max_loss,
            trade.max_win,
        ));
    }

    let path = paper::ledger_path(&args.out_dir, now);
    paper::write_ledger(&path, &trades)?;
    output::ok(&format!("{} trades written to {}", trades.len(), path.display()));

    Ok(())
}
