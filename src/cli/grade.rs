//! The `grade` command: settle logged quotes against final scores.

use crate::cli::{output, GradeArgs};
use crate::config::Config;
use crate::domain::Outcome;
use crate::error::Result;
use crate::feed::results;
use crate::report::quote_log;

pub fn execute(args: &GradeArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;

    let records = results::load_snapshot(&args.results)?;
    let scores = results::final_scores(&records);

    let mut rows = quote_log::read(&args.log)?;
    let pending_before = rows.iter().filter(|r| r.is_pending()).count();
    let graded = quote_log::attach_results(&mut rows, &scores, config.grading.tie_policy);
    quote_log::write(&args.log, &rows)?;

    let wins = count(&rows, Outcome::Win);
    let losses = count(&rows, Outcome::Loss);
    let pushes = count(&rows, Outcome::Push);

    output::section("Grading");
    output::key_value("Final scores", scores.len());
    output::key_value("Graded now", graded);
    output::key_value("Still pending", pending_before - graded);
    output::key_value("Record", format!("{wins}-{losses}-{pushes}"));
    output::ok(&format!("log updated: {}", args.log.display()));

    Ok(())
}

fn count(rows: &[quote_log::QuoteRow], outcome: Outcome) -> usize {
    rows.iter().filter(|r| r.outcome == Some(outcome)).count()
}
