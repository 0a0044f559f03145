//! Diagnostic checks.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Validate a configuration file without running a scan.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::note(&format!("Checking configuration: {}", path.display()));

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    output::section("Summary");
    output::key_value("Log level", &config.logging.level);
    output::key_value("Log format", &config.logging.format);
    output::key_value("Bet amount", format!("${}", config.scan.bet_amount));
    output::key_value("Min EV", format!("{}%", config.scan.min_ev_percent));
    output::key_value("Paper stake", format!("${}", config.scan.max_bet_amount));
    output::key_value("Spread offset", config.lines.spread_offset);
    output::key_value("Total offset", config.lines.total_offset);
    output::key_value("Tie policy", format!("{:?}", config.grading.tie_policy));

    Ok(())
}
