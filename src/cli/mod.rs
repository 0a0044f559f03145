//! Command-line interface definitions.

pub mod check;
pub mod grade;
pub mod output;
pub mod paper;
pub mod scan;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Fairline - expected-value scanner for event-contract prices against
/// sportsbook odds.
#[derive(Parser, Debug)]
#[command(name = "fairline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan snapshots for positive-EV contracts
    Scan(ScanArgs),

    /// Scan and record paper trades for qualifying opportunities
    Paper(PaperArgs),

    /// Grade logged quotes against final scores
    Grade(GradeArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `fairline check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to configuration file (defaults apply when absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exchange market snapshot (JSON)
    #[arg(long)]
    pub exchange: PathBuf,

    /// Sportsbook odds snapshot (JSON)
    #[arg(long)]
    pub odds: PathBuf,

    /// Override the contract payout used for EV figures
    #[arg(long)]
    pub bet: Option<Decimal>,

    /// Append priced opportunities to this CSV quote log
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Show negative-EV pairs too
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `paper` subcommand.
#[derive(Parser, Debug)]
pub struct PaperArgs {
    /// Path to configuration file (defaults apply when absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exchange market snapshot (JSON)
    #[arg(long)]
    pub exchange: PathBuf,

    /// Sportsbook odds snapshot (JSON)
    #[arg(long)]
    pub odds: PathBuf,

    /// Directory for the session's trade ledger
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Override the minimum percent EV to take a trade
    #[arg(long)]
    pub min_ev: Option<Decimal>,
}

/// Arguments for the `grade` subcommand.
#[derive(Parser, Debug)]
pub struct GradeArgs {
    /// Path to configuration file (defaults apply when absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV quote log to grade in place
    #[arg(long)]
    pub log: PathBuf,

    /// Final-score snapshot (JSON)
    #[arg(long)]
    pub results: PathBuf,
}
