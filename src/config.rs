//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; every field has a default so
//! the tool runs without one.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};
use crate::grading::TiePolicy;
use crate::lines::LineRules;
use crate::report::paper::PaperRules;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lines: LinesConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub grading: GradingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Offsets for converting exchange whole-number thresholds to sportsbook
/// half-point lines.
#[derive(Debug, Clone, Deserialize)]
pub struct LinesConfig {
    #[serde(default = "default_line_offset")]
    pub spread_offset: Decimal,
    #[serde(default = "default_line_offset")]
    pub total_offset: Decimal,
}

fn default_line_offset() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

impl LinesConfig {
    #[must_use]
    pub fn rules(&self) -> LineRules {
        LineRules {
            spread_offset: self.spread_offset,
            total_offset: self.total_offset,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Contract payout used to express EV in dollars.
    #[serde(default = "default_bet_amount")]
    pub bet_amount: Decimal,
    /// Minimum percent EV for a paper trade.
    #[serde(default = "default_min_ev_percent")]
    pub min_ev_percent: Decimal,
    /// Payout per paper trade.
    #[serde(default = "default_max_bet_amount")]
    pub max_bet_amount: Decimal,
}

fn default_bet_amount() -> Decimal {
    Decimal::from(10)
}

fn default_min_ev_percent() -> Decimal {
    Decimal::ONE
}

fn default_max_bet_amount() -> Decimal {
    Decimal::from(20)
}

impl ScanConfig {
    #[must_use]
    pub fn paper_rules(&self) -> PaperRules {
        PaperRules {
            bet_amount: self.max_bet_amount,
            min_ev_percent: self.min_ev_percent,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradingConfig {
    /// How a regulation tie grades a moneyline quote.
    #[serde(default)]
    pub tie_policy: TiePolicy,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.scan.bet_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "scan.bet_amount",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.scan.max_bet_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_bet_amount",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.lines.spread_offset < Decimal::ZERO || self.lines.total_offset < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "lines",
                reason: "offsets must not be negative".into(),
            }
            .into());
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("unknown format {other:?}, expected \"pretty\" or \"json\""),
            }
            .into()),
        }
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            lines: LinesConfig::default(),
            scan: ScanConfig::default(),
            grading: GradingConfig::default(),
        }
    }
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self {
            spread_offset: default_line_offset(),
            total_offset: default_line_offset(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bet_amount: default_bet_amount(),
            min_ev_percent: default_min_ev_percent(),
            max_bet_amount: default_max_bet_amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.scan.bet_amount, dec!(10));
        assert_eq!(config.scan.min_ev_percent, dec!(1));
        assert_eq!(config.scan.max_bet_amount, dec!(20));
        assert_eq!(config.lines.spread_offset, dec!(0.5));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.grading.tie_policy, TiePolicy::LossForBoth);
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scan]
            min_ev_percent = 2.0

            [grading]
            tie_policy = "push"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.min_ev_percent, dec!(2.0));
        assert_eq!(config.scan.bet_amount, dec!(10));
        assert_eq!(config.grading.tie_policy, TiePolicy::Push);
    }

    #[test]
    fn rejects_non_positive_bet_amount() {
        let config: Config = toml::from_str(
            r#"
            [scan]
            bet_amount = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            format = "yaml"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
