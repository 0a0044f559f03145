//! Final-score snapshot ingestion.
//!
//! Only games whose status marks them complete are eligible for grading;
//! everything else stays pending.

use serde::Deserialize;
use std::path::Path;

use crate::domain::FinalScore;
use crate::error::FeedError;

#[derive(Debug, Clone, Deserialize)]
pub struct GameResultRecord {
    pub away_team: String,
    pub home_team: String,
    pub away_score: i64,
    pub home_score: i64,
    pub status: String,
}

impl GameResultRecord {
    /// The scoreboard feed reports `STATUS_FINAL`; other sources say
    /// plain `final`. Anything else means the game is still live.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.status.eq_ignore_ascii_case("STATUS_FINAL") || self.status.eq_ignore_ascii_case("final")
    }
}

/// Load a results snapshot file.
///
/// # Errors
///
/// Fails only when the file cannot be read or parsed as a whole.
pub fn load_snapshot(path: &Path) -> Result<Vec<GameResultRecord>, FeedError> {
    super::read_snapshot(path)
}

/// Final scores from a results snapshot; in-progress games are dropped.
#[must_use]
pub fn final_scores(records: &[GameResultRecord]) -> Vec<FinalScore> {
    records
        .iter()
        .filter(|r| r.is_final())
        .map(|r| FinalScore {
            away_team: r.away_team.clone(),
            home_team: r.home_team.clone(),
            away_score: r.away_score,
            home_score: r.home_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> GameResultRecord {
        GameResultRecord {
            away_team: "Kansas City Chiefs".into(),
            home_team: "Denver Broncos".into(),
            away_score: 24,
            home_score: 17,
            status: status.into(),
        }
    }

    #[test]
    fn only_final_games_survive() {
        let records = vec![
            record("STATUS_FINAL"),
            record("STATUS_IN_PROGRESS"),
            record("final"),
            record("scheduled"),
        ];
        let scores = final_scores(&records);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].away_score, 24);
    }

    #[test]
    fn status_comparison_ignores_case() {
        assert!(record("status_final").is_final());
        assert!(record("Final").is_final());
        assert!(!record("FINALIZING").is_final());
    }
}
