//! Final scores and graded bet outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which team won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Away,
    Home,
    /// Regulation tie. Possible in some sports; moneyline grading policy
    /// for ties is explicit, never silent (see `grading`).
    Tie,
}

/// Final score of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub away_team: String,
    pub home_team: String,
    pub away_score: i64,
    pub home_score: i64,
}

impl FinalScore {
    #[must_use]
    pub fn winner(&self) -> Winner {
        match self.away_score.cmp(&self.home_score) {
            std::cmp::Ordering::Greater => Winner::Away,
            std::cmp::Ordering::Less => Winner::Home,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    /// Winning team's name, `None` on a tie.
    #[must_use]
    pub fn winning_team(&self) -> Option<&str> {
        match self.winner() {
            Winner::Away => Some(&self.away_team),
            Winner::Home => Some(&self.home_team),
            Winner::Tie => None,
        }
    }

    /// Margin of victory from the away team's perspective.
    #[must_use]
    pub fn margin(&self) -> i64 {
        self.away_score - self.home_score
    }

    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.away_score + self.home_score
    }
}

/// Outcome of one quote against the final score.
///
/// A push is a first-class state: exact equality against a line is never
/// coerced to a win or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    /// Calibration value: 1 for a win, 0 for a loss, none for a push.
    #[must_use]
    pub fn graded_value(&self) -> Option<u8> {
        match self {
            Self::Win => Some(1),
            Self::Loss => Some(0),
            Self::Push => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Push => write!(f, "push"),
        }
    }
}

/// Terminal grading record attached to a quote once its game is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedResult {
    /// Winning team name, `None` on a tie.
    pub winning_side: Option<String>,
    /// Margin from the away team's perspective.
    pub margin: i64,
    pub total_points: i64,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(away: i64, home: i64) -> FinalScore {
        FinalScore {
            away_team: "Kansas City Chiefs".into(),
            home_team: "Denver Broncos".into(),
            away_score: away,
            home_score: home,
        }
    }

    #[test]
    fn winner_and_margin() {
        let s = score(24, 17);
        assert_eq!(s.winner(), Winner::Away);
        assert_eq!(s.winning_team(), Some("Kansas City Chiefs"));
        assert_eq!(s.margin(), 7);
        assert_eq!(s.total_points(), 41);
    }

    #[test]
    fn tie_has_no_winning_team() {
        let s = score(20, 20);
        assert_eq!(s.winner(), Winner::Tie);
        assert_eq!(s.winning_team(), None);
    }

    #[test]
    fn push_has_no_graded_value() {
        assert_eq!(Outcome::Win.graded_value(), Some(1));
        assert_eq!(Outcome::Loss.graded_value(), Some(0));
        assert_eq!(Outcome::Push.graded_value(), None);
    }
}
