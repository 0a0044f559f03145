//! Grading quotes against final scores.
//!
//! A quote moves `pending → graded` exactly once; grading never mutates
//! the quote, it produces a separate [`GradedResult`]. Spread and total
//! grading expects lines in sportsbook convention — exchange thresholds
//! must be converted (the matcher's `line_basis`) before grading.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BetType, FinalScore, GradedResult, Outcome, Quote, Side, SkipReason, Winner};
use crate::teams;

/// How a regulation tie grades a moneyline quote.
///
/// The source convention was never settled, so the policy is explicit.
/// The default grades a tie as a loss for both sides; sports that settle
/// ties as no-action can select [`TiePolicy::Push`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiePolicy {
    #[default]
    LossForBoth,
    Push,
}

/// Grade one quote against a final score.
///
/// # Errors
///
/// Returns [`SkipReason::MissingLineValue`] for a spread/total quote
/// without a line, and [`SkipReason::UnresolvedTeams`] when the quote's
/// team side cannot be mapped onto either team in the score.
pub fn grade_quote(
    quote: &Quote,
    score: &FinalScore,
    policy: TiePolicy,
) -> Result<GradedResult, SkipReason> {
    let outcome = match quote.bet_type {
        BetType::Moneyline => {
            let team = team_side(quote)?;
            grade_moneyline(team, score, policy)?
        }
        BetType::Spread => {
            let team = team_side(quote)?;
            let line = quote.line_value.ok_or(SkipReason::MissingLineValue)?;
            grade_spread(team, line, score)?
        }
        BetType::Total => {
            let line = quote.line_value.ok_or(SkipReason::MissingLineValue)?;
            grade_total(&quote.side, line, score)?
        }
    };

    Ok(GradedResult {
        winning_side: score.winning_team().map(str::to_string),
        margin: score.margin(),
        total_points: score.total_points(),
        outcome,
    })
}

/// Moneyline: win if the side is the actual winner; ties grade per policy.
pub fn grade_moneyline(
    team: &str,
    score: &FinalScore,
    policy: TiePolicy,
) -> Result<Outcome, SkipReason> {
    // Validate the team actually belongs to this game before grading.
    locate_team(team, score)?;
    match score.winner() {
        Winner::Tie => Ok(match policy {
            TiePolicy::LossForBoth => Outcome::Loss,
            TiePolicy::Push => Outcome::Push,
        }),
        _ => {
            let winner = score.winning_team().unwrap_or_default();
            if names_match(team, winner) {
                Ok(Outcome::Win)
            } else {
                Ok(Outcome::Loss)
            }
        }
    }
}

/// Spread: the team covers when `team_score + line > opponent_score`;
/// exact equality is a push.
pub fn grade_spread(team: &str, line: Decimal, score: &FinalScore) -> Result<Outcome, SkipReason> {
    let (team_score, opponent_score) = locate_team(team, score)?;
    let adjusted = Decimal::from(team_score) + line;
    let opponent = Decimal::from(opponent_score);
    Ok(if adjusted > opponent {
        Outcome::Win
    } else if adjusted == opponent {
        Outcome::Push
    } else {
        Outcome::Loss
    })
}

/// Total: over wins above the line, under wins below it, equality pushes.
pub fn grade_total(side: &Side, line: Decimal, score: &FinalScore) -> Result<Outcome, SkipReason> {
    let total = Decimal::from(score.total_points());
    match side {
        Side::Over => Ok(if total > line {
            Outcome::Win
        } else if total == line {
            Outcome::Push
        } else {
            Outcome::Loss
        }),
        Side::Under => Ok(if total < line {
            Outcome::Win
        } else if total == line {
            Outcome::Push
        } else {
            Outcome::Loss
        }),
        Side::Team(_) => Err(SkipReason::UnresolvedTeams),
    }
}

fn team_side(quote: &Quote) -> Result<&str, SkipReason> {
    quote.side.team().ok_or(SkipReason::UnresolvedTeams)
}

/// (team score, opponent score) for whichever side of the game the name
/// belongs to.
fn locate_team(team: &str, score: &FinalScore) -> Result<(i64, i64), SkipReason> {
    if names_match(team, &score.away_team) {
        Ok((score.away_score, score.home_score))
    } else if names_match(team, &score.home_team) {
        Ok((score.home_score, score.away_score))
    } else {
        Err(SkipReason::UnresolvedTeams)
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || teams::fuzzy_side_match(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn final_score(away: i64, home: i64) -> FinalScore {
        FinalScore {
            away_team: "Kansas City Chiefs".into(),
            home_team: "Denver Broncos".into(),
            away_score: away,
            home_score: home,
        }
    }

    #[test]
    fn moneyline_winner_and_loser() {
        let score = final_score(24, 17);
        assert_eq!(
            grade_moneyline("Kansas City Chiefs", &score, TiePolicy::default()).unwrap(),
            Outcome::Win
        );
        assert_eq!(
            grade_moneyline("Denver Broncos", &score, TiePolicy::default()).unwrap(),
            Outcome::Loss
        );
    }

    #[test]
    fn moneyline_tie_follows_policy() {
        let score = final_score(20, 20);
        assert_eq!(
            grade_moneyline("Kansas City Chiefs", &score, TiePolicy::LossForBoth).unwrap(),
            Outcome::Loss
        );
        assert_eq!(
            grade_moneyline("Denver Broncos", &score, TiePolicy::Push).unwrap(),
            Outcome::Push
        );
    }

    #[test]
    fn spread_cover_and_miss() {
        let score = final_score(24, 17);
        // Chiefs -6.5: 24 - 6.5 > 17 covers
        assert_eq!(
            grade_spread("Kansas City Chiefs", dec!(-6.5), &score).unwrap(),
            Outcome::Win
        );
        // Chiefs -7.5: 24 - 7.5 < 17 misses
        assert_eq!(
            grade_spread("Kansas City Chiefs", dec!(-7.5), &score).unwrap(),
            Outcome::Loss
        );
        // Broncos +7.5 covers from the other side
        assert_eq!(
            grade_spread("Denver Broncos", dec!(7.5), &score).unwrap(),
            Outcome::Win
        );
    }

    #[test]
    fn spread_exact_equality_is_push() {
        let score = final_score(24, 17);
        // 24 - 7 == 17 exactly
        assert_eq!(
            grade_spread("Kansas City Chiefs", dec!(-7), &score).unwrap(),
            Outcome::Push
        );
    }

    #[test]
    fn total_over_under_and_push() {
        let score = final_score(24, 17); // 41 points
        assert_eq!(
            grade_total(&Side::Over, dec!(40.5), &score).unwrap(),
            Outcome::Win
        );
        assert_eq!(
            grade_total(&Side::Under, dec!(40.5), &score).unwrap(),
            Outcome::Loss
        );
        assert_eq!(
            grade_total(&Side::Over, dec!(41), &score).unwrap(),
            Outcome::Push
        );
        assert_eq!(
            grade_total(&Side::Under, dec!(41), &score).unwrap(),
            Outcome::Push
        );
    }

    #[test]
    fn unknown_team_is_a_soft_failure() {
        let score = final_score(24, 17);
        assert_eq!(
            grade_spread("Chicago Bears", dec!(-3), &score),
            Err(SkipReason::UnresolvedTeams)
        );
    }

    #[test]
    fn nickname_resolves_through_fuzzy_path() {
        let score = final_score(24, 17);
        assert_eq!(
            grade_moneyline("Chiefs", &score, TiePolicy::default()).unwrap(),
            Outcome::Win
        );
    }
}
