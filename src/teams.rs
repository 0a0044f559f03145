//! Team and game identity resolution across sources.
//!
//! The exchange names teams with 2-3 letter codes packed into event codes
//! with no delimiter; the odds feed uses full franchise names. Resolution
//! goes through a static table, with an explicit [`TeamToken::Unknown`]
//! sentinel when an event code cannot be split unambiguously. Callers must
//! treat an unresolved token as matchable only through the fuzzy nickname
//! path, never as authoritative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NFL code table. Both LAR and LA appear for the Rams because the
/// exchange and the odds feed disagree on the code.
const TEAM_TABLE: &[(&str, &str)] = &[
    ("ARI", "Arizona Cardinals"),
    ("ATL", "Atlanta Falcons"),
    ("BAL", "Baltimore Ravens"),
    ("BUF", "Buffalo Bills"),
    ("CAR", "Carolina Panthers"),
    ("CHI", "Chicago Bears"),
    ("CIN", "Cincinnati Bengals"),
    ("CLE", "Cleveland Browns"),
    ("DAL", "Dallas Cowboys"),
    ("DEN", "Denver Broncos"),
    ("DET", "Detroit Lions"),
    ("GB", "Green Bay Packers"),
    ("HOU", "Houston Texans"),
    ("IND", "Indianapolis Colts"),
    ("JAC", "Jacksonville Jaguars"),
    ("KC", "Kansas City Chiefs"),
    ("LV", "Las Vegas Raiders"),
    ("LAC", "Los Angeles Chargers"),
    ("LAR", "Los Angeles Rams"),
    ("LA", "Los Angeles Rams"),
    ("MIA", "Miami Dolphins"),
    ("MIN", "Minnesota Vikings"),
    ("NE", "New England Patriots"),
    ("NO", "New Orleans Saints"),
    ("NYG", "New York Giants"),
    ("NYJ", "New York Jets"),
    ("PHI", "Philadelphia Eagles"),
    ("PIT", "Pittsburgh Steelers"),
    ("SF", "San Francisco 49ers"),
    ("SEA", "Seattle Seahawks"),
    ("TB", "Tampa Bay Buccaneers"),
    ("TEN", "Tennessee Titans"),
    ("WAS", "Washington Commanders"),
];

/// Full franchise name for a short code, exact lookup only.
#[must_use]
pub fn full_name(code: &str) -> Option<&'static str> {
    TEAM_TABLE
        .iter()
        .find(|(abbrev, _)| *abbrev == code)
        .map(|(_, name)| *name)
}

/// Resolve a team token to its canonical name, falling back to the token
/// itself when no table entry exists. An unresolved token is only
/// *possibly* matchable downstream via the fuzzy path.
#[must_use]
pub fn resolve(token: &str) -> String {
    full_name(token).map_or_else(|| token.to_string(), str::to_string)
}

/// Short code for a full franchise name, exact lookup only.
#[must_use]
pub fn code_for(name: &str) -> Option<&'static str> {
    TEAM_TABLE
        .iter()
        .find(|(_, full)| *full == name)
        .map(|(code, _)| *code)
}

/// A team reference parsed out of an exchange identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamToken {
    /// Code present in the static table.
    Known(String),
    /// The identifier could not be split unambiguously. Inherent to the
    /// source format (no delimiter between team codes), so it is surfaced
    /// instead of guessed around.
    Unknown,
}

impl TeamToken {
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Known(code) => Some(code),
            Self::Unknown => None,
        }
    }

    /// Canonical full name, or `None` when unknown.
    #[must_use]
    pub fn canonical_name(&self) -> Option<&'static str> {
        self.code().and_then(full_name)
    }
}

impl fmt::Display for TeamToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(code) => write!(f, "{code}"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Parsed exchange event code: date digits plus away/home team tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCode {
    /// Raw date segment, e.g. `25SEP15` (year, month, day).
    pub date: String,
    pub away: TeamToken,
    pub home: TeamToken,
}

impl EventCode {
    /// True when both team tokens resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(
            (&self.away, &self.home),
            (TeamToken::Known(_), TeamToken::Known(_))
        )
    }
}

/// Parse an exchange event identifier like `25SEP15LACLV`.
///
/// The date prefix is two digits, a three-letter month, two digits. The
/// remainder concatenates the away and home codes with no delimiter, so
/// the split is tried 3-letter-away first, then 2-letter-away, accepting
/// only splits where *both* codes are in the table. Anything else yields
/// `Unknown` tokens rather than a best-effort guess.
#[must_use]
pub fn parse_event_code(code: &str) -> Option<EventCode> {
    let bytes = code.as_bytes();
    if bytes.len() < 7 {
        return None;
    }
    let date_ok = bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_uppercase()
        && bytes[3].is_ascii_uppercase()
        && bytes[4].is_ascii_uppercase()
        && bytes[5].is_ascii_digit()
        && bytes[6].is_ascii_digit();
    if !date_ok {
        return None;
    }

    let date = &code[..7];
    let teams_part = &code[7..];
    let (away, home) = split_team_codes(teams_part);

    Some(EventCode {
        date: date.to_string(),
        away,
        home,
    })
}

fn split_team_codes(teams_part: &str) -> (TeamToken, TeamToken) {
    for away_len in [3, 2] {
        if teams_part.len() <= away_len {
            continue;
        }
        let (away, home) = teams_part.split_at(away_len);
        if full_name(away).is_some() && full_name(home).is_some() {
            return (
                TeamToken::Known(away.to_string()),
                TeamToken::Known(home.to_string()),
            );
        }
    }
    (TeamToken::Unknown, TeamToken::Unknown)
}

/// Permissive nickname match for when no abbreviation entry exists: the
/// last word of either name (typically the franchise nickname) as a
/// case-insensitive substring of the other's full team field. May
/// over-match; the abbreviation path is authoritative.
#[must_use]
pub fn fuzzy_side_match(a: &str, b: &str) -> bool {
    nickname_in(a, b) || nickname_in(b, a)
}

fn nickname_in(name: &str, field: &str) -> bool {
    let Some(nickname) = name.split_whitespace().last() else {
        return false;
    };
    field.to_lowercase().contains(&nickname.to_lowercase())
}
