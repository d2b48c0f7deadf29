// Query engine: pure functions over a loaded `Dataset`.
//
// Nothing here holds state between calls. Every user parameter (team,
// exclusions, pitcher selection, position filter, limit) arrives as an
// argument, and query-time oddities (unknown team, stale pitcher, limit out
// of range) degrade to empty or zero results instead of errors.

pub mod aggregate;
pub mod matchup;
pub mod ranking;

pub use aggregate::{
    hitter_names, hitter_records, pitcher_names, pitcher_rating, roster_total, selected_pitcher_rating,
    team_hitter_sum, team_names, RosterSelection, NO_PITCHER,
};
pub use matchup::{compare, compare_rosters, Matchup, MatchupReport, Winner};
pub use ranking::{rank_players, rank_teams, PlayerRanking, TeamRanking};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::dataset::{PlayerRecord, Position};

/// Role filter for rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PositionFilter {
    #[default]
    All,
    Hitter,
    Pitcher,
}

impl PositionFilter {
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Hitter => record.position == Position::Hitter,
            PositionFilter::Pitcher => record.position == Position::Pitcher,
        }
    }

    /// Next filter in the All -> H -> P -> All cycle.
    pub fn next(&self) -> Self {
        match self {
            PositionFilter::All => PositionFilter::Hitter,
            PositionFilter::Hitter => PositionFilter::Pitcher,
            PositionFilter::Pitcher => PositionFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PositionFilter::All => "All",
            PositionFilter::Hitter => "H",
            PositionFilter::Pitcher => "P",
        }
    }
}

impl From<Position> for PositionFilter {
    fn from(position: Position) -> Self {
        match position {
            Position::Hitter => PositionFilter::Hitter,
            Position::Pitcher => PositionFilter::Pitcher,
        }
    }
}

impl fmt::Display for PositionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position filter `{0}` (expected all, h, or p)")]
pub struct ParsePositionFilterError(String);

impl FromStr for PositionFilter {
    type Err = ParsePositionFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(PositionFilter::All),
            "h" | "hitter" | "hitters" => Ok(PositionFilter::Hitter),
            "p" | "pitcher" | "pitchers" => Ok(PositionFilter::Pitcher),
            _ => Err(ParsePositionFilterError(s.to_string())),
        }
    }
}

/// Format a rating for display: one decimal place.
///
/// Display only; the numeric value stays authoritative.
pub fn format_rating(value: f64) -> String {
    format!("{:.1}", value)
}

/// Clamp a requested row count to `[1, available]`. Zero rows available
/// means zero rows returned.
pub(crate) fn clamp_limit(limit: usize, available: usize) -> usize {
    limit.max(1).min(available)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
