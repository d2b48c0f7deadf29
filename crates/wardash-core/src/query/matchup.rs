// Head-to-head comparison of two roster totals.

use serde::Serialize;
use std::fmt;

use super::aggregate::{roster_total, RosterSelection};
use super::format_rating;
use crate::dataset::Dataset;

/// Which side of a comparison has the larger total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    A,
    B,
    Tie,
}

/// Outcome of comparing two totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matchup {
    pub winner: Winner,
    /// Absolute difference at full precision.
    pub margin: f64,
}

impl Matchup {
    /// Margin rounded to one decimal place.
    pub fn margin_display(&self) -> String {
        format_rating(self.margin)
    }
}

/// Compare two totals. Only exact equality is a tie.
pub fn compare(sum_a: f64, sum_b: f64) -> Matchup {
    let winner = if sum_a > sum_b {
        Winner::A
    } else if sum_b > sum_a {
        Winner::B
    } else {
        Winner::Tie
    };
    let margin = match winner {
        Winner::Tie => 0.0,
        _ => (sum_a - sum_b).abs(),
    };
    Matchup { winner, margin }
}

/// Both roster totals and the comparison between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupReport {
    pub team_a: String,
    pub team_b: String,
    pub total_a: f64,
    pub total_b: f64,
    pub matchup: Matchup,
}

impl MatchupReport {
    /// Name of the winning team, or `None` on a tie.
    pub fn winning_team(&self) -> Option<&str> {
        match self.matchup.winner {
            Winner::A => Some(self.team_a.as_str()),
            Winner::B => Some(self.team_b.as_str()),
            Winner::Tie => None,
        }
    }
}

impl fmt::Display for MatchupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winning_team() {
            Some(team) => write!(
                f,
                "{} is predicted to win by {} WAR!",
                team,
                self.matchup.margin_display()
            ),
            None => f.write_str("It's a tie!"),
        }
    }
}

/// Total both selections and compare them.
pub fn compare_rosters(dataset: &Dataset, a: &RosterSelection, b: &RosterSelection) -> MatchupReport {
    let total_a = roster_total(dataset, a);
    let total_b = roster_total(dataset, b);
    MatchupReport {
        team_a: a.team.clone(),
        team_b: b.team.clone(),
        total_a,
        total_b,
        matchup: compare(total_a, total_b),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
