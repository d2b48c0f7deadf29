// Per-team aggregates: hitter sums with exclusions, the pitcher bonus, and
// the option lists a selection UI offers for a team.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::dataset::{Dataset, PlayerRecord, Position};

/// Pitcher selection meaning "no pitcher"; contributes nothing to a total.
pub const NO_PITCHER: &str = "Other";

/// One side of a team comparison: the team, the hitters left out, and the
/// optional pitcher whose rating is added on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterSelection {
    pub team: String,
    pub excluded: BTreeSet<String>,
    /// `None` is the "no selection" sentinel.
    pub pitcher: Option<String>,
}

impl RosterSelection {
    pub fn new(team: impl Into<String>) -> Self {
        RosterSelection {
            team: team.into(),
            excluded: BTreeSet::new(),
            pitcher: None,
        }
    }

    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_pitcher(mut self, pitcher: impl Into<String>) -> Self {
        self.pitcher = Some(pitcher.into());
        self
    }

    /// Pitcher name to look up, falling back to the sentinel.
    pub fn pitcher_name(&self) -> &str {
        self.pitcher.as_deref().unwrap_or(NO_PITCHER)
    }
}

/// Sum the ratings of `team`'s hitters, leaving out any whose name is in
/// `excluded`. An unknown team or an all-excluded roster sums to 0.0.
pub fn team_hitter_sum<S>(dataset: &Dataset, team: &str, excluded: &S) -> f64
where
    S: NameSet + ?Sized,
{
    dataset
        .iter()
        .filter(|r| r.team == team && r.position == Position::Hitter)
        .filter(|r| !excluded.contains_name(&r.name))
        .fold(0.0, |acc, r| acc + r.rating)
}

/// Rating of the named pitcher on `team`, or 0.0 for the sentinel or a
/// name that does not match. Duplicate names resolve to the first record.
pub fn pitcher_rating(dataset: &Dataset, team: &str, pitcher_name: &str) -> f64 {
    if pitcher_name == NO_PITCHER {
        return 0.0;
    }
    lookup_pitcher(dataset, team, pitcher_name)
}

fn lookup_pitcher(dataset: &Dataset, team: &str, pitcher_name: &str) -> f64 {
    match dataset
        .iter()
        .find(|r| r.team == team && r.position == Position::Pitcher && r.name == pitcher_name)
    {
        Some(record) => record.rating,
        None => {
            debug!("no pitcher '{}' on team '{}', using 0.0", pitcher_name, team);
            0.0
        }
    }
}

/// Rating of the selection's pitcher, 0.0 when none is selected. A selected
/// pitcher is always looked up by name, even one named like the sentinel.
pub fn selected_pitcher_rating(dataset: &Dataset, selection: &RosterSelection) -> f64 {
    match &selection.pitcher {
        Some(name) => lookup_pitcher(dataset, &selection.team, name),
        None => 0.0,
    }
}

/// Hitter sum plus the selected pitcher's rating.
pub fn roster_total(dataset: &Dataset, selection: &RosterSelection) -> f64 {
    team_hitter_sum(dataset, &selection.team, &selection.excluded)
        + selected_pitcher_rating(dataset, selection)
}

/// Distinct team identifiers, sorted ascending.
pub fn team_names(dataset: &Dataset) -> Vec<String> {
    dataset
        .iter()
        .map(|r| r.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `team`'s hitter records in source order.
pub fn hitter_records<'a>(dataset: &'a Dataset, team: &str) -> Vec<&'a PlayerRecord> {
    records_by_role(dataset, team, Position::Hitter)
}

/// Names of `team`'s hitters in source order.
pub fn hitter_names<'a>(dataset: &'a Dataset, team: &str) -> Vec<&'a str> {
    names_of(records_by_role(dataset, team, Position::Hitter))
}

/// Names of `team`'s pitchers in source order.
pub fn pitcher_names<'a>(dataset: &'a Dataset, team: &str) -> Vec<&'a str> {
    names_of(records_by_role(dataset, team, Position::Pitcher))
}

fn records_by_role<'a>(
    dataset: &'a Dataset,
    team: &str,
    position: Position,
) -> Vec<&'a PlayerRecord> {
    dataset
        .iter()
        .filter(|r| r.team == team && r.position == position)
        .collect()
}

fn names_of(records: Vec<&PlayerRecord>) -> Vec<&str> {
    records.into_iter().map(|r| r.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Exclusion sets
// ---------------------------------------------------------------------------

/// Anything that can answer "is this name excluded?" by exact equality.
pub trait NameSet {
    fn contains_name(&self, name: &str) -> bool;
}

impl NameSet for HashSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl NameSet for BTreeSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl NameSet for HashSet<&str> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: AsRef<str>> NameSet for [T] {
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|n| n.as_ref() == name)
    }
}

impl<T: AsRef<str>, const N: usize> NameSet for [T; N] {
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|n| n.as_ref() == name)
    }
}

impl<T: AsRef<str>> NameSet for Vec<T> {
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|n| n.as_ref() == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
