// Top-N rankings of teams (grouped sums) and individual players.
//
// Both rankings sort descending with a stable sort, so equal ratings keep
// source order: first appearance of the team for grouped sums, row order
// for players. Ranks are 1-based and contiguous.

use serde::Serialize;
use std::collections::HashMap;

use super::{clamp_limit, format_rating, PositionFilter};
use crate::dataset::{Dataset, Position};

/// One row of the team ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRanking {
    pub rank: usize,
    pub team: String,
    /// Sum of the filtered players' ratings.
    pub total: f64,
}

impl TeamRanking {
    pub fn rating_display(&self) -> String {
        format_rating(self.total)
    }
}

/// One row of the player ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRanking {
    pub rank: usize,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub rating: f64,
}

impl PlayerRanking {
    pub fn rating_display(&self) -> String {
        format_rating(self.rating)
    }
}

/// Rank teams by the summed rating of their players matching `filter`.
pub fn rank_teams(dataset: &Dataset, filter: PositionFilter, limit: usize) -> Vec<TeamRanking> {
    // Groups in order of first appearance.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for record in dataset.iter().filter(|r| filter.matches(r)) {
        let i = *index.entry(record.team.as_str()).or_insert_with(|| {
            groups.push((record.team.as_str(), 0.0));
            groups.len() - 1
        });
        groups[i].1 += record.rating;
    }

    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    let take = clamp_limit(limit, groups.len());

    groups
        .into_iter()
        .take(take)
        .enumerate()
        .map(|(i, (team, total))| TeamRanking {
            rank: i + 1,
            team: team.to_string(),
            total,
        })
        .collect()
}

/// Rank individual players matching `filter` by rating.
pub fn rank_players(dataset: &Dataset, filter: PositionFilter, limit: usize) -> Vec<PlayerRanking> {
    let mut players: Vec<_> = dataset.iter().filter(|r| filter.matches(r)).collect();
    players.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    let take = clamp_limit(limit, players.len());

    players
        .into_iter()
        .take(take)
        .enumerate()
        .map(|(i, r)| PlayerRanking {
            rank: i + 1,
            name: r.name.clone(),
            team: r.team.clone(),
            position: r.position,
            rating: r.rating,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
