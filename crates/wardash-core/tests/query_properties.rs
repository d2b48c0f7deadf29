// Integration tests for the query engine.
//
// These load the fixture table through the cached loader and check the
// aggregate and ranking properties the dashboard relies on: sums agree with
// a direct fold, exclusions only ever remove rating, rankings are ordered
// with contiguous ranks, and repeated queries return identical results.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use wardash_core::dataset::{Dataset, DatasetLoader, Position};
use wardash_core::query::*;

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/war.csv")
}

fn fixture() -> Arc<Dataset> {
    DatasetLoader::new(fixture_path())
        .load()
        .expect("fixture should load")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Every subset of `names`, for exhaustive exclusion checks on small rosters.
fn subsets<'a>(names: &[&'a str]) -> Vec<Vec<&'a str>> {
    (0..(1u32 << names.len()))
        .map(|mask| {
            names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| *n)
                .collect()
        })
        .collect()
}

// ===========================================================================
// Loader
// ===========================================================================

#[test]
fn fixture_loads_with_extra_column() {
    let data = fixture();
    assert_eq!(data.len(), 11);
    assert_eq!(data.team_count(), 4);
}

#[test]
fn loader_hands_out_one_shared_table() {
    let loader = DatasetLoader::new(fixture_path());
    let a = loader.load().unwrap();
    let b = loader.load().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

// ===========================================================================
// Team aggregate
// ===========================================================================

#[test]
fn hitter_sum_matches_direct_fold_for_every_team() {
    let data = fixture();
    for team in team_names(&data) {
        let expected: f64 = data
            .iter()
            .filter(|r| r.team == team && r.position == Position::Hitter)
            .map(|r| r.rating)
            .sum();
        let none: [&str; 0] = [];
        assert!(
            approx(team_hitter_sum(&data, &team, &none), expected),
            "hitter sum mismatch for {team}"
        );
    }
}

#[test]
fn exclusions_never_increase_the_sum() {
    let data = fixture();
    // TeamX's hitters are all non-negative, so every subset removes >= 0.
    let team = "TeamX";
    let hitters = hitter_names(&data, team);
    let full = team_hitter_sum(&data, team, &hitters[..0]);

    for subset in subsets(&hitters) {
        let sum = team_hitter_sum(&data, team, &subset);
        assert!(sum <= full + 1e-9, "excluding {subset:?} increased the sum");
        if subset.is_empty() {
            assert!(approx(sum, full));
        } else {
            assert!(sum < full, "excluding {subset:?} should lower a positive-rated roster");
        }
    }
}

#[test]
fn excluding_non_hitters_is_a_noop() {
    let data = fixture();
    // C is a TeamX pitcher, D a TeamY hitter: neither is a TeamX hitter.
    let excluded: HashSet<String> = ["C", "D", "Nobody"].iter().map(|s| s.to_string()).collect();
    assert!(approx(team_hitter_sum(&data, "TeamX", &excluded), 5.0));
}

#[test]
fn worked_example_sums() {
    let data = fixture();
    let none: [&str; 0] = [];
    assert!(approx(team_hitter_sum(&data, "TeamX", &none), 5.0));
    assert!(approx(team_hitter_sum(&data, "TeamX", &["A"]), 2.0));
}

#[test]
fn unknown_team_is_empty_not_error() {
    let data = fixture();
    let none: [&str; 0] = [];
    assert_eq!(team_hitter_sum(&data, "Nowhere", &none), 0.0);
    assert!(hitter_names(&data, "Nowhere").is_empty());
    assert_eq!(pitcher_rating(&data, "Nowhere", "C"), 0.0);
}

// ===========================================================================
// Pitcher bonus
// ===========================================================================

#[test]
fn sentinel_pitcher_is_zero_for_every_team() {
    let data = fixture();
    for team in team_names(&data) {
        assert_eq!(pitcher_rating(&data, &team, NO_PITCHER), 0.0);
    }
}

#[test]
fn same_pitcher_name_resolves_per_team() {
    let data = fixture();
    assert!(approx(pitcher_rating(&data, "TeamX", "C"), 1.5));
    assert!(approx(pitcher_rating(&data, "TeamW", "C"), 0.9));
}

// ===========================================================================
// Matchup
// ===========================================================================

#[test]
fn full_matchup_from_selections() {
    let data = fixture();
    let a = RosterSelection::new("TeamX").with_pitcher("C");
    let b = RosterSelection::new("TeamZ").with_pitcher("G");

    let report = compare_rosters(&data, &a, &b);
    assert!(approx(report.total_a, 6.5));
    assert!(approx(report.total_b, 6.0));
    assert_eq!(report.matchup.winner, Winner::A);
    assert_eq!(report.matchup.margin_display(), "0.5");
    assert_eq!(report.to_string(), "TeamX is predicted to win by 0.5 WAR!");
}

// ===========================================================================
// Rankings
// ===========================================================================

#[test]
fn team_ranking_shape_for_every_filter_and_limit() {
    let data = fixture();
    for filter in [PositionFilter::All, PositionFilter::Hitter, PositionFilter::Pitcher] {
        let groups: HashSet<&str> = data
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.team.as_str())
            .collect();

        for limit in 1..=6 {
            let ranked = rank_teams(&data, filter, limit);
            assert_eq!(ranked.len(), limit.min(groups.len()));
            for (i, row) in ranked.iter().enumerate() {
                assert_eq!(row.rank, i + 1);
            }
            for pair in ranked.windows(2) {
                assert!(pair[0].total >= pair[1].total);
            }
        }
    }
}

#[test]
fn team_ranking_all_positions_breaks_ties_by_first_appearance() {
    let data = fixture();
    let ranked = rank_teams(&data, PositionFilter::All, 30);
    let teams: Vec<_> = ranked.iter().map(|r| r.team.as_str()).collect();
    // TeamY and TeamZ both total 6.0; TeamY appears first in the file.
    assert_eq!(teams, vec!["TeamW", "TeamX", "TeamY", "TeamZ"]);
    let shown: Vec<_> = ranked.iter().map(|r| r.rating_display()).collect();
    assert_eq!(shown, vec!["7.4", "6.5", "6.0", "6.0"]);
}

#[test]
fn player_ranking_respects_filter_and_order() {
    let data = fixture();
    for filter in [PositionFilter::Hitter, PositionFilter::Pitcher] {
        let ranked = rank_players(&data, filter, 100);
        assert!(ranked.iter().all(|r| match filter {
            PositionFilter::Hitter => r.position == Position::Hitter,
            PositionFilter::Pitcher => r.position == Position::Pitcher,
            PositionFilter::All => true,
        }));
        for pair in ranked.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }

    let hitters = rank_players(&data, PositionFilter::Hitter, 100);
    let names: Vec<_> = hitters.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["D", "A", "B", "I", "H", "E"]);
}

#[test]
fn player_ranking_limit_clamped() {
    let data = fixture();
    assert_eq!(rank_players(&data, PositionFilter::All, 100).len(), 11);
    assert_eq!(rank_players(&data, PositionFilter::Pitcher, 3).len(), 3);
}

#[test]
fn queries_are_idempotent() {
    let data = fixture();
    let none: [&str; 0] = [];
    assert_eq!(
        team_hitter_sum(&data, "TeamY", &none),
        team_hitter_sum(&data, "TeamY", &none)
    );
    assert_eq!(
        rank_teams(&data, PositionFilter::Hitter, 3),
        rank_teams(&data, PositionFilter::Hitter, 3)
    );
    assert_eq!(
        rank_players(&data, PositionFilter::All, 5),
        rank_players(&data, PositionFilter::All, 5)
    );
}
