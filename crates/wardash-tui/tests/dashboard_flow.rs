// End-to-end checks against the bundled sample ratings table: drive the
// dashboard state through key presses and run the report commands.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use wardash_core::config::RankingsConfig;
use wardash_core::dataset::{Dataset, DatasetLoader};
use wardash_core::query::{PositionFilter, Winner};
use wardash_tui::cli::{CompareArgs, RankingArgs};
use wardash_tui::report;
use wardash_tui::tui::input::handle_key;
use wardash_tui::tui::{RankingKind, Side, TabId, UserCommand, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

fn sample() -> Arc<Dataset> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/war.csv");
    DatasetLoader::new(path)
        .load()
        .expect("sample data should load")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn press(state: &mut ViewState, codes: &[KeyCode]) {
    for code in codes {
        assert_eq!(handle_key(key(*code), state), None);
    }
}

fn press_n(state: &mut ViewState, code: KeyCode, n: usize) {
    for _ in 0..n {
        press(state, &[code]);
    }
}

// ===========================================================================
// Dashboard
// ===========================================================================

#[test]
fn sample_teams_are_sorted() {
    let state = ViewState::new(sample(), &RankingsConfig::default());
    assert_eq!(
        state.teams,
        vec!["ATL", "BAL", "CLE", "HOU", "KC", "LAD", "NYY", "TEX"]
    );
}

#[test]
fn compare_flow_predicts_winner() {
    let mut state = ViewState::new(sample(), &RankingsConfig::default());

    // Both sides open on their team's first listed pitcher.
    assert_eq!(state.pitcher(Side::A), Some("Chris Sale"));
    assert_eq!(state.pitcher(Side::B), Some("Corbin Burnes"));

    // Team 1: ATL -> NYY, which lists Gerrit Cole first.
    press_n(&mut state, KeyCode::Char('t'), 6);
    assert_eq!(state.team(Side::A), "NYY");
    assert_eq!(state.pitcher(Side::A), Some("Gerrit Cole"));

    // Team 2: BAL -> LAD, pitcher Tyler Glasnow (second in the list).
    press(&mut state, &[KeyCode::Tab]);
    press_n(&mut state, KeyCode::Char('t'), 4);
    assert_eq!(state.pitcher(Side::B), Some("Yoshinobu Yamamoto"));
    press(&mut state, &[KeyCode::Char('p')]);
    assert_eq!(state.team(Side::B), "LAD");
    assert_eq!(state.pitcher(Side::B), Some("Tyler Glasnow"));

    press(&mut state, &[KeyCode::Enter]);
    assert!(state.show_prediction);
    let report = state.matchup();
    assert_eq!(report.matchup.winner, Winner::B);
    assert_eq!(report.to_string(), "LAD is predicted to win by 0.2 WAR!");

    // Dropping Ohtani from LAD flips the result and hides the old prediction.
    press(&mut state, &[KeyCode::Char(' ')]);
    assert!(!state.show_prediction);
    assert!(state.side(Side::B).excluded.contains("Shohei Ohtani"));
    press(&mut state, &[KeyCode::Enter]);
    assert_eq!(
        state.matchup().to_string(),
        "NYY is predicted to win by 8.2 WAR!"
    );
}

#[test]
fn rankings_flow() {
    let mut state = ViewState::new(sample(), &RankingsConfig::default());
    press(&mut state, &[KeyCode::Char('2')]);
    assert_eq!(state.active_tab, TabId::Rankings);

    press(&mut state, &[KeyCode::Char('m'), KeyCode::Char('f')]);
    assert_eq!(state.rankings.kind, RankingKind::Players);
    assert_eq!(state.rankings.filter, PositionFilter::Hitter);

    press_n(&mut state, KeyCode::Char('-'), 20);
    assert_eq!(state.current_limit(), 1);
}

#[test]
fn quit_requires_confirmation() {
    let mut state = ViewState::new(sample(), &RankingsConfig::default());
    press(&mut state, &[KeyCode::Char('q')]);
    assert!(state.confirm_quit);
    assert_eq!(
        handle_key(key(KeyCode::Char('y')), &mut state),
        Some(UserCommand::Quit)
    );
}

// ===========================================================================
// Reports
// ===========================================================================

#[test]
fn teams_report_on_sample() {
    let args = RankingArgs {
        position: PositionFilter::All,
        limit: Some(3),
        json: false,
    };
    let out = report::teams_report(&sample(), &args, &RankingsConfig::default()).unwrap();
    let teams: Vec<&str> = out
        .lines()
        .skip(2)
        .map(|line| line.split_whitespace().nth(1).unwrap())
        .collect();
    assert_eq!(teams, vec!["NYY", "LAD", "KC"]);
    assert!(out.contains("27.5"));
}

#[test]
fn hitter_team_report_on_sample() {
    let args = RankingArgs {
        position: PositionFilter::Hitter,
        limit: None,
        json: true,
    };
    let out = report::teams_report(&sample(), &args, &RankingsConfig::default()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0]["team"], "LAD");
    assert_eq!(rows[0]["display"], "20.9");
    assert_eq!(rows[7]["team"], "ATL");
}

#[test]
fn players_report_on_sample() {
    let args = RankingArgs {
        position: PositionFilter::All,
        limit: Some(2),
        json: true,
    };
    let out = report::players_report(&sample(), &args, &RankingsConfig::default()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(rows[0]["name"], "Bobby Witt Jr.");
    assert_eq!(rows[1]["name"], "Aaron Judge");
}

#[test]
fn compare_report_on_sample() {
    let args = CompareArgs {
        team_a: "KC".into(),
        team_b: "CLE".into(),
        exclude_a: vec!["Bobby Witt Jr.".into()],
        exclude_b: Vec::new(),
        pitcher_a: Some("Cole Ragans".into()),
        pitcher_b: Some("Emmanuel Clase".into()),
        json: false,
    };
    let out = report::compare_report(&sample(), &args).unwrap();
    // KC: 3.2 + 1.5 + 4.3 = 9.0; CLE: 15.2 + 2.5 = 17.7
    assert_eq!(
        out,
        "KC Total WAR: 9.0\nCLE Total WAR: 17.7\nCLE is predicted to win by 8.7 WAR!\n"
    );
}
