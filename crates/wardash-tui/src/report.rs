// One-shot report commands: render query results as text tables or JSON.

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use wardash_core::config::RankingsConfig;
use wardash_core::dataset::Dataset;
use wardash_core::query::{
    compare_rosters, format_rating, rank_players, rank_teams, team_names, MatchupReport,
    RosterSelection,
};

use crate::cli::{CompareArgs, RankingArgs};

// ---------------------------------------------------------------------------
// JSON row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TeamRow<'a> {
    rank: usize,
    team: &'a str,
    total: f64,
    display: String,
}

#[derive(Debug, Serialize)]
struct PlayerRow<'a> {
    rank: usize,
    name: &'a str,
    team: &'a str,
    position: &'static str,
    rating: f64,
    display: String,
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    #[serde(flatten)]
    report: &'a MatchupReport,
    message: String,
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Requested row count, defaulted from config and capped at `max`.
fn effective_limit(requested: Option<usize>, config: &RankingsConfig, max: usize) -> usize {
    let limit = requested.unwrap_or(config.default_limit);
    if limit > max {
        warn!("Limit {} exceeds configured maximum {}; capping", limit, max);
    }
    limit.min(max)
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub fn teams_report(
    dataset: &Dataset,
    args: &RankingArgs,
    config: &RankingsConfig,
) -> anyhow::Result<String> {
    let limit = effective_limit(args.limit, config, config.max_team_limit);
    let ranked = rank_teams(dataset, args.position, limit);
    info!(
        "Team ranking: filter={} limit={} rows={}",
        args.position,
        limit,
        ranked.len()
    );

    if args.json {
        let rows: Vec<TeamRow> = ranked
            .iter()
            .map(|r| TeamRow {
                rank: r.rank,
                team: &r.team,
                total: r.total,
                display: r.rating_display(),
            })
            .collect();
        return to_json(&rows);
    }

    let width = column_width(ranked.iter().map(|r| r.team.as_str()), "Team");
    let mut out = format!(
        "Top {} teams by WAR (position: {})\n",
        ranked.len(),
        args.position.label()
    );
    out.push_str(&format!(
        "{:>3}  {:<width$}  {:>9}\n",
        "#", "Team", "Total WAR"
    ));
    for r in &ranked {
        out.push_str(&format!(
            "{:>3}  {:<width$}  {:>9}\n",
            r.rank,
            r.team,
            r.rating_display()
        ));
    }
    Ok(out)
}

pub fn players_report(
    dataset: &Dataset,
    args: &RankingArgs,
    config: &RankingsConfig,
) -> anyhow::Result<String> {
    let limit = effective_limit(args.limit, config, config.max_player_limit);
    let ranked = rank_players(dataset, args.position, limit);
    info!(
        "Player ranking: filter={} limit={} rows={}",
        args.position,
        limit,
        ranked.len()
    );

    if args.json {
        let rows: Vec<PlayerRow> = ranked
            .iter()
            .map(|r| PlayerRow {
                rank: r.rank,
                name: &r.name,
                team: &r.team,
                position: r.position.code(),
                rating: r.rating,
                display: r.rating_display(),
            })
            .collect();
        return to_json(&rows);
    }

    let name_width = column_width(ranked.iter().map(|r| r.name.as_str()), "Player");
    let team_width = column_width(ranked.iter().map(|r| r.team.as_str()), "Team");
    let mut out = format!(
        "Top {} players by WAR (position: {})\n",
        ranked.len(),
        args.position.label()
    );
    out.push_str(&format!(
        "{:>3}  {:<name_width$}  {:<team_width$}  {:<3}  {:>5}\n",
        "#", "Player", "Team", "Pos", "WAR"
    ));
    for r in &ranked {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:<team_width$}  {:<3}  {:>5}\n",
            r.rank,
            r.name,
            r.team,
            r.position.code(),
            r.rating_display()
        ));
    }
    Ok(out)
}

pub fn compare_report(dataset: &Dataset, args: &CompareArgs) -> anyhow::Result<String> {
    let known = team_names(dataset);
    for team in [&args.team_a, &args.team_b] {
        if !known.contains(team) {
            warn!("Unknown team {:?}; its total will be 0.0", team);
        }
    }

    let side_a = selection(&args.team_a, &args.exclude_a, args.pitcher_a.as_deref());
    let side_b = selection(&args.team_b, &args.exclude_b, args.pitcher_b.as_deref());
    let report = compare_rosters(dataset, &side_a, &side_b);
    info!(
        "Compared {} ({}) vs {} ({})",
        report.team_a, report.total_a, report.team_b, report.total_b
    );

    if args.json {
        return to_json(&CompareOutput {
            report: &report,
            message: report.to_string(),
        });
    }

    Ok(format!(
        "{} Total WAR: {}\n{} Total WAR: {}\n{}\n",
        report.team_a,
        format_rating(report.total_a),
        report.team_b,
        format_rating(report.total_b),
        report
    ))
}

pub fn teams_list(dataset: &Dataset) -> String {
    team_names(dataset)
        .into_iter()
        .map(|team| team + "\n")
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn selection(team: &str, excluded: &[String], pitcher: Option<&str>) -> RosterSelection {
    let selection = RosterSelection::new(team).with_excluded(excluded.iter().cloned());
    match pitcher {
        Some(name) => selection.with_pitcher(name),
        None => selection,
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut text =
        serde_json::to_string_pretty(value).context("failed to serialize report as JSON")?;
    text.push('\n');
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wardash_core::dataset::load_from_reader;
    use wardash_core::query::PositionFilter;

    fn dataset() -> Dataset {
        let csv_data = "\
Name,Team,Position,Rating
A,TeamX,H,3.0
B,TeamX,H,2.0
C,TeamX,P,1.5
D,TeamY,H,4.0";
        load_from_reader(csv_data.as_bytes()).unwrap()
    }

    fn ranking_args(position: PositionFilter, limit: Option<usize>, json: bool) -> RankingArgs {
        RankingArgs {
            position,
            limit,
            json,
        }
    }

    fn compare_args(a: &str, b: &str) -> CompareArgs {
        CompareArgs {
            team_a: a.into(),
            team_b: b.into(),
            exclude_a: Vec::new(),
            exclude_b: Vec::new(),
            pitcher_a: None,
            pitcher_b: None,
            json: false,
        }
    }

    #[test]
    fn teams_text_table() {
        let out = teams_report(
            &dataset(),
            &ranking_args(PositionFilter::All, Some(1), false),
            &RankingsConfig::default(),
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Top 1 teams by WAR (position: All)");
        assert_eq!(lines[1], "  #  Team   Total WAR");
        assert_eq!(lines[2], "  1  TeamX        6.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn teams_limit_capped_by_config() {
        let config = RankingsConfig {
            default_limit: 1,
            max_team_limit: 1,
            max_player_limit: 1,
        };
        let out = teams_report(
            &dataset(),
            &ranking_args(PositionFilter::All, Some(50), true),
            &config,
        )
        .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[test]
    fn teams_json_rows() {
        let out = teams_report(
            &dataset(),
            &ranking_args(PositionFilter::Hitter, None, true),
            &RankingsConfig::default(),
        )
        .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["team"], "TeamX");
        assert_eq!(rows[0]["display"], "5.0");
        assert_eq!(rows[1]["team"], "TeamY");
    }

    #[test]
    fn players_text_table() {
        let out = players_report(
            &dataset(),
            &ranking_args(PositionFilter::Hitter, Some(2), false),
            &RankingsConfig::default(),
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Top 2 players by WAR (position: H)");
        assert_eq!(lines[2], "  1  D       TeamY  H      4.0");
        assert_eq!(lines[3], "  2  A       TeamX  H      3.0");
    }

    #[test]
    fn players_json_carries_position_code() {
        let out = players_report(
            &dataset(),
            &ranking_args(PositionFilter::Pitcher, None, true),
            &RankingsConfig::default(),
        )
        .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["name"], "C");
        assert_eq!(rows[0]["position"], "P");
    }

    #[test]
    fn compare_text_with_selections() {
        let mut args = compare_args("TeamX", "TeamY");
        args.exclude_a = vec!["A".into()];
        args.pitcher_a = Some("C".into());
        let out = compare_report(&dataset(), &args).unwrap();
        assert_eq!(
            out,
            "TeamX Total WAR: 3.5\nTeamY Total WAR: 4.0\nTeamY is predicted to win by 0.5 WAR!\n"
        );
    }

    #[test]
    fn compare_unknown_team_totals_zero() {
        let out = compare_report(&dataset(), &compare_args("Nowhere", "TeamY")).unwrap();
        assert!(out.starts_with("Nowhere Total WAR: 0.0\n"));
        assert!(out.ends_with("TeamY is predicted to win by 4.0 WAR!\n"));
    }

    #[test]
    fn compare_json_includes_message() {
        let mut args = compare_args("TeamX", "TeamX");
        args.json = true;
        let out = compare_report(&dataset(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["team_a"], "TeamX");
        assert_eq!(value["matchup"]["winner"], "Tie");
        assert_eq!(value["message"], "It's a tie!");
    }

    #[test]
    fn teams_list_sorted() {
        assert_eq!(teams_list(&dataset()), "TeamX\nTeamY\n");
    }
}
