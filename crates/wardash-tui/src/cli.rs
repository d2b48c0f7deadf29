// Command-line arguments.
//
// With no subcommand the interactive dashboard opens; each subcommand prints
// one report to stdout and exits.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wardash_core::query::PositionFilter;

#[derive(Debug, Parser)]
#[command(name = "wardash")]
#[command(about = "MLB WAR dashboard: compare rosters and rank teams and players")]
#[command(version)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Ratings CSV to load instead of the configured data.path
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rank teams by summed WAR
    Teams(RankingArgs),

    /// Rank individual players by WAR
    Players(RankingArgs),

    /// Predict the winner of two rosters
    Compare(CompareArgs),

    /// Print every team identifier, sorted
    TeamsList,
}

#[derive(Debug, Clone, Args)]
pub struct RankingArgs {
    /// Role filter: all, h (hitters) or p (pitchers)
    #[arg(long, short, default_value = "all")]
    pub position: PositionFilter,

    /// Number of rows (defaults to rankings.default_limit)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Emit JSON instead of a text table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    pub team_a: String,

    pub team_b: String,

    /// Hitter to leave out of the first team's sum (repeatable)
    #[arg(long = "exclude-a", value_name = "NAME")]
    pub exclude_a: Vec<String>,

    /// Hitter to leave out of the second team's sum (repeatable)
    #[arg(long = "exclude-b", value_name = "NAME")]
    pub exclude_b: Vec<String>,

    /// Pitcher added to the first team's total
    #[arg(long = "pitcher-a", value_name = "NAME")]
    pub pitcher_a: Option<String>,

    /// Pitcher added to the second team's total
    #[arg(long = "pitcher-b", value_name = "NAME")]
    pub pitcher_b: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_opens_dashboard() {
        let cli = Cli::try_parse_from(["wardash"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config_dir.is_none());
    }

    #[test]
    fn teams_parses_filter_and_limit() {
        let cli =
            Cli::try_parse_from(["wardash", "teams", "--position", "h", "--limit", "5"]).unwrap();
        match cli.command {
            Some(Command::Teams(args)) => {
                assert_eq!(args.position, PositionFilter::Hitter);
                assert_eq!(args.limit, Some(5));
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn players_default_filter_is_all() {
        let cli = Cli::try_parse_from(["wardash", "players", "--json"]).unwrap();
        match cli.command {
            Some(Command::Players(args)) => {
                assert_eq!(args.position, PositionFilter::All);
                assert_eq!(args.limit, None);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn bad_position_is_rejected() {
        assert!(Cli::try_parse_from(["wardash", "teams", "--position", "x"]).is_err());
    }

    #[test]
    fn compare_collects_repeated_exclusions() {
        let cli = Cli::try_parse_from([
            "wardash",
            "compare",
            "NYY",
            "LAD",
            "--exclude-a",
            "Aaron Judge",
            "--exclude-a",
            "Juan Soto",
            "--pitcher-b",
            "Tyler Glasnow",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Compare(args)) => {
                assert_eq!(args.team_a, "NYY");
                assert_eq!(args.team_b, "LAD");
                assert_eq!(args.exclude_a, vec!["Aaron Judge", "Juan Soto"]);
                assert!(args.exclude_b.is_empty());
                assert_eq!(args.pitcher_a, None);
                assert_eq!(args.pitcher_b.as_deref(), Some("Tyler Glasnow"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["wardash", "teams-list", "--data", "other.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("other.csv")));
        assert!(matches!(cli.command, Some(Command::TeamsList)));
    }
}
