// wardash entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config (bootstrapping config/ from defaults/)
// 3. Initialize tracing (log to file, not terminal)
// 4. Load the ratings table once
// 5. Run the requested report, or the dashboard until the user quits

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use wardash_core::config::{self, Config};
use wardash_core::dataset::DatasetLoader;
use wardash_tui::cli::{Cli, Command};
use wardash_tui::{report, tui};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Load config
    let base_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    let config = config::load_config_in(&base_dir).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&config)?;
    info!("wardash starting up (config from {})", base_dir.display());

    // 4. Load the dataset
    let data_path = cli.data.clone().unwrap_or_else(|| config.data_path());
    let loader = DatasetLoader::new(data_path);
    let dataset = match loader.load() {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset from {}: {}", loader.source().display(), e);
            return Err(anyhow::Error::new(e).context(format!(
                "failed to load dataset from {}",
                loader.source().display()
            )));
        }
    };

    // 5. Dispatch
    match &cli.command {
        None => {
            let view_state = tui::ViewState::new(dataset, &config.rankings);
            tui::run(view_state).await?;
        }
        Some(Command::Teams(args)) => {
            print!("{}", report::teams_report(&dataset, args, &config.rankings)?);
        }
        Some(Command::Players(args)) => {
            print!("{}", report::players_report(&dataset, args, &config.rankings)?);
        }
        Some(Command::Compare(args)) => {
            print!("{}", report::compare_report(&dataset, args)?);
        }
        Some(Command::TeamsList) => {
            print!("{}", report::teams_list(&dataset));
        }
    }

    info!("wardash shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
///
/// `RUST_LOG` wins over the configured `logging.filter`.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    create_log_dir(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("wardash.log"))
        .with_context(|| format!("failed to create log file in {}", log_dir.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

fn create_log_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}
