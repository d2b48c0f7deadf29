// Configuration loading and parsing (dashboard.toml).

use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name of the dashboard configuration inside `config/`.
pub const CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the config was loaded from; relative paths resolve here.
    pub base_dir: PathBuf,
    pub data: DataConfig,
    pub rankings: RankingsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Absolute (or base-relative) path of the ratings CSV.
    pub fn data_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.data.path)
    }

    /// Directory the log file is written to.
    pub fn log_dir(&self) -> PathBuf {
        resolve(&self.base_dir, &self.logging.dir)
    }
}

// ---------------------------------------------------------------------------
// dashboard.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire dashboard.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DashboardFile {
    data: DataConfig,
    rankings: RankingsConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Ratings CSV, relative to the base directory unless absolute.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingsConfig {
    /// Initial row count for both ranking views.
    pub default_limit: usize,
    /// Upper bound the dashboard offers for team rankings.
    pub max_team_limit: usize,
    /// Upper bound the dashboard offers for player rankings.
    pub max_player_limit: usize,
}

impl Default for RankingsConfig {
    fn default() -> Self {
        RankingsConfig {
            default_limit: 10,
            max_team_limit: 30,
            max_player_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: default_log_dir(),
            filter: default_log_filter(),
        }
    }
}

fn default_log_dir() -> String {
    "logs".into()
}

fn default_log_filter() -> String {
    "wardash=info,warn".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/dashboard.toml` relative to
/// the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: DashboardFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        base_dir: base_dir.to_path_buf(),
        data: file.data,
        rankings: file.rankings,
        logging: file.logging,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`, never overwriting a file already there.
/// Returns the paths written; `*.example` templates stay behind.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (false, false) => {
            return Err(bootstrap_error(format!(
                "neither defaults/ nor config/ directory found in {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            )));
        }
        (false, true) => return Ok(Vec::new()),
        _ => {}
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| bootstrap_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::new();
    for source in seed_candidates(&defaults_dir)? {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);
        if seed_file(&source, &target)? {
            info!("Created {} from defaults", target.display());
            seeded.push(target);
        }
    }

    Ok(seeded)
}

/// Regular files under `defaults/`, minus `*.example`, sorted by path.
fn seed_candidates(defaults_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let listing_error = |e: std::io::Error| {
        bootstrap_error(format!("cannot list {}: {e}", defaults_dir.display()))
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(defaults_dir).map_err(listing_error)? {
        let path = entry.map_err(listing_error)?.path();
        let is_example = path.extension().is_some_and(|ext| ext == "example");
        if path.is_file() && !is_example {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `source` to `target` unless `target` exists. Returns whether a file
/// was written.
fn seed_file(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(bootstrap_error(format!(
                "cannot create {}: {e}",
                target.display()
            )))
        }
    };
    let content = std::fs::read(source)
        .map_err(|e| bootstrap_error(format!("cannot read {}: {e}", source.display())))?;
    dest.write_all(&content)
        .map_err(|e| bootstrap_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

fn bootstrap_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

/// Bootstrap missing files from `defaults/` and load the config rooted at
/// `base_dir`.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.path".into(),
            message: "must not be empty".into(),
        });
    }

    let r = &config.rankings;
    let limit_fields: &[(&str, usize)] = &[
        ("rankings.default_limit", r.default_limit),
        ("rankings.max_team_limit", r.max_team_limit),
        ("rankings.max_player_limit", r.max_player_limit),
    ];
    for (name, val) in limit_fields {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    let ceiling = r.max_team_limit.min(r.max_player_limit);
    if r.default_limit > ceiling {
        return Err(ConfigError::ValidationError {
            field: "rankings.default_limit".into(),
            message: format!(
                "must not exceed the smaller ranking maximum ({ceiling}), got {}",
                r.default_limit
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
