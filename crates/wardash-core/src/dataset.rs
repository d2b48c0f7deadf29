// Player ratings dataset: CSV loading, validation, and the cached handle.
//
// The source is a flat CSV with the columns Name, Team, Position, Rating.
// Position is a single-character role code ("H" hitter, "P" pitcher) and
// Rating is a signed WAR value. The table is read once and shared as an
// immutable `Arc<Dataset>` for the rest of the process.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Columns that must be present in the CSV header.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Name", "Team", "Position", "Rating"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Player role. Hitters and pitchers are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "H")]
    Hitter,
    #[serde(rename = "P")]
    Pitcher,
}

impl Position {
    /// Parse a role code. Surrounding whitespace and case are ignored.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "H" => Some(Position::Hitter),
            "P" => Some(Position::Pitcher),
            _ => None,
        }
    }

    /// The single-character code used in the source file and for display.
    pub fn code(&self) -> &'static str {
        match self {
            Position::Hitter => "H",
            Position::Pitcher => "P",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of the ratings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Wins above replacement. Always finite.
    pub rating: f64,
}

/// The loaded ratings table, in source order.
///
/// Constructed only through [`Dataset::from_records`] or the loaders, so
/// every record is known to satisfy the table invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
}

impl Dataset {
    /// Build a dataset from already-parsed records, enforcing the table
    /// invariants (non-empty team, finite rating). A table with no rows is
    /// valid; every query over it is empty or zero.
    pub fn from_records(records: Vec<PlayerRecord>) -> Result<Self, LoadError> {
        for (i, record) in records.iter().enumerate() {
            if record.team.trim().is_empty() {
                return Err(LoadError::MissingTeam { row: i + 1 });
            }
            if !record.rating.is_finite() {
                return Err(LoadError::InvalidRating {
                    row: i + 1,
                    value: record.rating.to_string(),
                });
            }
        }
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct team identifiers.
    pub fn team_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.team.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PlayerRecord;
    type IntoIter = std::slice::Iter<'a, PlayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Structural failure while reading the ratings table. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {row}: rating `{value}` is not a finite number")]
    InvalidRating { row: usize, value: String },

    #[error("row {row}: unknown position code `{value}` (expected H or P)")]
    InvalidPosition { row: usize, value: String },

    #[error("row {row}: team is empty")]
    MissingTeam { row: usize },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One CSV row as written. Every field is read as text so that a bad rating
/// or position code can be reported with its row number instead of a
/// generic deserialization error. Extra columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawRow {
    Name: String,
    Team: String,
    Position: String,
    Rating: String,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<PlayerRecord, LoadError> {
        let team = self.Team.trim().to_string();
        if team.is_empty() {
            return Err(LoadError::MissingTeam { row });
        }

        let position =
            Position::from_code(&self.Position).ok_or_else(|| LoadError::InvalidPosition {
                row,
                value: self.Position.clone(),
            })?;

        let rating = self
            .Rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::InvalidRating {
                row,
                value: self.Rating.clone(),
            })?;

        Ok(PlayerRecord {
            name: self.Name.trim().to_string(),
            team,
            position,
            rating,
        })
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read and validate a ratings table from any reader.
pub fn load_from_reader<R: Read>(rdr: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(rdr);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(i + 1)?);
    }

    Dataset::from_records(records)
}

/// Read and validate a ratings table from a CSV file.
pub fn load_from_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_from_reader(file)
}

// ---------------------------------------------------------------------------
// Cached handle
// ---------------------------------------------------------------------------

/// Loads the ratings table at most once and hands out the shared handle.
///
/// A failed load is not cached; the caller decides whether to retry or abort.
#[derive(Debug)]
pub struct DatasetLoader {
    source: PathBuf,
    cached: OnceLock<Arc<Dataset>>,
}

impl DatasetLoader {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        DatasetLoader {
            source: source.into(),
            cached: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Return the loaded dataset, reading the source only on the first call.
    pub fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.cached.get() {
            debug!("dataset cache hit for {}", self.source.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = load_from_path(&self.source)?;
        info!(
            "Loaded {} player ratings across {} teams from {}",
            dataset.len(),
            dataset.team_count(),
            self.source.display()
        );
        Ok(Arc::clone(self.cached.get_or_init(|| Arc::new(dataset))))
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
