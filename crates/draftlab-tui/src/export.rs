// Leaderboard export: the active board with its derived views, as JSON.

use std::path::{Path, PathBuf};

use draftlab_core::{Position, ScoredPlayer, ScoringMode, TeamAggregate, WeightVector};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a leaderboard came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardSource {
    Live,
    Precomputed,
}

/// JSON document written by the `e` key.
#[derive(Debug, Serialize)]
pub struct LeaderboardExport<'a> {
    pub position: Position,
    pub mode: ScoringMode,
    pub source: BoardSource,
    pub original_formula: bool,
    pub weights: &'a WeightVector,
    pub leaderboard: &'a [ScoredPlayer],
    pub teams: Vec<TeamAggregate>,
    pub outlier_threshold: f64,
}

/// `leaderboard-G.json` and friends.
pub fn export_file_name(position: Position) -> String {
    format!("leaderboard-{}.json", position.code())
}

/// Write `export` into `dir`, creating the directory if needed. Overwrites
/// any earlier export for the same position.
pub fn write_export(dir: &Path, export: &LeaderboardExport<'_>) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(export_file_name(export.position));
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(&path, json).map_err(|e| ExportError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
