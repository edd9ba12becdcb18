// Dataset loading: draft player table and the precomputed leaderboard table.
//
// Both files are header-row CSVs. Every field is read as text and coerced
// here, so a bad number becomes 0 instead of costing the whole row. Rows
// with an unknown position code or an empty player name are dropped.

use crate::player::{Metrics, PlayerRecord, Position, ScoredPlayer, FREE_AGENT};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Highest rank kept from the precomputed leaderboard table.
pub const MAX_PRECOMPUTED_RANK: u32 = 10;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Draft table row. Columns not listed here are ignored; listed columns
/// that are absent default to empty text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
struct RawDraftRow {
    Player: String,
    Team: String,
    Pick: String,
    Position: String,
    AvailabilityScore: String,
    PTS: String,
    TRB: String,
    AST: String,
    STL: String,
    BLK: String,
    TOV: String,
    FGPercent: String,
    FreeThrowPercent: String,
    ThreePointPercent: String,
    WS: String,
    BPM: String,
    VORP: String,
}

/// Precomputed leaderboard row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
struct RawLeaderboardRow {
    Player: String,
    Team: String,
    Pick: String,
    Position: String,
    PosRank: String,
    FinalScore: String,
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Parse a numeric field, falling back to 0 for empty, malformed or
/// non-finite text.
fn to_number(field: &str) -> f64 {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Parse a non-negative whole number (draft pick, rank), 0 when unusable.
fn to_count(field: &str) -> u32 {
    let n = to_number(field);
    if n >= 0.0 && n <= u32::MAX as f64 {
        n.round() as u32
    } else {
        0
    }
}

fn team_or_free_agent(team: &str) -> String {
    let team = team.trim();
    if team.is_empty() {
        FREE_AGENT.to_string()
    } else {
        team.to_string()
    }
}

/// Validate the identity columns shared by both tables.
fn identity(name: &str, position: &str) -> Option<(String, Position)> {
    let name = name.trim();
    if name.is_empty() {
        debug!("skipping row without a player name");
        return None;
    }
    let Some(position) = Position::from_code(position) else {
        debug!("skipping '{}': unrecognized position '{}'", name, position);
        return None;
    };
    Some((name.to_string(), position))
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

/// Read draft players from any CSV source.
pub fn load_draft_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawDraftRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed draft row: {}", e);
                continue;
            }
        };
        let Some((name, position)) = identity(&raw.Player, &raw.Position) else {
            continue;
        };
        players.push(PlayerRecord {
            name,
            team: team_or_free_agent(&raw.Team),
            draft_pick: to_count(&raw.Pick),
            position,
            availability: to_number(&raw.AvailabilityScore),
            metrics: Metrics {
                pts: to_number(&raw.PTS),
                trb: to_number(&raw.TRB),
                ast: to_number(&raw.AST),
                stl: to_number(&raw.STL),
                blk: to_number(&raw.BLK),
                tov: to_number(&raw.TOV),
                fg_percent: to_number(&raw.FGPercent),
                free_throw_percent: to_number(&raw.FreeThrowPercent),
                three_point_percent: to_number(&raw.ThreePointPercent),
                ws: to_number(&raw.WS),
                bpm: to_number(&raw.BPM),
                vorp: to_number(&raw.VORP),
            },
        });
    }
    Ok(players)
}

/// Read the precomputed leaderboard table, grouped by position and sorted
/// by rank. Rows ranked outside `1..=MAX_PRECOMPUTED_RANK` are dropped.
pub fn load_original_leaderboards_from_reader<R: Read>(
    rdr: R,
) -> Result<BTreeMap<Position, Vec<ScoredPlayer>>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut grouped: BTreeMap<Position, Vec<ScoredPlayer>> =
        Position::ALL.iter().map(|&p| (p, Vec::new())).collect();

    for result in reader.deserialize::<RawLeaderboardRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed leaderboard row: {}", e);
                continue;
            }
        };
        let Some((name, position)) = identity(&raw.Player, &raw.Position) else {
            continue;
        };
        let rank = to_number(&raw.PosRank);
        if !(1.0..=MAX_PRECOMPUTED_RANK as f64).contains(&rank) {
            debug!("skipping '{}': rank {} outside leaderboard", name, rank);
            continue;
        }
        let entry = ScoredPlayer {
            player: PlayerRecord {
                name,
                team: team_or_free_agent(&raw.Team),
                draft_pick: to_count(&raw.Pick),
                position,
                availability: 0.0,
                metrics: Metrics::default(),
            },
            score: to_number(&raw.FinalScore),
            rank: Some(rank.round() as u32),
        };
        grouped.entry(position).or_default().push(entry);
    }

    for board in grouped.values_mut() {
        board.sort_by_key(|p| p.rank.unwrap_or(u32::MAX));
    }
    Ok(grouped)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load draft players from a CSV file.
pub fn load_draft_players(path: &Path) -> Result<Vec<PlayerRecord>, LoadError> {
    let file = open(path)?;
    let players = load_draft_players_from_reader(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("loaded {} draft players from {}", players.len(), path.display());
    Ok(players)
}

/// Load the precomputed per-position leaderboards from a CSV file.
pub fn load_original_leaderboards(
    path: &Path,
) -> Result<BTreeMap<Position, Vec<ScoredPlayer>>, LoadError> {
    let file = open(path)?;
    load_original_leaderboards_from_reader(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
