// Scoring engine: raw and standardized (z-score) weighted sums per position.

use crate::formula::WeightVector;
use crate::player::{MetricKey, PlayerRecord, Position, ScoredPlayer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Leaderboard length produced by `ScoringMode::Raw`.
pub const RAW_LEADERBOARD_SIZE: usize = 10;

/// Threshold below which standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Scoring mode
// ---------------------------------------------------------------------------

/// Which formula variant turns metrics into a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// `Σ weight * value`, truncated to the top `RAW_LEADERBOARD_SIZE`.
    Raw,
    /// `Σ weight * z(value)` over the position pool, full pool returned.
    #[default]
    Standardized,
}

impl ScoringMode {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringMode::Raw => "Raw",
            ScoringMode::Standardized => "Z-score",
        }
    }

    /// The other mode.
    pub fn toggle(&self) -> Self {
        match self {
            ScoringMode::Raw => ScoringMode::Standardized,
            ScoringMode::Standardized => ScoringMode::Raw,
        }
    }
}

// ---------------------------------------------------------------------------
// Pool statistics
// ---------------------------------------------------------------------------

/// Mean and population standard deviation of one metric across a pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Compute mean and standard deviation for a slice of values.
///
/// Returns `PoolStats { mean: 0.0, std_dev: 0.0 }` for an empty slice.
/// Uses the population standard deviation (N denominator), since the pool
/// is the full set of players at the position rather than a sample.
pub fn compute_pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats {
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Compute a z-score given a value and pool stats.
///
/// Returns 0.0 when the standard deviation is approximately zero, so a
/// statistic that is constant across the pool never moves a score. Stats
/// that overflowed to a non-finite value are treated the same way.
pub fn compute_zscore(value: f64, stats: &PoolStats) -> f64 {
    if !stats.mean.is_finite() || !stats.std_dev.is_finite() || stats.std_dev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.std_dev
}

/// Descending order on scores with NaN sorted after every number.
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// Per-metric pool stats for the given keys.
pub fn compute_stats(pool: &[&PlayerRecord], keys: &[MetricKey]) -> BTreeMap<MetricKey, PoolStats> {
    keys.iter()
        .map(|&key| {
            let values: Vec<f64> = pool.iter().map(|p| p.metric_value(key)).collect();
            (key, compute_pool_stats(&values))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Players at `position`, in input order.
pub fn position_pool(players: &[PlayerRecord], position: Position) -> Vec<&PlayerRecord> {
    players.iter().filter(|p| p.position == position).collect()
}

/// Weighted contribution of each metric in `weights` to one player's score.
///
/// `stats` is only consulted in standardized mode; a metric missing from
/// `stats` contributes 0 there.
pub fn contributions(
    player: &PlayerRecord,
    stats: &BTreeMap<MetricKey, PoolStats>,
    weights: &WeightVector,
    mode: ScoringMode,
) -> Vec<(MetricKey, f64)> {
    weights
        .iter()
        .map(|(key, weight)| {
            let value = player.metric_value(key);
            let term = match mode {
                ScoringMode::Raw => value,
                ScoringMode::Standardized => stats
                    .get(&key)
                    .map_or(0.0, |s| compute_zscore(value, s)),
            };
            (key, weight * term)
        })
        .collect()
}

/// Score every player at `position` and return them ranked by score.
///
/// - `Raw`: plain weighted sum, truncated to `RAW_LEADERBOARD_SIZE`.
/// - `Standardized`: weighted sum of per-position z-scores, full pool.
///
/// Sorting is stable, so input order breaks ties. An empty pool yields an
/// empty list.
pub fn score(
    players: &[PlayerRecord],
    position: Position,
    weights: &WeightVector,
    mode: ScoringMode,
) -> Vec<ScoredPlayer> {
    let pool = position_pool(players, position);
    if pool.is_empty() {
        return Vec::new();
    }

    let stats = match mode {
        ScoringMode::Raw => BTreeMap::new(),
        ScoringMode::Standardized => compute_stats(&pool, &weights.keys()),
    };

    let mut scored: Vec<ScoredPlayer> = pool
        .into_iter()
        .map(|player| {
            let score = contributions(player, &stats, weights, mode)
                .iter()
                .map(|(_, c)| c)
                .sum();
            ScoredPlayer {
                player: player.clone(),
                score,
                rank: None,
            }
        })
        .collect();

    // Sort descending by score
    scored.sort_by(|a, b| descending(a.score, b.score));

    if mode == ScoringMode::Raw {
        scored.truncate(RAW_LEADERBOARD_SIZE);
    }

    scored
}

/// Score a position and keep the top `size` players, whatever the mode.
pub fn leaderboard(
    players: &[PlayerRecord],
    position: Position,
    weights: &WeightVector,
    mode: ScoringMode,
    size: usize,
) -> Vec<ScoredPlayer> {
    let mut board = score(players, position, weights, mode);
    board.truncate(size);
    board
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
