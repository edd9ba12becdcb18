// Derived leaderboard views: team comparison and the outlier threshold.

use crate::player::ScoredPlayer;
use crate::scoring::{compute_pool_stats, descending};
use serde::Serialize;

/// Average score and player count for one team on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub team: String,
    /// Mean score, rounded to two decimals for display.
    pub avg_score: f64,
    pub players: usize,
}

/// Group a leaderboard by team, sorted descending by average score.
///
/// Teams with equal averages keep the order in which they first appear on
/// the board.
pub fn team_comparison(board: &[ScoredPlayer]) -> Vec<TeamAggregate> {
    // (team, total, count) in first-seen order
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    for entry in board {
        let team = entry.player.team.as_str();
        match groups.iter_mut().find(|(t, ..)| *t == team) {
            Some((_, total, count)) => {
                *total += entry.score;
                *count += 1;
            }
            None => groups.push((team, entry.score, 1)),
        }
    }

    let mut teams: Vec<TeamAggregate> = groups
        .into_iter()
        .map(|(team, total, count)| TeamAggregate {
            team: team.to_string(),
            avg_score: round2(total / count as f64),
            players: count,
        })
        .collect();

    teams.sort_by(|a, b| descending(a.avg_score, b.avg_score));
    teams
}

/// One standard deviation above the mean leaderboard score.
///
/// Returns 0.0 for an empty board.
pub fn outlier_threshold(board: &[ScoredPlayer]) -> f64 {
    if board.is_empty() {
        return 0.0;
    }
    let scores: Vec<f64> = board.iter().map(|p| p.score).collect();
    let stats = compute_pool_stats(&scores);
    stats.mean + stats.std_dev
}

/// Players scoring strictly above `outlier_threshold`.
pub fn outliers(board: &[ScoredPlayer]) -> Vec<&ScoredPlayer> {
    let threshold = outlier_threshold(board);
    board.iter().filter(|p| p.score > threshold).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
