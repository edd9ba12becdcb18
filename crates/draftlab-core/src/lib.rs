// Library root: player model, formula weights, scoring engine, derived
// leaderboard views, dataset loading and configuration.

pub mod aggregate;
pub mod config;
pub mod formula;
pub mod loader;
pub mod player;
pub mod scoring;

pub use aggregate::{outlier_threshold, outliers, team_comparison, TeamAggregate};
pub use formula::{default_weights, is_original_formula, FormulaWeights, WeightVector};
pub use player::{MetricKey, Metrics, PlayerRecord, Position, ScoredPlayer};
pub use scoring::{compute_stats, leaderboard, score, PoolStats, ScoringMode};
