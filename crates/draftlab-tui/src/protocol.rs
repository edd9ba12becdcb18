// Messages exchanged between the TUI and the app task.
//
// The TUI sends `UserCommand`s; the app task applies them to `LabState`
// and answers with `UiUpdate`s carrying everything the dashboard renders.

use std::collections::BTreeMap;

use draftlab_core::config::SliderConfig;
use draftlab_core::{MetricKey, Position, ScoredPlayer, ScoringMode, TeamAggregate, WeightVector};

/// Commands sent from the TUI to the app task.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SelectPosition(Position),
    CyclePosition,
    /// Move one slider by `steps` slider steps (negative moves down).
    AdjustWeight { metric: MetricKey, steps: i32 },
    ZeroWeight(MetricKey),
    ResetPosition,
    ResetAll,
    ToggleMode,
    ToggleOriginal,
    Export,
    Quit,
}

/// Updates pushed from the app task to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<LabSnapshot>),
    /// One-line message for the status bar (export results, refusals).
    Notice(String),
}

/// Everything the dashboard needs to draw one frame.
#[derive(Debug, Clone)]
pub struct LabSnapshot {
    pub active_position: Position,
    pub mode: ScoringMode,
    /// Precomputed leaderboards are on screen instead of live scores.
    pub show_original: bool,
    pub original_available: bool,
    pub is_original_formula: bool,
    pub player_count: usize,
    pub sliders: SliderConfig,
    /// Weights of the active position.
    pub weights: WeightVector,
    /// Displayed board for every position.
    pub boards: BTreeMap<Position, Vec<ScoredPlayer>>,
    /// Team comparison of the active board.
    pub teams: Vec<TeamAggregate>,
    /// Outlier threshold of the active board.
    pub threshold: f64,
    /// Score breakdown of the active board's leader (live boards only).
    pub breakdown: Option<Breakdown>,
}

/// Weighted contribution of each slider metric to one player's score.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub player: String,
    pub contributions: Vec<(MetricKey, f64)>,
}
