// Application state and the command loop.
//
// `LabState` owns the dataset, the live weight set and the derived
// leaderboards. The app task applies `UserCommand`s from the TUI, rescoring
// whenever weights or mode change, and pushes a fresh `LabSnapshot` back.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use draftlab_core::config::Config;
use draftlab_core::formula::{default_weights, default_weights_for};
use draftlab_core::scoring::{compute_stats, contributions, position_pool};
use draftlab_core::{
    is_original_formula, leaderboard, outlier_threshold, team_comparison, FormulaWeights,
    MetricKey, PlayerRecord, Position, ScoredPlayer, ScoringMode,
};

use crate::export::{write_export, BoardSource, ExportError, LeaderboardExport};
use crate::protocol::{Breakdown, LabSnapshot, UiUpdate, UserCommand};

/// Precomputed leaderboards keyed by position.
pub type OriginalBoards = BTreeMap<Position, Vec<ScoredPlayer>>;

// ---------------------------------------------------------------------------
// LabState
// ---------------------------------------------------------------------------

pub struct LabState {
    pub config: Config,
    pub players: Vec<PlayerRecord>,
    pub weights: FormulaWeights,
    pub active_position: Position,
    pub mode: ScoringMode,
    pub original_boards: Option<OriginalBoards>,
    pub show_original: bool,
    /// Live leaderboards, recomputed after every weight or mode change.
    pub boards: BTreeMap<Position, Vec<ScoredPlayer>>,
    pub export_dir: PathBuf,
}

impl LabState {
    pub fn new(
        config: Config,
        players: Vec<PlayerRecord>,
        original_boards: Option<OriginalBoards>,
        export_dir: PathBuf,
    ) -> Self {
        let mut state = LabState {
            weights: config.weights.clone(),
            mode: config.scoring.mode,
            config,
            players,
            active_position: Position::Guard,
            original_boards,
            show_original: false,
            boards: BTreeMap::new(),
            export_dir,
        };
        state.recompute();
        state
    }

    /// Rescore every position with the current weights and mode.
    pub fn recompute(&mut self) {
        let size = self.config.scoring.leaderboard_size;
        for pos in Position::ALL {
            let weights = self.weights.for_position(pos);
            let board = leaderboard(&self.players, pos, &weights, self.mode, size);
            self.boards.insert(pos, board);
        }
        debug!(mode = ?self.mode, "leaderboards recomputed");
    }

    /// Board shown for `position`: precomputed when that view is on,
    /// live otherwise.
    pub fn displayed_board(&self, position: Position) -> &[ScoredPlayer] {
        if self.show_original {
            if let Some(board) = self.original_boards.as_ref().and_then(|b| b.get(&position)) {
                return board;
            }
        }
        self.boards.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_board(&self) -> &[ScoredPlayer] {
        self.displayed_board(self.active_position)
    }

    pub fn is_original_formula(&self) -> bool {
        is_original_formula(&self.weights)
    }

    pub fn select_position(&mut self, position: Position) {
        self.active_position = position;
    }

    pub fn cycle_position(&mut self) {
        self.active_position = self.active_position.next();
    }

    /// Move the active position's `metric` slider by `steps` steps, clamped
    /// to the slider range. Returns false when the metric has no slider.
    pub fn adjust_weight(&mut self, metric: MetricKey, steps: i32) -> bool {
        let sliders = self.config.sliders;
        let Some(vector) = self.weights.get_mut(self.active_position) else {
            return false;
        };
        let Some(current) = vector.get(metric) else {
            return false;
        };
        let next = (current + f64::from(steps) * sliders.step).clamp(sliders.min, sliders.max);
        vector.set(metric, next);
        self.recompute();
        true
    }

    pub fn zero_weight(&mut self, metric: MetricKey) -> bool {
        let Some(vector) = self.weights.get_mut(self.active_position) else {
            return false;
        };
        if !vector.contains(metric) {
            return false;
        }
        vector.set(metric, 0.0);
        self.recompute();
        true
    }

    /// Restore the preset vector for the active position.
    pub fn reset_position(&mut self) {
        self.weights
            .insert(self.active_position, default_weights_for(self.active_position));
        self.recompute();
    }

    /// Restore the preset formula for every position.
    pub fn reset_all(&mut self) {
        self.weights = default_weights();
        self.recompute();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.recompute();
    }

    /// Switch between live and precomputed boards. Returns false when no
    /// precomputed boards were loaded.
    pub fn toggle_original(&mut self) -> bool {
        if self.original_boards.is_none() {
            return false;
        }
        self.show_original = !self.show_original;
        true
    }

    /// Per-metric contributions for the leader of the active live board.
    /// `None` while precomputed boards are shown, since those carry no
    /// metrics.
    pub fn leader_breakdown(&self) -> Option<Breakdown> {
        if self.show_original {
            return None;
        }
        let leader = self.boards.get(&self.active_position)?.first()?;
        let weights = self.weights.for_position(self.active_position);
        let stats = match self.mode {
            ScoringMode::Raw => BTreeMap::new(),
            ScoringMode::Standardized => compute_stats(
                &position_pool(&self.players, self.active_position),
                &weights.keys(),
            ),
        };
        Some(Breakdown {
            player: leader.player.name.clone(),
            contributions: contributions(&leader.player, &stats, &weights, self.mode),
        })
    }

    pub fn snapshot(&self) -> LabSnapshot {
        let boards = Position::ALL
            .iter()
            .map(|&pos| (pos, self.displayed_board(pos).to_vec()))
            .collect();
        let active = self.active_board();
        LabSnapshot {
            active_position: self.active_position,
            mode: self.mode,
            show_original: self.show_original,
            original_available: self.original_boards.is_some(),
            is_original_formula: self.is_original_formula(),
            player_count: self.players.len(),
            sliders: self.config.sliders,
            weights: self.weights.for_position(self.active_position),
            boards,
            teams: team_comparison(active),
            threshold: outlier_threshold(active),
            breakdown: self.leader_breakdown(),
        }
    }

    /// Write the active board to `export_dir`.
    pub fn export(&self) -> Result<PathBuf, ExportError> {
        let weights = self.weights.for_position(self.active_position);
        let board = self.active_board();
        let export = LeaderboardExport {
            position: self.active_position,
            mode: self.mode,
            source: if self.show_original {
                BoardSource::Precomputed
            } else {
                BoardSource::Live
            },
            original_formula: self.is_original_formula(),
            weights: &weights,
            leaderboard: board,
            teams: team_comparison(board),
            outlier_threshold: outlier_threshold(board),
        };
        write_export(&self.export_dir, &export)
    }
}

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Apply one command. Returns a notice for the status bar when the command
/// produced one.
pub fn apply_command(state: &mut LabState, cmd: UserCommand) -> Option<String> {
    match cmd {
        UserCommand::SelectPosition(pos) => state.select_position(pos),
        UserCommand::CyclePosition => state.cycle_position(),
        UserCommand::AdjustWeight { metric, steps } => {
            state.adjust_weight(metric, steps);
        }
        UserCommand::ZeroWeight(metric) => {
            state.zero_weight(metric);
        }
        UserCommand::ResetPosition => {
            state.reset_position();
            return Some(format!("{} weights reset", state.active_position.label()));
        }
        UserCommand::ResetAll => {
            state.reset_all();
            return Some("All weights reset".to_string());
        }
        UserCommand::ToggleMode => {
            state.toggle_mode();
            info!("Scoring mode set to {}", state.mode.label());
        }
        UserCommand::ToggleOriginal => {
            if !state.toggle_original() {
                return Some("No precomputed leaderboards loaded".to_string());
            }
        }
        UserCommand::Export => {
            return Some(match state.export() {
                Ok(path) => {
                    info!("Exported leaderboard to {}", path.display());
                    format!("Exported {}", path.display())
                }
                Err(e) => {
                    warn!("Export failed: {}", e);
                    format!("Export failed: {e}")
                }
            });
        }
        UserCommand::Quit => {}
    }
    None
}

/// Run the app task until the TUI quits or drops its command sender.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: LabState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    if ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.snapshot())))
        .await
        .is_err()
    {
        return Ok(());
    }

    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == UserCommand::Quit {
            info!("Quit command received, shutting down");
            return Ok(());
        }

        let notice = apply_command(&mut state, cmd);
        let _ = ui_tx
            .send(UiUpdate::Snapshot(Box::new(state.snapshot())))
            .await;
        if let Some(text) = notice {
            let _ = ui_tx.send(UiUpdate::Notice(text)).await;
        }
    }

    info!("Command channel closed, shutting down");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
