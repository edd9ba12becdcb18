// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` mirroring the latest `LabSnapshot` plus local
// cursor state. The app task pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::BTreeMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use draftlab_core::config::SliderConfig;
use draftlab_core::{MetricKey, Position, ScoredPlayer, ScoringMode, TeamAggregate, WeightVector};

use crate::protocol::{Breakdown, LabSnapshot, UiUpdate, UserCommand};
use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the app state for rendering.
pub struct ViewState {
    pub active_position: Position,
    pub mode: ScoringMode,
    pub show_original: bool,
    pub original_available: bool,
    pub is_original_formula: bool,
    pub player_count: usize,
    pub sliders: SliderConfig,
    /// Weights of the active position, one slider each.
    pub weights: WeightVector,
    pub boards: BTreeMap<Position, Vec<ScoredPlayer>>,
    pub teams: Vec<TeamAggregate>,
    pub threshold: f64,
    pub breakdown: Option<Breakdown>,
    /// Index of the highlighted slider.
    pub selected_metric: usize,
    /// Last notice from the app task.
    pub notice: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            active_position: Position::Guard,
            mode: ScoringMode::default(),
            show_original: false,
            original_available: false,
            is_original_formula: true,
            player_count: 0,
            sliders: SliderConfig::default(),
            weights: WeightVector::new(),
            boards: BTreeMap::new(),
            teams: Vec::new(),
            threshold: 0.0,
            breakdown: None,
            selected_metric: 0,
            notice: None,
        }
    }
}

impl ViewState {
    /// Replace mirrored fields with a fresh snapshot. Cursor state is kept,
    /// clamped to the new slider count.
    pub fn apply_snapshot(&mut self, snapshot: LabSnapshot) {
        self.active_position = snapshot.active_position;
        self.mode = snapshot.mode;
        self.show_original = snapshot.show_original;
        self.original_available = snapshot.original_available;
        self.is_original_formula = snapshot.is_original_formula;
        self.player_count = snapshot.player_count;
        self.sliders = snapshot.sliders;
        self.weights = snapshot.weights;
        self.boards = snapshot.boards;
        self.teams = snapshot.teams;
        self.threshold = snapshot.threshold;
        self.breakdown = snapshot.breakdown;
        self.selected_metric = self
            .selected_metric
            .min(self.weights.len().saturating_sub(1));
    }

    /// Metric under the slider cursor, if the active vector has any.
    pub fn selected_key(&self) -> Option<MetricKey> {
        self.weights.keys().get(self.selected_metric).copied()
    }

    pub fn active_board(&self) -> &[ScoredPlayer] {
        self.boards
            .get(&self.active_position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Notice(text) => state.notice = Some(text),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::sliders::render(frame, layout.sliders, state);
    for (pos, area) in Position::ALL.iter().zip(layout.boards) {
        widgets::leaderboard::render(frame, area, state, *pos);
    }
    widgets::teams::render(frame, layout.teams, state);
    widgets::outliers::render(frame, layout.outliers, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | 1-3/Tab:Position | ↑↓:Metric | ←→:Adjust | 0:Zero | r/R:Reset | m:Mode | o:Original | e:Export";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app task goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
