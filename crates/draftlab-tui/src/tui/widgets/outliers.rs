// Outlier view: draft pick vs score scatter for the active board, with a
// horizontal line at the outlier threshold (mean + one std dev).

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use draftlab_core::ScoredPlayer;

use crate::tui::ViewState;

/// Axis bounds as `(x, y)`.
pub type Bounds = ([f64; 2], [f64; 2]);

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let board = state.active_board();
    let (regular, flagged) = split_points(board, state.threshold);
    let (x_bounds, y_bounds) = chart_bounds(board, state.threshold);
    let threshold_line = [(x_bounds[0], state.threshold), (x_bounds[1], state.threshold)];

    let datasets = vec![
        Dataset::default()
            .name(format!("threshold {:.2}", state.threshold))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&threshold_line),
        Dataset::default()
            .name("players")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Magenta))
            .data(&regular),
        Dataset::default()
            .name("outliers")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&flagged),
    ];

    let x_axis = Axis::default()
        .title("Pick")
        .style(Style::default().fg(Color::Gray))
        .bounds(x_bounds)
        .labels([format!("{:.0}", x_bounds[0]), format!("{:.0}", x_bounds[1])]);
    let y_axis = Axis::default()
        .title("Score")
        .style(Style::default().fg(Color::Gray))
        .bounds(y_bounds)
        .labels([format!("{:.1}", y_bounds[0]), format!("{:.1}", y_bounds[1])]);

    let title = format!(
        " {}: Outlier View (Pick vs Score) ",
        state.active_position.code()
    );
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// `(pick, score)` points split into those at or below the threshold and
/// those strictly above it.
pub fn split_points(
    board: &[ScoredPlayer],
    threshold: f64,
) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    board
        .iter()
        .map(|p| (f64::from(p.player.draft_pick), p.score))
        .partition(|&(_, score)| score <= threshold)
}

/// Bounds covering every point and the threshold, padded so nothing sits
/// on the border.
pub fn chart_bounds(board: &[ScoredPlayer], threshold: f64) -> Bounds {
    if board.is_empty() {
        return ([0.0, 1.0], [threshold - 1.0, threshold + 1.0]);
    }

    let picks = board.iter().map(|p| f64::from(p.player.draft_pick));
    let x_min = picks.clone().fold(f64::INFINITY, f64::min);
    let x_max = picks.fold(f64::NEG_INFINITY, f64::max);

    let scores = board.iter().map(|p| p.score).chain(std::iter::once(threshold));
    let y_min = scores.clone().fold(f64::INFINITY, f64::min);
    let y_max = scores.fold(f64::NEG_INFINITY, f64::max);
    let y_pad = ((y_max - y_min) * 0.1).max(0.5);

    ([x_min - 1.0, x_max + 1.0], [y_min - y_pad, y_max + y_pad])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
