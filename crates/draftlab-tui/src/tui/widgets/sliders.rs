// Weight slider panel: one row per metric of the active position.
//
// Each row shows the metric label, a bar spanning the slider range with a
// zero tick, the weight to two decimals, and what that metric adds to the
// board leader's score. The cursor row is highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use draftlab_core::MetricKey;

use crate::protocol::Breakdown;
use crate::tui::ViewState;

const BAR_WIDTH: usize = 17;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let sliders = state.sliders;

    let rows: Vec<Row> = if state.weights.is_empty() {
        vec![Row::new(vec![Cell::from("  No weights for this position")])]
    } else {
        state
            .weights
            .iter()
            .enumerate()
            .map(|(i, (metric, weight))| {
                let selected = i == state.selected_metric;
                let style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else if weight < 0.0 {
                    Style::default().fg(Color::LightRed)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(metric.label()),
                    Cell::from(slider_bar(weight, sliders.min, sliders.max, BAR_WIDTH)),
                    Cell::from(format_weight(weight)),
                    Cell::from(contribution_text(state.breakdown.as_ref(), metric)),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Min(12),
        Constraint::Length(BAR_WIDTH as u16),
        Constraint::Length(6),
        Constraint::Length(7),
    ];

    let label = state.active_position.label();
    let title = match state.breakdown {
        Some(ref b) => format!(" {label} weights | leader: {} ", b.player),
        None => format!(" {label} weights "),
    };
    let table = Table::new(rows, widths).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title),
    );
    frame.render_widget(table, area);
}

/// Text slider of `width` cells: `─` track, `┼` at zero when zero is in
/// range, `●` at the value. Values outside the range pin to the ends.
pub fn slider_bar(value: f64, min: f64, max: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let cell = |v: f64| -> usize {
        if max <= min {
            return 0;
        }
        let frac = ((v - min) / (max - min)).clamp(0.0, 1.0);
        (frac * (width - 1) as f64).round() as usize
    };

    let mut track = vec!['─'; width];
    if (min..=max).contains(&0.0) {
        track[cell(0.0)] = '┼';
    }
    track[cell(value)] = '●';
    track.into_iter().collect()
}

/// Leader's contribution for `metric`, blank when there is no breakdown.
pub fn contribution_text(breakdown: Option<&Breakdown>, metric: MetricKey) -> String {
    breakdown
        .and_then(|b| b.contributions.iter().find(|(k, _)| *k == metric))
        .map(|(_, c)| format!("{c:+.2}"))
        .unwrap_or_default()
}

/// Signed, two decimals: `+1.20`, `-0.70`.
pub fn format_weight(weight: f64) -> String {
    format!("{weight:+.2}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
