// Team comparison widget: average score per team on the active board.
//
// Rendered as a table with a text bar scaled to the largest absolute
// average; negative averages draw in red.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::tui::ViewState;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![
        Cell::from("Team"),
        Cell::from("Avg"),
        Cell::from("N"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let max_abs = state
        .teams
        .iter()
        .map(|t| t.avg_score.abs())
        .fold(0.0_f64, f64::max);

    let rows: Vec<Row> = if state.teams.is_empty() {
        vec![Row::new(vec![Cell::from("  No team data")])]
    } else {
        state
            .teams
            .iter()
            .map(|team| {
                let color = if team.avg_score < 0.0 {
                    Color::Red
                } else {
                    Color::Blue
                };
                Row::new(vec![
                    Cell::from(team.team.clone()),
                    Cell::from(format!("{:.2}", team.avg_score)),
                    Cell::from(team.players.to_string()),
                    Cell::from(bar(team.avg_score, max_abs, BAR_WIDTH))
                        .style(Style::default().fg(color)),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(3),
        Constraint::Min(4),
    ];

    let title = format!(" {}: Team Comparison ", state.active_position.code());
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title),
    );
    frame.render_widget(table, area);
}

/// Bar of `█` proportional to `|value| / max_abs`, at least one cell for a
/// non-zero value.
pub fn bar(value: f64, max_abs: f64, width: usize) -> String {
    if max_abs <= 0.0 || value == 0.0 {
        return String::new();
    }
    let cells = ((value.abs() / max_abs) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
