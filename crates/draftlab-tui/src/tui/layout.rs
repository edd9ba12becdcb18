// Screen layout: panel arrangement and sizing.
//
// +---------------------------------------------------------------+
// | Status Bar (1 row)                                            |
// +----------------+----------------------------------------------+
// | Sliders (30%)  | Guard board    | Forward board | Center board |
// |                +----------------+---------------+--------------+
// |                | Team comparison         | Outliers            |
// +----------------+----------------------------------------------+
// | Help Bar (1 row)                                              |
// +---------------------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Position tabs, scoring mode, formula indicator.
    pub status_bar: Rect,
    /// Weight sliders for the active position.
    pub sliders: Rect,
    /// One leaderboard per position, in `Position::ALL` order.
    pub boards: [Rect; 3],
    pub teams: Rect,
    /// Pick vs score scatter.
    pub outliers: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(vertical[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    let boards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(right[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(right[1]);

    AppLayout {
        status_bar: vertical[0],
        sliders: body[0],
        boards: [boards[0], boards[1], boards[2]],
        teams: charts[0],
        outliers: charts[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
