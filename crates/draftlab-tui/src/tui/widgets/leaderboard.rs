// Leaderboard widget: ranked table for one position.
//
// Columns: #, Name, Team, Pick, Score. Players above the outlier threshold
// of the active board are highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use draftlab_core::{Position, ScoredPlayer};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, position: Position) {
    let board: &[ScoredPlayer] = state
        .boards
        .get(&position)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let active = position == state.active_position;

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Team"),
        Cell::from("Pick"),
        Cell::from("Score"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if board.is_empty() {
        vec![Row::new(vec![Cell::from(""), Cell::from("No players")])]
    } else {
        board
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if active && p.score > state.threshold {
                    Style::default().fg(Color::Magenta)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(display_rank(p, i).to_string()),
                    Cell::from(p.player.name.clone()),
                    Cell::from(p.player.team.clone()),
                    Cell::from(p.player.draft_pick.to_string()),
                    Cell::from(format_score(p.score)),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(7),
    ];

    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(board_title(position, state.show_original)),
    );
    frame.render_widget(table, area);
}

/// Precomputed rows carry their own rank; live rows are ranked by position.
pub fn display_rank(player: &ScoredPlayer, index: usize) -> u32 {
    player.rank.unwrap_or(index as u32 + 1)
}

pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

pub fn board_title(position: Position, show_original: bool) -> String {
    if show_original {
        format!(" {} ({}) [precomputed] ", position.label(), position.code())
    } else {
        format!(" {} ({}) ", position.label(), position.code())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
