// Status bar widget: position tabs, scoring mode, formula indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use draftlab_core::Position;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [tabs] | mode | formula indicator | players [| notice]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(position_spans(state.active_position));

    let separator = || Span::styled(" | ", Style::default().fg(Color::Gray));

    spans.push(separator());
    spans.push(Span::styled(
        format!("Mode: {}", state.mode.label()),
        Style::default().fg(Color::White),
    ));

    spans.push(separator());
    let (label, color) = formula_indicator(state.is_original_formula);
    spans.push(Span::styled(label, Style::default().fg(color)));

    if state.show_original {
        spans.push(separator());
        spans.push(Span::styled(
            "Precomputed boards",
            Style::default().fg(Color::Cyan),
        ));
    }

    spans.push(separator());
    spans.push(Span::styled(
        format!("{} players", state.player_count),
        Style::default().fg(Color::White),
    ));

    if let Some(ref notice) = state.notice {
        spans.push(separator());
        spans.push(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Indicator text and color for the original-formula check.
pub fn formula_indicator(is_original: bool) -> (&'static str, Color) {
    if is_original {
        ("● Original formula", Color::Green)
    } else {
        ("○ Custom formula", Color::Yellow)
    }
}

/// Position tabs with the active one highlighted, e.g. "[1:G] [2:F] [3:C]".
pub fn position_spans(active: Position) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, pos) in Position::ALL.iter().enumerate() {
        let style = if *pos == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, pos.code()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
