// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into `UserCommand`s for the app task, or
// into local `ViewState` changes (slider cursor movement).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use draftlab_core::Position;

use super::ViewState;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app task, `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release for each keypress
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        // Position tabs
        KeyCode::Char('1') => Some(UserCommand::SelectPosition(Position::Guard)),
        KeyCode::Char('2') => Some(UserCommand::SelectPosition(Position::Forward)),
        KeyCode::Char('3') => Some(UserCommand::SelectPosition(Position::Center)),
        KeyCode::Tab => Some(UserCommand::CyclePosition),

        // Slider cursor
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected_metric = view_state.selected_metric.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = view_state.weights.len().saturating_sub(1);
            view_state.selected_metric = (view_state.selected_metric + 1).min(last);
            None
        }

        // Slider value
        KeyCode::Left | KeyCode::Char('h') => view_state
            .selected_key()
            .map(|metric| UserCommand::AdjustWeight { metric, steps: -1 }),
        KeyCode::Right | KeyCode::Char('l') => view_state
            .selected_key()
            .map(|metric| UserCommand::AdjustWeight { metric, steps: 1 }),
        KeyCode::Char('0') => view_state.selected_key().map(UserCommand::ZeroWeight),
        KeyCode::Char('r') => Some(UserCommand::ResetPosition),
        KeyCode::Char('R') => Some(UserCommand::ResetAll),

        KeyCode::Char('m') => Some(UserCommand::ToggleMode),
        KeyCode::Char('o') => Some(UserCommand::ToggleOriginal),
        KeyCode::Char('e') => Some(UserCommand::Export),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;
    use crossterm::event::KeyEventState;
    use draftlab_core::MetricKey;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut state = sample_state();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), Some(UserCommand::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = sample_state();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release, &mut state), None);
    }

    #[test]
    fn number_keys_select_positions() {
        let mut state = sample_state();
        assert_eq!(
            handle_key(key(KeyCode::Char('3')), &mut state),
            Some(UserCommand::SelectPosition(Position::Center))
        );
        assert_eq!(
            handle_key(key(KeyCode::Tab), &mut state),
            Some(UserCommand::CyclePosition)
        );
    }

    #[test]
    fn cursor_moves_within_sliders() {
        let mut state = sample_state();
        assert_eq!(handle_key(key(KeyCode::Up), &mut state), None);
        assert_eq!(state.selected_metric, 0);

        for _ in 0..20 {
            handle_key(key(KeyCode::Down), &mut state);
        }
        assert_eq!(state.selected_metric, state.weights.len() - 1);
        assert_eq!(state.selected_key(), Some(MetricKey::Availability));
    }

    #[test]
    fn arrows_adjust_selected_metric() {
        let mut state = sample_state();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Right), &mut state),
            Some(UserCommand::AdjustWeight {
                metric: MetricKey::Trb,
                steps: 1
            })
        );
        assert_eq!(
            handle_key(key(KeyCode::Left), &mut state),
            Some(UserCommand::AdjustWeight {
                metric: MetricKey::Trb,
                steps: -1
            })
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('0')), &mut state),
            Some(UserCommand::ZeroWeight(MetricKey::Trb))
        );
    }

    #[test]
    fn slider_keys_need_a_metric() {
        let mut state = crate::tui::ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Right), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Char('0')), &mut state), None);
    }

    #[test]
    fn reset_and_toggle_keys() {
        let mut state = sample_state();
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::ResetPosition)
        );
        let shift_r = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(handle_key(shift_r, &mut state), Some(UserCommand::ResetAll));
        assert_eq!(
            handle_key(key(KeyCode::Char('m')), &mut state),
            Some(UserCommand::ToggleMode)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('o')), &mut state),
            Some(UserCommand::ToggleOriginal)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('e')), &mut state),
            Some(UserCommand::Export)
        );
    }

    #[test]
    fn unknown_keys_do_nothing() {
        let mut state = sample_state();
        assert_eq!(handle_key(key(KeyCode::Char('z')), &mut state), None);
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
    }
}
