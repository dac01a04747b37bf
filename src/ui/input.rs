use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::counter::{Action, CounterState};

/// What the UI loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    Perform(Action),
    ChangeTheme,
}

/// Map a key to an action. Remote actions are dropped while the counter is busy.
pub fn handle_key(key: KeyEvent, state: &CounterState) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => InputAction::Quit,
            _ => InputAction::None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return InputAction::Quit,
        KeyCode::Char('t') => return InputAction::ChangeTheme,
        KeyCode::Char('i') | KeyCode::Char('+') | KeyCode::Enter => Action::Increment,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('f') => Action::Refresh,
        _ => return InputAction::None,
    };

    if state.is_busy() {
        tracing::debug!(action = action.label(), "Ignoring key while busy");
        return InputAction::None;
    }
    InputAction::Perform(action)
}
