/// Keyboard to session-action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use voxcube_core::{Action, Axis, Direction};

/// Translate a key press into a session action.
///
/// Controls:
///   - W/S, A/D: move the cube along Y and X
///   - Q/E: move the cube along Z
///   - X/Y/Z: rotate one step in that angle slot
///   - Up/Down: grow/shrink
///   - Backspace: reset
///   - Esc or Ctrl+C: quit
pub fn map_key(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match event.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Action::Move(Axis::Y, Direction::Negative),
            's' => Action::Move(Axis::Y, Direction::Positive),
            'a' => Action::Move(Axis::X, Direction::Negative),
            'd' => Action::Move(Axis::X, Direction::Positive),
            'q' => Action::Move(Axis::Z, Direction::Positive),
            'e' => Action::Move(Axis::Z, Direction::Negative),
            'x' => Action::Rotate(Axis::X),
            'y' => Action::Rotate(Axis::Y),
            'z' => Action::Rotate(Axis::Z),
            _ => return None,
        },
        KeyCode::Up => Action::Grow,
        KeyCode::Down => Action::Shrink,
        KeyCode::Backspace => Action::Reset,
        _ => return None,
    };
    Some(action)
}
