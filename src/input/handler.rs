use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, SessionStatus};

/// What a key press asks the game to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

/// Maps terminal key events to game commands
///
/// The mapping depends on the session: while it is active only steering and
/// quitting do anything, once it is over any key other than a quit key
/// starts a new round.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, status: SessionStatus) -> KeyAction {
        if Self::is_quit(&key) {
            return KeyAction::Quit;
        }

        match status {
            SessionStatus::Active => Self::steering(key.code)
                .map(KeyAction::Steer)
                .unwrap_or(KeyAction::None),
            SessionStatus::Over => KeyAction::Restart,
        }
    }

    fn is_quit(key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
    }

    /// Arrow keys and WASD, either case
    fn steering(code: KeyCode) -> Option<Direction> {
        let direction = match code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Direction::Up,
            KeyCode::Down | KeyCode::Char('s' | 'S') => Direction::Down,
            KeyCode::Left | KeyCode::Char('a' | 'A') => Direction::Left,
            KeyCode::Right | KeyCode::Char('d' | 'D') => Direction::Right,
            _ => return None,
        };
        Some(direction)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn active(key: KeyEvent) -> KeyAction {
        InputHandler::new().handle_key_event(key, SessionStatus::Active)
    }

    fn over(key: KeyEvent) -> KeyAction {
        InputHandler::new().handle_key_event(key, SessionStatus::Over)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(active(press(KeyCode::Up)), KeyAction::Steer(Direction::Up));
        assert_eq!(active(press(KeyCode::Down)), KeyAction::Steer(Direction::Down));
        assert_eq!(active(press(KeyCode::Left)), KeyAction::Steer(Direction::Left));
        assert_eq!(active(press(KeyCode::Right)), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(active(press(KeyCode::Char('w'))), KeyAction::Steer(Direction::Up));
        assert_eq!(active(press(KeyCode::Char('a'))), KeyAction::Steer(Direction::Left));
        assert_eq!(active(press(KeyCode::Char('s'))), KeyAction::Steer(Direction::Down));
        assert_eq!(active(press(KeyCode::Char('d'))), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(active(w_upper), KeyAction::Steer(Direction::Up));
    }

    #[test]
    fn test_quit_keys_in_any_state() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);

        for key in [press(KeyCode::Char('q')), q_upper, press(KeyCode::Esc), ctrl_c] {
            assert_eq!(active(key), KeyAction::Quit);
            assert_eq!(over(key), KeyAction::Quit);
        }
    }

    #[test]
    fn test_no_restart_while_active() {
        assert_eq!(active(press(KeyCode::Char('r'))), KeyAction::None);
        assert_eq!(active(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(active(press(KeyCode::Enter)), KeyAction::None);
    }

    #[test]
    fn test_any_key_restarts_when_over() {
        assert_eq!(over(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(over(press(KeyCode::Char('x'))), KeyAction::Restart);
        assert_eq!(over(press(KeyCode::Up)), KeyAction::Restart);
        assert_eq!(over(press(KeyCode::Enter)), KeyAction::Restart);
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        assert_eq!(active(press(KeyCode::Char('c'))), KeyAction::None);
    }
}
