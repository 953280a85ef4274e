//! Key mapping from terminal events to game commands.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a command. Key releases are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // Steering
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Some(Command::Steer(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(Command::Steer(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(Command::Steer(Direction::Right))
        }

        // Screen control
        KeyCode::Char('p' | 'P') => Some(Command::Pause),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(Command::Back),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), Some(Command::Steer(Direction::Up)));
        assert_eq!(press(KeyCode::Down), Some(Command::Steer(Direction::Down)));
        assert_eq!(press(KeyCode::Left), Some(Command::Steer(Direction::Left)));
        assert_eq!(press(KeyCode::Right), Some(Command::Steer(Direction::Right)));
    }

    #[test]
    fn test_letter_keys() {
        for (keys, dir) in [
            (['w', 'k'], Direction::Up),
            (['s', 'j'], Direction::Down),
            (['a', 'h'], Direction::Left),
            (['d', 'l'], Direction::Right),
        ] {
            for key in keys {
                assert_eq!(press(KeyCode::Char(key)), Some(Command::Steer(dir)));
                assert_eq!(
                    press(KeyCode::Char(key.to_ascii_uppercase())),
                    Some(Command::Steer(dir))
                );
            }
        }
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Char('p')), Some(Command::Pause));
        assert_eq!(press(KeyCode::Enter), Some(Command::Confirm));
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::Confirm));
        assert_eq!(press(KeyCode::Esc), Some(Command::Back));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handle_key_event(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
