//! Translation of key events into editor intents.

use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::text::{Direction, EditIntent};

/// A caret movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavIntent {
    pub direction: Direction,
    /// Move the focus end only (Shift).
    pub extend: bool,
    /// Jump to the visual line or document boundary (Meta).
    pub jump: bool,
}

impl NavIntent {
    /// Plain arrow step.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self {
            direction,
            extend: false,
            jump: false,
        }
    }

    #[must_use]
    pub const fn extending(self) -> Self {
        Self {
            extend: true,
            ..self
        }
    }

    #[must_use]
    pub const fn jumping(self) -> Self {
        Self { jump: true, ..self }
    }

    /// Whether this moves the caret through visual rows using the remembered
    /// x-coordinate.
    #[must_use]
    pub const fn is_vertical_step(self) -> bool {
        self.direction.is_vertical() && !self.jump
    }
}

/// Anything the editor session can process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Navigate(NavIntent),
    Edit(EditIntent),
}

impl Intent {
    /// Map a key to an intent.
    ///
    /// Arrows become navigation (Shift extends, Meta jumps), Backspace and
    /// Enter become edits. Character keys produce nothing; typed text arrives
    /// as [`Event::Text`](crate::input::Event::Text).
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let direction = match key.code {
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Backspace => return Some(Self::Edit(EditIntent::Backspace)),
            KeyCode::Enter => return Some(Self::Edit(EditIntent::Enter)),
            _ => return None,
        };
        Some(Self::Navigate(NavIntent {
            direction,
            extend: key.shift(),
            jump: key.meta(),
        }))
    }
}

impl From<NavIntent> for Intent {
    fn from(intent: NavIntent) -> Self {
        Self::Navigate(intent)
    }
}

impl From<EditIntent> for Intent {
    fn from(intent: EditIntent) -> Self {
        Self::Edit(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    #[test]
    fn test_arrows_map_to_navigation() {
        let intent = Intent::from_key(&KeyEvent::key(KeyCode::Up));
        assert_eq!(intent, Some(NavIntent::step(Direction::Up).into()));

        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT | KeyModifiers::META);
        let intent = Intent::from_key(&key);
        assert_eq!(
            intent,
            Some(NavIntent::step(Direction::Left).extending().jumping().into())
        );
    }

    #[test]
    fn test_edit_keys() {
        assert_eq!(
            Intent::from_key(&KeyEvent::key(KeyCode::Backspace)),
            Some(Intent::Edit(EditIntent::Backspace))
        );
        assert_eq!(
            Intent::from_key(&KeyEvent::key(KeyCode::Enter)),
            Some(Intent::Edit(EditIntent::Enter))
        );
    }

    #[test]
    fn test_other_keys_have_no_intent() {
        assert_eq!(Intent::from_key(&KeyEvent::char('a')), None);
        assert_eq!(Intent::from_key(&KeyEvent::key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_vertical_step() {
        assert!(NavIntent::step(Direction::Down).is_vertical_step());
        assert!(!NavIntent::step(Direction::Down).jumping().is_vertical_step());
        assert!(!NavIntent::step(Direction::Left).is_vertical_step());
    }
}
