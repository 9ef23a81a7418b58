//! Keyboard mapping for manual driving
//!
//! Arrow keys and WASD (either case) drive; space stops.

use robot_protocol::Direction;

/// A key as seen by the panel, independent of the windowing toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Char(char),
}

impl KeyInput {
    /// Direction driven while this key is held, ignoring stop
    fn drive_direction(&self) -> Option<Direction> {
        match self {
            KeyInput::ArrowUp => Some(Direction::Forward),
            KeyInput::ArrowDown => Some(Direction::Back),
            KeyInput::ArrowLeft => Some(Direction::Left),
            KeyInput::ArrowRight => Some(Direction::Right),
            KeyInput::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Forward),
                's' => Some(Direction::Back),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            KeyInput::Space => None,
        }
    }
}

/// Direction emitted on key-down, including space for stop
pub fn key_down_direction(key: KeyInput) -> Option<Direction> {
    match key {
        KeyInput::Space => Some(Direction::Stop),
        other => other.drive_direction(),
    }
}

/// Direction whose control is released on key-up. Space has no release.
pub fn key_up_direction(key: KeyInput) -> Option<Direction> {
    key.drive_direction()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_case_insensitive() {
        for (lower, upper, dir) in [
            ('w', 'W', Direction::Forward),
            ('s', 'S', Direction::Back),
            ('a', 'A', Direction::Left),
            ('d', 'D', Direction::Right),
        ] {
            assert_eq!(key_down_direction(KeyInput::Char(lower)), Some(dir));
            assert_eq!(key_down_direction(KeyInput::Char(upper)), Some(dir));
        }
    }

    #[test]
    fn test_arrows() {
        assert_eq!(key_down_direction(KeyInput::ArrowUp), Some(Direction::Forward));
        assert_eq!(key_down_direction(KeyInput::ArrowDown), Some(Direction::Back));
        assert_eq!(key_down_direction(KeyInput::ArrowLeft), Some(Direction::Left));
        assert_eq!(key_down_direction(KeyInput::ArrowRight), Some(Direction::Right));
    }

    #[test]
    fn test_space_only_on_key_down() {
        assert_eq!(key_down_direction(KeyInput::Space), Some(Direction::Stop));
        assert_eq!(key_up_direction(KeyInput::Space), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(key_down_direction(KeyInput::Char('q')), None);
        assert_eq!(key_up_direction(KeyInput::Char('x')), None);
    }
}
