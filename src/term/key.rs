//! Decoded input events.

use std::fmt;
use std::str::FromStr;

use super::TermError;

/// A decoded key or mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    Space,
    Tab,
    Enter,
    Backspace,
    Delete,
    Insert,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    /// A function key, `F(1)` through `F(12)`
    F(u8),
    /// A control chord, stored as the lowercase letter (`Ctrl('s')`)
    Ctrl(char),
    LeftPress,
    LeftRelease,
    WheelUp,
    WheelDown,
    /// The terminal changed size
    Resize,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Space => f.write_str("Space"),
            Self::Tab => f.write_str("Tab"),
            Self::Enter => f.write_str("Enter"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::Insert => f.write_str("Insert"),
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::PageUp => f.write_str("Page Up"),
            Self::PageDown => f.write_str("Page Down"),
            Self::Escape => f.write_str("Escape"),
            Self::F(n) => write!(f, "F{n}"),
            Self::Ctrl(c) => write!(f, "Ctrl-{c}"),
            Self::LeftPress => f.write_str("Left press"),
            Self::LeftRelease => f.write_str("Left release"),
            Self::WheelUp => f.write_str("Mouse wheel up"),
            Self::WheelDown => f.write_str("Mouse wheel down"),
            Self::Resize => f.write_str("Resize"),
        }
    }
}

impl FromStr for Key {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "Space" => Self::Space,
            "Tab" => Self::Tab,
            "Enter" | "Return" => Self::Enter,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Left" => Self::Left,
            "Right" => Self::Right,
            "Up" => Self::Up,
            "Down" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "Page Up" | "PgUp" => Self::PageUp,
            "Page Down" | "PgDn" => Self::PageDown,
            "Escape" | "Esc" => Self::Escape,
            "Left press" => Self::LeftPress,
            "Left release" => Self::LeftRelease,
            "Mouse wheel up" => Self::WheelUp,
            "Mouse wheel down" => Self::WheelDown,
            "Resize" => Self::Resize,
            _ => return parse_compound(s),
        };
        Ok(key)
    }
}

fn parse_compound(s: &str) -> Result<Key, TermError> {
    let unknown = || TermError::UnknownKey(s.to_string());
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => return Ok(Key::Char(c)),
        (None, _) => return Err(unknown()),
        _ => {}
    }
    if let Some(rest) = s.strip_prefix("Ctrl-") {
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key::Ctrl(c.to_ascii_lowercase())),
            _ => Err(unknown()),
        };
    }
    if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(Key::F(n));
        }
    }
    Err(unknown())
}

/// One input event: a key plus mouse coordinates for mouse actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// 0-indexed `(column, row)`; present only for mouse events.
    pub mouse: Option<(u16, u16)>,
}

impl KeyEvent {
    pub const fn key(key: Key) -> Self {
        Self { key, mouse: None }
    }

    pub const fn mouse(key: Key, column: u16, row: u16) -> Self {
        Self {
            key,
            mouse: Some((column, row)),
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}
