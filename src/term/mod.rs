//! Terminal surface abstraction.
//!
//! The editor never talks to the terminal directly. Everything it needs
//! (cursor placement, region scrolling, line clearing, styled writes and
//! key input) goes through the [`Surface`] trait:
//! - [`backend`]: the real terminal, driven through crossterm
//! - [`recorder`]: an in-memory cell grid used by tests and benches
//! - [`style`]: text attributes and scoped styling
//! - [`key`]: decoded key events

pub mod backend;
pub mod key;
pub mod recorder;
pub mod style;

pub use backend::CrosstermSurface;
pub use key::{Key, KeyEvent};
pub use recorder::RecordingSurface;
pub use style::{Attr, AttrSet, StyleGuard, styled, with_attrs};

use std::str::FromStr;
use std::time::Duration;

/// Errors raised by a terminal surface.
///
/// Unknown mode, attribute and key names are caller contract violations,
/// so they surface immediately instead of being ignored.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("terminal I/O failed")]
    Io(#[from] std::io::Error),
    #[error("unknown clear mode: {0:?}")]
    UnknownClearMode(String),
    #[error("unknown text attribute: {0:?}")]
    UnknownAttribute(String),
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("no more input")]
    InputClosed,
}

/// Which part of the screen a clear operation erases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// From the cursor to the end of the screen
    Below,
    /// From the start of the screen to the cursor
    Above,
    /// The whole screen
    Screen,
    /// From the cursor to the end of the line
    Right,
    /// From the start of the line to the cursor
    Left,
    /// The whole current line
    Line,
}

impl FromStr for ClearMode {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "below" => Ok(Self::Below),
            "above" => Ok(Self::Above),
            "screen" => Ok(Self::Screen),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "line" => Ok(Self::Line),
            other => Err(TermError::UnknownClearMode(other.to_string())),
        }
    }
}

/// Hardware cursor shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    BlinkingBlock,
    SteadyBlock,
    BlinkingUnderline,
    SteadyUnderline,
    BlinkingBar,
    SteadyBar,
}

/// Primitive screen and keyboard operations, all 0-indexed.
pub trait Surface {
    /// Current width in cells. May change between calls after a resize.
    fn width(&self) -> u16;

    /// Current height in cells. May change between calls after a resize.
    fn height(&self) -> u16;

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<(), TermError>;

    fn hide_cursor(&mut self) -> Result<(), TermError>;

    fn show_cursor(&mut self) -> Result<(), TermError>;

    fn set_cursor_shape(&mut self, shape: CursorShape) -> Result<(), TermError>;

    /// Write raw bytes at the cursor position.
    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError>;

    fn clear(&mut self, mode: ClearMode) -> Result<(), TermError>;

    /// Shift the content of rows `first..=last` by `delta` rows.
    ///
    /// A positive delta moves content up and reveals blank rows at the
    /// bottom; a negative delta moves content down and reveals rows at the top.
    fn scroll_region(&mut self, first: u16, last: u16, delta: isize) -> Result<(), TermError>;

    /// Turn on every attribute in `attrs`.
    fn set_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError>;

    /// Turn off every attribute in `attrs`.
    fn unset_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError>;

    fn flush(&mut self) -> Result<(), TermError>;

    /// Block for one input event.
    ///
    /// `None` waits forever. With a timeout, `Ok(None)` means nothing arrived.
    fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<KeyEvent>, TermError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_mode_parses_known_names() {
        assert_eq!("below".parse::<ClearMode>().unwrap(), ClearMode::Below);
        assert_eq!("above".parse::<ClearMode>().unwrap(), ClearMode::Above);
        assert_eq!("screen".parse::<ClearMode>().unwrap(), ClearMode::Screen);
        assert_eq!("right".parse::<ClearMode>().unwrap(), ClearMode::Right);
        assert_eq!("left".parse::<ClearMode>().unwrap(), ClearMode::Left);
        assert_eq!("line".parse::<ClearMode>().unwrap(), ClearMode::Line);
    }

    #[test]
    fn test_clear_mode_rejects_unknown_name() {
        let err = "sideways".parse::<ClearMode>().unwrap_err();
        assert!(matches!(err, TermError::UnknownClearMode(ref name) if name == "sideways"));
    }
}
