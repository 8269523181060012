//! The real terminal, driven through crossterm.
//!
//! [`CrosstermSurface`] is a session object: [`CrosstermSurface::open`]
//! enters raw mode and the alternate screen, and dropping it restores the
//! terminal. There is no process-wide terminal handle.

use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, SetCursorStyle, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::style::{Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, ScrollDown, ScrollUp,
};
use crossterm::{execute, queue};

use super::{AttrSet, ClearMode, CursorShape, Key, KeyEvent, Surface, TermError};

pub struct CrosstermSurface {
    out: BufWriter<Stdout>,
    width: u16,
    height: u16,
    mouse: bool,
}

impl CrosstermSurface {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode, the alternate screen or mouse capture
    /// cannot be enabled, or the terminal size cannot be read.
    pub fn open(mouse: bool) -> Result<Self, TermError> {
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(stdout());
        execute!(out, EnterAlternateScreen, Clear(ClearType::All))?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        let (width, height) = terminal::size()?;
        tracing::debug!(width, height, mouse, "terminal session opened");
        Ok(Self {
            out,
            width,
            height,
            mouse,
        })
    }

    fn restore(&mut self) -> std::io::Result<()> {
        if self.mouse {
            queue!(self.out, DisableMouseCapture)?;
        }
        queue!(
            self.out,
            SetAttribute(crossterm::style::Attribute::Reset),
            SetCursorStyle::DefaultUserShape,
            Show,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "failed to restore terminal");
        }
        tracing::debug!("terminal session closed");
    }
}

impl Surface for CrosstermSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<(), TermError> {
        queue!(self.out, MoveTo(x, y))?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<(), TermError> {
        queue!(self.out, Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<(), TermError> {
        queue!(self.out, Show)?;
        Ok(())
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> Result<(), TermError> {
        let style = match shape {
            CursorShape::Default => SetCursorStyle::DefaultUserShape,
            CursorShape::BlinkingBlock => SetCursorStyle::BlinkingBlock,
            CursorShape::SteadyBlock => SetCursorStyle::SteadyBlock,
            CursorShape::BlinkingUnderline => SetCursorStyle::BlinkingUnderScore,
            CursorShape::SteadyUnderline => SetCursorStyle::SteadyUnderScore,
            CursorShape::BlinkingBar => SetCursorStyle::BlinkingBar,
            CursorShape::SteadyBar => SetCursorStyle::SteadyBar,
        };
        queue!(self.out, style)?;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn clear(&mut self, mode: ClearMode) -> Result<(), TermError> {
        match mode {
            ClearMode::Below => queue!(self.out, Clear(ClearType::FromCursorDown))?,
            ClearMode::Above => queue!(self.out, Clear(ClearType::FromCursorUp))?,
            ClearMode::Screen => queue!(self.out, Clear(ClearType::All))?,
            ClearMode::Right => queue!(self.out, Clear(ClearType::UntilNewLine))?,
            ClearMode::Line => queue!(self.out, Clear(ClearType::CurrentLine))?,
            // crossterm has no erase-to-start-of-line command
            ClearMode::Left => self.out.write_all(b"\x1b[1K")?,
        }
        Ok(())
    }

    fn scroll_region(&mut self, first: u16, last: u16, delta: isize) -> Result<(), TermError> {
        let amount = u16::try_from(delta.unsigned_abs()).unwrap_or(u16::MAX);
        if amount == 0 {
            return Ok(());
        }
        // DECSTBM margins are 1-indexed and inclusive.
        queue!(
            self.out,
            Print(format!("\x1b[{};{}r", first + 1, last + 1))
        )?;
        if delta > 0 {
            queue!(self.out, ScrollUp(amount))?;
        } else {
            queue!(self.out, ScrollDown(amount))?;
        }
        queue!(self.out, Print("\x1b[r"))?;
        Ok(())
    }

    fn set_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError> {
        for attr in attrs.iter() {
            queue!(self.out, SetAttribute(attr.on()))?;
        }
        Ok(())
    }

    fn unset_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError> {
        for attr in attrs.iter() {
            queue!(self.out, SetAttribute(attr.off()))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TermError> {
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<KeyEvent>, TermError> {
        self.out.flush()?;
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if !event::poll(remaining)? {
                    return Ok(None);
                }
            }
            let ev = event::read()?;
            if let Event::Resize(width, height) = ev {
                self.width = width;
                self.height = height;
            }
            if let Some(key) = translate(&ev) {
                return Ok(Some(key));
            }
        }
    }
}

/// Map a crossterm event onto the editor's key vocabulary.
///
/// Events the editor has no name for (focus changes, key releases, mouse
/// motion) map to `None`.
pub fn translate(ev: &Event) -> Option<KeyEvent> {
    match ev {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            translate_key(key.code, key.modifiers).map(KeyEvent::key)
        }
        Event::Mouse(mouse) => {
            let key = match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Key::LeftPress,
                MouseEventKind::Up(MouseButton::Left) => Key::LeftRelease,
                MouseEventKind::ScrollUp => Key::WheelUp,
                MouseEventKind::ScrollDown => Key::WheelDown,
                _ => return None,
            };
            Some(KeyEvent::mouse(key, mouse.column, mouse.row))
        }
        Event::Resize(..) => Some(KeyEvent::key(Key::Resize)),
        _ => None,
    }
}

fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Escape,
        KeyCode::F(n) if (1..=12).contains(&n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}
