//! The editable file view: a [`LineBuffer`] shown through a [`Viewport`].
//!
//! `FileView` keeps four things consistent: the document, the cursor, the
//! scroll offset and the set of rows already drawn. Input handling mutates
//! the first three and invalidates rows; [`FileView::render`] redraws only
//! the rows that are stale.

use crate::term::{Attr, ClearMode, Key, KeyEvent, Surface, TermError, styled};
use crate::ui::gutter;
use crate::ui::viewport::Viewport;

use super::buffer::{Cursor, Direction, DirtyLines, LineBuffer};
use super::dirty::DrawnRows;

pub const DEFAULT_TAB_WIDTH: usize = 4;
pub const DEFAULT_WHEEL_LINES: usize = 3;

#[derive(Debug)]
pub struct FileView {
    buffer: LineBuffer,
    viewport: Viewport,
    drawn: DrawnRows,
    /// Digit width of the line-number labels.
    digits: usize,
    tab_width: usize,
    wheel_lines: usize,
}

impl FileView {
    /// Create a view with the cursor at the origin and nothing drawn yet.
    pub fn new(buffer: LineBuffer, viewport: Viewport) -> Self {
        let digits = gutter::digit_count(buffer.line_count());
        Self {
            buffer,
            viewport,
            drawn: DrawnRows::new(),
            digits,
            tab_width: DEFAULT_TAB_WIDTH,
            wheel_lines: DEFAULT_WHEEL_LINES,
        }
    }

    /// Number of spaces a Tab inserts.
    pub const fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Rows moved per mouse-wheel step.
    pub const fn with_wheel_lines(mut self, lines: usize) -> Self {
        self.wheel_lines = lines;
        self
    }

    pub const fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    pub const fn scroll(&self) -> usize {
        self.viewport.offset()
    }

    pub const fn is_unsaved(&self) -> bool {
        self.buffer.is_unsaved()
    }

    pub const fn mark_saved(&mut self) {
        self.buffer.mark_saved();
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        self.buffer.lines()
    }

    /// Columns taken by line numbers and their separator.
    pub const fn gutter_width(&self) -> usize {
        gutter::gutter_width(self.buffer.line_count())
    }

    /// Whether absolute row `row` will be redrawn by the next render.
    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.drawn.is_dirty(row)
    }

    /// Force every row to redraw.
    pub fn invalidate_all(&mut self) {
        self.drawn.invalidate_all();
    }

    /// Place the cursor, clamped into the document.
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        self.buffer.set_cursor(col, row);
    }

    /// Scroll so that `new_scroll` is the first visible row.
    ///
    /// The request is clamped so the last line never rises above the bottom
    /// row. The on-screen rows are shifted with a region scroll instead of
    /// being redrawn; rows that left the viewport stop being tracked, and
    /// the cursor is pulled back into view if it fell outside.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot scroll.
    pub fn set_scroll<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        new_scroll: usize,
    ) -> Result<(), TermError> {
        let current = self.viewport.offset();
        let target = self
            .viewport
            .clamp_offset(new_scroll, self.buffer.line_count());
        if target == current {
            return Ok(());
        }

        let (first, last) = self.viewport.screen_span();
        surface.scroll_region(first, last, signed_delta(current, target))?;
        self.viewport.set_offset(target);
        self.drawn.retain_visible(self.viewport.visible_rows());

        let Cursor { col, row } = self.buffer.cursor();
        if row < target {
            self.buffer.set_cursor(col, target);
        } else if row > self.viewport.last_row() {
            self.buffer.set_cursor(col, self.viewport.last_row());
        }
        tracing::trace!(from = current, to = target, "scrolled file view");
        Ok(())
    }

    /// Apply one input event.
    ///
    /// Keys the view has no binding for are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot scroll.
    pub fn handle_input<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: KeyEvent,
    ) -> Result<(), TermError> {
        match event.key {
            Key::Left => self.buffer.move_cursor(Direction::Left),
            Key::Right => self.buffer.move_cursor(Direction::Right),
            Key::Up => self.buffer.move_cursor(Direction::Up),
            Key::Down => self.buffer.move_cursor(Direction::Down),
            Key::Home | Key::Ctrl('a') => self.buffer.move_home(),
            Key::End | Key::Ctrl('e') => self.buffer.move_end(),
            Key::PageDown | Key::Ctrl('d') => {
                let target = self.scroll() + self.viewport.half_page();
                self.set_scroll(surface, target)?;
            }
            Key::PageUp | Key::Ctrl('u') => {
                let target = self.scroll().saturating_sub(self.viewport.half_page());
                self.set_scroll(surface, target)?;
            }
            Key::WheelDown => {
                let target = self.scroll() + self.wheel_lines;
                self.set_scroll(surface, target)?;
            }
            Key::WheelUp => {
                let target = self.scroll().saturating_sub(self.wheel_lines);
                self.set_scroll(surface, target)?;
            }
            Key::LeftRelease => {
                if let Some((x, y)) = event.mouse {
                    self.click(x, y);
                }
            }
            Key::Delete => {
                if let Some(dirty) = self.buffer.delete_forward() {
                    self.invalidate(dirty);
                }
            }
            Key::Backspace => {
                if let Some(dirty) = self.buffer.delete_back() {
                    self.invalidate(dirty);
                }
            }
            Key::Enter => {
                let dirty = self.buffer.split_line();
                self.invalidate(dirty);
            }
            Key::Space => self.insert(b" "),
            Key::Tab => self.insert(&vec![b' '; self.tab_width]),
            Key::Char(c) => {
                let mut utf8 = [0; 4];
                self.insert(c.encode_utf8(&mut utf8).as_bytes());
            }
            other => tracing::trace!(key = %other, "unbound key"),
        }
        self.follow_cursor(surface)
    }

    /// Redraw every visible row that is stale and return how many were drawn.
    ///
    /// Rows past the end of the document are cleared. Document rows get a
    /// faint right-aligned line number, the line bytes clipped to the
    /// viewport, and a clear to the end of the line unless the text already
    /// reaches the right edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be written.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<usize, TermError> {
        surface.hide_cursor()?;
        let x = self.viewport.x();
        let width = usize::from(self.viewport.width());
        let text_width = width.saturating_sub(self.gutter_width());
        let mut redrawn = 0;
        for row in self.viewport.visible_rows() {
            if !self.drawn.is_dirty(row) {
                continue;
            }
            let Some(y) = self.viewport.screen_row(row) else {
                continue;
            };
            surface.move_cursor(x, y)?;
            match self.buffer.line(row) {
                None => surface.clear(ClearMode::Line)?,
                Some(line) => {
                    let label = gutter::line_label(row, self.digits);
                    styled(surface, Attr::Faint)?.write(clip(label.as_bytes(), width))?;
                    surface.write(clip(line, text_width))?;
                    // At the right edge the terminal holds the cursor on the
                    // last column, and erasing from there would eat that byte.
                    if line.len() < text_width {
                        surface.clear(ClearMode::Right)?;
                    }
                }
            }
            self.drawn.mark_drawn(row);
            redrawn += 1;
        }
        tracing::trace!(redrawn, scroll = self.scroll(), "rendered file view");
        Ok(redrawn)
    }

    /// Move the hardware cursor onto the logical cursor and show it.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be written.
    pub fn place_cursor<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), TermError> {
        let Cursor { col, row } = self.buffer.cursor();
        let right_edge =
            usize::from(self.viewport.x()) + usize::from(self.viewport.width()).saturating_sub(1);
        let x = (usize::from(self.viewport.x()) + self.gutter_width() + col).min(right_edge);
        let y = self
            .viewport
            .screen_row(row)
            .unwrap_or_else(|| self.viewport.y());
        surface.move_cursor(u16::try_from(x).unwrap_or(u16::MAX), y)?;
        surface.show_cursor()
    }

    /// Move and resize the view. Everything is redrawn on the next render.
    pub fn resize(&mut self, x: u16, y: u16, width: u16, height: u16) {
        let total = self.buffer.line_count();
        self.viewport.reshape(x, y, width, height, total);
        let follow = self.viewport.offset_to_show(self.buffer.cursor().row);
        self.viewport
            .set_offset(self.viewport.clamp_offset(follow, total));
        self.drawn.invalidate_all();
    }

    fn insert(&mut self, bytes: &[u8]) {
        if let Some(dirty) = self.buffer.insert_bytes(bytes) {
            self.invalidate(dirty);
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        let text_left = usize::from(self.viewport.x()) + self.gutter_width();
        let col = usize::from(x).saturating_sub(text_left);
        let row = usize::from(y).saturating_sub(usize::from(self.viewport.y())) + self.scroll();
        self.buffer.set_cursor(col, row);
    }

    fn invalidate(&mut self, dirty: DirtyLines) {
        match dirty {
            DirtyLines::Line(row) => self.drawn.invalidate(row),
            DirtyLines::FromLine(row) => {
                let line_count = self.buffer.line_count();
                // Rows from `row` moved; row `line_count` is the one that
                // just became (or stopped being) past the end.
                self.drawn.invalidate_span(row, line_count);
                let digits = gutter::digit_count(line_count);
                if digits != self.digits {
                    self.digits = digits;
                    self.drawn.invalidate_all();
                }
            }
        }
    }

    /// Re-clamp the scroll for the current line count, then scroll just far
    /// enough to show the cursor.
    fn follow_cursor<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), TermError> {
        self.set_scroll(surface, self.scroll())?;
        let target = self.viewport.offset_to_show(self.buffer.cursor().row);
        self.set_scroll(surface, target)
    }
}

fn clip(bytes: &[u8], room: usize) -> &[u8] {
    &bytes[..bytes.len().min(room)]
}

fn signed_delta(from: usize, to: usize) -> isize {
    if to >= from {
        isize::try_from(to - from).unwrap_or(isize::MAX)
    } else {
        isize::try_from(from - to).map_or(isize::MIN, |d| -d)
    }
}
