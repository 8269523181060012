//! In-memory surface for tests and benchmarks.
//!
//! [`RecordingSurface`] keeps a cell grid that reacts to writes, clears and
//! region scrolls the way a terminal would, and logs every operation so
//! tests can assert on exactly what was sent.

use std::collections::VecDeque;
use std::time::Duration;

use super::{AttrSet, ClearMode, CursorShape, KeyEvent, Surface, TermError};

/// One screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub byte: u8,
    pub attrs: AttrSet,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            byte: b' ',
            attrs: AttrSet::EMPTY,
        }
    }
}

/// A recorded surface operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Move(u16, u16),
    Write(Vec<u8>),
    Clear(ClearMode),
    Scroll { first: u16, last: u16, delta: isize },
    SetAttrs(AttrSet),
    UnsetAttrs(AttrSet),
    HideCursor,
    ShowCursor,
    CursorShape(CursorShape),
    Flush,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u16,
    height: u16,
    grid: Vec<Vec<Cell>>,
    cursor: (u16, u16),
    /// Set after a write lands on the last column. The cursor stays on that
    /// column and the next byte wraps to the following row.
    pending_wrap: bool,
    cursor_visible: bool,
    attrs: AttrSet,
    ops: Vec<Op>,
    input: VecDeque<KeyEvent>,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![Cell::default(); usize::from(width)]; usize::from(height)],
            cursor: (0, 0),
            pending_wrap: false,
            cursor_visible: true,
            attrs: AttrSet::EMPTY,
            ops: Vec::new(),
            input: VecDeque::new(),
        }
    }

    /// Queue an input event for [`Surface::read_key`].
    pub fn push_key(&mut self, event: impl Into<KeyEvent>) {
        self.input.push_back(event.into());
    }

    /// Queue several input events.
    pub fn push_keys<I>(&mut self, events: I)
    where
        I: IntoIterator,
        I::Item: Into<KeyEvent>,
    {
        self.input.extend(events.into_iter().map(Into::into));
    }

    /// Change the dimensions. Cells outside the new size are dropped.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.grid
            .resize(usize::from(height), vec![Cell::default(); usize::from(width)]);
        for row in &mut self.grid {
            row.resize(usize::from(width), Cell::default());
        }
        self.cursor = (
            self.cursor.0.min(width.saturating_sub(1)),
            self.cursor.1.min(height.saturating_sub(1)),
        );
        self.pending_wrap = false;
    }

    pub const fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Whether the last write filled the final column of its row.
    pub const fn is_wrap_pending(&self) -> bool {
        self.pending_wrap
    }

    pub const fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Attributes currently in effect.
    pub const fn attrs(&self) -> AttrSet {
        self.attrs
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Forget the operation log, keeping the screen contents.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of write operations since the log was last cleared.
    pub fn write_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Write(_))).count()
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.grid.get(usize::from(y))?.get(usize::from(x))
    }

    /// The text of row `y` with trailing blanks removed.
    pub fn row_text(&self, y: u16) -> String {
        let Some(row) = self.grid.get(usize::from(y)) else {
            return String::new();
        };
        let bytes: Vec<u8> = row.iter().map(|cell| cell.byte).collect();
        String::from_utf8_lossy(&bytes).trim_end().to_string()
    }

    /// Every row's text, top to bottom.
    pub fn screen_text(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Autowrap: move to the start of the next row, scrolling the whole
    /// screen up when already on the bottom row.
    fn wrap_line(&mut self) {
        self.pending_wrap = false;
        let (_, y) = self.cursor;
        if y + 1 < self.height {
            self.cursor = (0, y + 1);
        } else {
            let blank = self.blank_row();
            self.grid.remove(0);
            self.grid.push(blank);
            self.cursor = (0, y);
        }
    }

    fn blank_row(&self) -> Vec<Cell> {
        vec![Cell::default(); usize::from(self.width)]
    }

    fn blank_cells(&mut self, y: u16, xs: std::ops::Range<usize>) {
        if let Some(row) = self.grid.get_mut(usize::from(y)) {
            let end = xs.end.min(row.len());
            let start = xs.start.min(end);
            row[start..end].fill(Cell::default());
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<(), TermError> {
        self.ops.push(Op::Move(x, y));
        self.pending_wrap = false;
        self.cursor = (
            x.min(self.width.saturating_sub(1)),
            y.min(self.height.saturating_sub(1)),
        );
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<(), TermError> {
        self.ops.push(Op::HideCursor);
        self.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<(), TermError> {
        self.ops.push(Op::ShowCursor);
        self.cursor_visible = true;
        Ok(())
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> Result<(), TermError> {
        self.ops.push(Op::CursorShape(shape));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TermError> {
        self.ops.push(Op::Write(bytes.to_vec()));
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let attrs = self.attrs;
        for &byte in bytes {
            if self.pending_wrap {
                self.wrap_line();
            }
            let (x, y) = self.cursor;
            if let Some(cell) = self
                .grid
                .get_mut(usize::from(y))
                .and_then(|row| row.get_mut(usize::from(x)))
            {
                *cell = Cell { byte, attrs };
            }
            if x + 1 < self.width {
                self.cursor.0 = x + 1;
            } else {
                self.pending_wrap = true;
            }
        }
        Ok(())
    }

    fn clear(&mut self, mode: ClearMode) -> Result<(), TermError> {
        self.ops.push(Op::Clear(mode));
        self.pending_wrap = false;
        let (x, y) = self.cursor;
        let x = usize::from(x);
        let width = usize::from(self.width);
        match mode {
            ClearMode::Right => self.blank_cells(y, x..width),
            ClearMode::Left => self.blank_cells(y, 0..x + 1),
            ClearMode::Line => self.blank_cells(y, 0..width),
            ClearMode::Below => {
                self.blank_cells(y, x..width);
                for row in y + 1..self.height {
                    self.blank_cells(row, 0..width);
                }
            }
            ClearMode::Above => {
                for row in 0..y {
                    self.blank_cells(row, 0..width);
                }
                self.blank_cells(y, 0..x + 1);
            }
            ClearMode::Screen => {
                for row in 0..self.height {
                    self.blank_cells(row, 0..width);
                }
            }
        }
        Ok(())
    }

    fn scroll_region(&mut self, first: u16, last: u16, delta: isize) -> Result<(), TermError> {
        self.ops.push(Op::Scroll { first, last, delta });
        self.pending_wrap = false;
        let first = usize::from(first);
        let last = usize::from(last).min(self.grid.len().saturating_sub(1));
        if first > last || delta == 0 {
            return Ok(());
        }
        let span = last - first + 1;
        let shift = delta.unsigned_abs().min(span);
        let blank = self.blank_row();
        let region = &mut self.grid[first..=last];
        if delta > 0 {
            region.rotate_left(shift);
            region[span - shift..].fill(blank);
        } else {
            region.rotate_right(shift);
            region[..shift].fill(blank);
        }
        Ok(())
    }

    fn set_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError> {
        self.ops.push(Op::SetAttrs(attrs));
        self.attrs = self.attrs | attrs;
        Ok(())
    }

    fn unset_attrs(&mut self, attrs: AttrSet) -> Result<(), TermError> {
        self.ops.push(Op::UnsetAttrs(attrs));
        self.attrs.clear_with_off_codes_of(attrs);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TermError> {
        self.ops.push(Op::Flush);
        Ok(())
    }

    fn read_key(&mut self, timeout: Option<Duration>) -> Result<Option<KeyEvent>, TermError> {
        match (self.input.pop_front(), timeout) {
            (Some(event), _) => Ok(Some(event)),
            (None, Some(_)) => Ok(None),
            (None, None) => Err(TermError::InputClosed),
        }
    }
}
