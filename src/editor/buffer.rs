/// Cursor position in the line buffer.
///
/// `col` is a byte offset and may equal the line length (the end-of-line
/// insertion point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Zero-based row.
    pub row: usize,
}

impl Cursor {
    /// Create a cursor at a specific position.
    pub const fn at(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rows whose on-screen form is stale after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyLines {
    /// Only the content of this row changed.
    Line(usize),
    /// Lines were inserted or removed at this row: every row from here to
    /// the end of the document (and the first row past it) moved.
    FromLine(usize),
}

/// Split raw file bytes into lines.
///
/// A trailing newline does not start an extra line, and an empty input is
/// one empty line. Carriage returns are kept as ordinary bytes.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

/// The document: an ordered, never-empty list of byte lines plus a cursor.
///
/// Every cursor write goes through [`LineBuffer::set_cursor`], which clamps
/// the row to the document and the column to the row's length. Nothing
/// here fails; out-of-range requests are absorbed by clamping and edits
/// with nothing to act on are no-ops.
pub struct LineBuffer {
    lines: Vec<Vec<u8>>,
    cursor: Cursor,
    unsaved: bool,
}

impl LineBuffer {
    /// Create a buffer from lines. An empty list becomes one empty line.
    pub fn new(mut lines: Vec<Vec<u8>>) -> Self {
        if lines.is_empty() {
            lines.push(Vec::new());
        }
        Self {
            lines,
            cursor: Cursor::default(),
            unsaved: false,
        }
    }

    /// Create a buffer from text, one line per `\n`-separated segment.
    pub fn from_text(text: &str) -> Self {
        Self::new(split_lines(text.as_bytes()))
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Mark the buffer as saved.
    pub const fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    /// Total number of lines. Always at least one.
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&[u8]> {
        self.lines.get(row).map(Vec::as_slice)
    }

    /// Length of a line in bytes, or 0 past the end.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Vec::len)
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Place the cursor, clamping the row into the document and the column
    /// into the row.
    pub fn set_cursor(&mut self, col: usize, row: usize) {
        let row = row.min(self.lines.len() - 1);
        let col = col.min(self.lines[row].len());
        self.cursor = Cursor { col, row };
    }

    /// Insert bytes at the cursor; the cursor advances past them.
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Option<DirtyLines> {
        if bytes.is_empty() {
            return None;
        }
        let Cursor { col, row } = self.cursor;
        self.lines[row].splice(col..col, bytes.iter().copied());
        self.set_cursor(col + bytes.len(), row);
        self.unsaved = true;
        Some(DirtyLines::Line(row))
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) -> DirtyLines {
        let Cursor { col, row } = self.cursor;
        let after = self.lines[row].split_off(col);
        self.lines.insert(row + 1, after);
        self.set_cursor(0, row + 1);
        self.unsaved = true;
        DirtyLines::FromLine(row)
    }

    /// Delete the byte before the cursor (Backspace).
    ///
    /// At column 0 the current line is appended to the previous one and the
    /// cursor lands on the old boundary.
    pub fn delete_back(&mut self) -> Option<DirtyLines> {
        let Cursor { col, row } = self.cursor;
        if col > 0 {
            self.lines[row].remove(col - 1);
            self.set_cursor(col - 1, row);
            self.unsaved = true;
            return Some(DirtyLines::Line(row));
        }
        if row == 0 {
            return None;
        }
        let line = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        let boundary = prev.len();
        prev.extend_from_slice(&line);
        self.set_cursor(boundary, row - 1);
        self.unsaved = true;
        Some(DirtyLines::FromLine(row - 1))
    }

    /// Delete the byte at the cursor (Delete key).
    ///
    /// At the end of a line the next line is joined onto this one.
    pub fn delete_forward(&mut self) -> Option<DirtyLines> {
        let Cursor { col, row } = self.cursor;
        if col < self.lines[row].len() {
            self.lines[row].remove(col);
            self.unsaved = true;
            return Some(DirtyLines::Line(row));
        }
        if row + 1 >= self.lines.len() {
            return None;
        }
        let next = self.lines.remove(row + 1);
        self.lines[row].extend_from_slice(&next);
        self.unsaved = true;
        Some(DirtyLines::FromLine(row))
    }

    /// Move the cursor one step. Left and right stay on the current line.
    pub fn move_cursor(&mut self, direction: Direction) {
        let Cursor { col, row } = self.cursor;
        match direction {
            Direction::Left => self.set_cursor(col.saturating_sub(1), row),
            Direction::Right => self.set_cursor(col + 1, row),
            Direction::Up => self.set_cursor(col, row.saturating_sub(1)),
            Direction::Down => self.set_cursor(col, row + 1),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        self.set_cursor(0, self.cursor.row);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.set_cursor(self.line_len(self.cursor.row), self.cursor.row);
    }
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("lines", &format_args!("{} lines", self.lines.len()))
            .field("cursor", &self.cursor)
            .field("unsaved", &self.unsaved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &LineBuffer, row: usize) -> &[u8] {
        buf.line(row).unwrap()
    }

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = LineBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(line(&buf, 0), b"");
    }

    #[test]
    fn test_new_with_no_lines_has_one_line() {
        let buf = LineBuffer::new(Vec::new());
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = LineBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(line(&buf, 0), b"hello");
        assert_eq!(line(&buf, 1), b"world");
    }

    #[test]
    fn test_split_lines_trailing_newline_adds_no_line() {
        assert_eq!(split_lines(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(split_lines(b""), vec![Vec::<u8>::new()]);
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
        assert_eq!(split_lines(b"a\n\n"), vec![b"a".to_vec(), Vec::new()]);
    }

    #[test]
    fn test_split_lines_keeps_carriage_returns() {
        assert_eq!(split_lines(b"a\r\nb"), vec![b"a\r".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_line_out_of_bounds_returns_none() {
        let buf = LineBuffer::from_text("hello");
        assert_eq!(buf.line(1), None);
        assert_eq!(buf.line_len(1), 0);
    }

    #[test]
    fn test_cursor_starts_at_origin() {
        let buf = LineBuffer::from_text("hello\nworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Unsaved tracking ---

    #[test]
    fn test_new_buffer_is_saved() {
        let buf = LineBuffer::from_text("hello");
        assert!(!buf.is_unsaved());
    }

    #[test]
    fn test_insert_marks_unsaved() {
        let mut buf = LineBuffer::from_text("hello");
        buf.insert_bytes(b"!");
        assert!(buf.is_unsaved());
        buf.mark_saved();
        assert!(!buf.is_unsaved());
    }

    #[test]
    fn test_noops_do_not_mark_unsaved() {
        let mut buf = LineBuffer::from_text("hello");
        assert_eq!(buf.delete_back(), None);
        buf.move_end();
        assert_eq!(buf.delete_forward(), None);
        assert_eq!(buf.insert_bytes(b""), None);
        assert!(!buf.is_unsaved());
    }

    // --- set_cursor clamping ---

    #[test]
    fn test_set_cursor_clamps_row_then_col() {
        let mut buf = LineBuffer::from_text("hello\nhi");
        buf.set_cursor(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(2, 1));
    }

    #[test]
    fn test_set_cursor_allows_end_of_line() {
        let mut buf = LineBuffer::from_text("hello");
        buf.set_cursor(5, 0);
        assert_eq!(buf.cursor(), Cursor::at(5, 0));
    }

    // --- Insertion ---

    #[test]
    fn test_insert_at_start() {
        let mut buf = LineBuffer::from_text("hello");
        assert_eq!(buf.insert_bytes(b"H"), Some(DirtyLines::Line(0)));
        assert_eq!(line(&buf, 0), b"Hhello");
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = LineBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_bytes(b"e");
        assert_eq!(line(&buf, 0), b"hello");
        assert_eq!(buf.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn test_insert_multibyte_advances_by_bytes() {
        let mut buf = LineBuffer::from_text("caf");
        buf.move_end();
        buf.insert_bytes("é".as_bytes());
        assert_eq!(line(&buf, 0), "café".as_bytes());
        assert_eq!(buf.cursor().col, 5);
    }

    // --- Enter ---

    #[test]
    fn test_split_line_at_end() {
        let mut buf = LineBuffer::from_text("hello");
        buf.move_end();
        assert_eq!(buf.split_line(), DirtyLines::FromLine(0));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(line(&buf, 0), b"hello");
        assert_eq!(line(&buf, 1), b"");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_split_line_at_start() {
        let mut buf = LineBuffer::from_text("hello");
        buf.split_line();
        assert_eq!(line(&buf, 0), b"");
        assert_eq!(line(&buf, 1), b"hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = LineBuffer::from_text("hello world");
        buf.set_cursor(5, 0);
        buf.split_line();
        assert_eq!(line(&buf, 0), b"hello");
        assert_eq!(line(&buf, 1), b" world");
    }

    // --- Backspace ---

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = LineBuffer::from_text("hello");
        assert_eq!(buf.delete_back(), None);
        assert_eq!(line(&buf, 0), b"hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_delete_back_removes_byte() {
        let mut buf = LineBuffer::from_text("hello");
        buf.set_cursor(5, 0);
        assert_eq!(buf.delete_back(), Some(DirtyLines::Line(0)));
        assert_eq!(line(&buf, 0), b"hell");
        assert_eq!(buf.cursor(), Cursor::at(4, 0));
    }

    #[test]
    fn test_delete_back_joins_lines_at_old_boundary() {
        let mut buf = LineBuffer::from_text("hello\nworld\nagain");
        buf.set_cursor(0, 1);
        assert_eq!(buf.delete_back(), Some(DirtyLines::FromLine(0)));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(line(&buf, 0), b"helloworld");
        assert_eq!(line(&buf, 1), b"again");
        assert_eq!(buf.cursor(), Cursor::at(5, 0));
    }

    #[test]
    fn test_delete_back_removes_single_byte_of_multibyte_char() {
        let mut buf = LineBuffer::from_text("é");
        buf.move_end();
        buf.delete_back();
        assert_eq!(line(&buf, 0), &"é".as_bytes()[..1]);
        assert_eq!(buf.cursor().col, 1);
    }

    // --- Delete ---

    #[test]
    fn test_delete_forward_at_end_of_buffer_is_noop() {
        let mut buf = LineBuffer::from_text("a\nhello");
        buf.set_cursor(5, 1);
        assert_eq!(buf.delete_forward(), None);
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_delete_forward_removes_byte() {
        let mut buf = LineBuffer::from_text("hello");
        assert_eq!(buf.delete_forward(), Some(DirtyLines::Line(0)));
        assert_eq!(line(&buf, 0), b"ello");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.set_cursor(5, 0);
        assert_eq!(buf.delete_forward(), Some(DirtyLines::FromLine(0)));
        assert_eq!(buf.line_count(), 1);
        assert_eq!(line(&buf, 0), b"helloworld");
        assert_eq!(buf.cursor(), Cursor::at(5, 0));
    }

    // --- Movement ---

    #[test]
    fn test_move_left_at_start_does_not_wrap() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.set_cursor(0, 1);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_move_right_at_end_does_not_wrap() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.move_end();
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(5, 0));
    }

    #[test]
    fn test_move_up_and_down_clamp_column() {
        let mut buf = LineBuffer::from_text("hi\nhello");
        buf.set_cursor(4, 1);
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(2, 0));
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(2, 1));
    }

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_down_at_last_line_is_noop() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.set_cursor(0, 1);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_home_and_end() {
        let mut buf = LineBuffer::from_text("hello");
        buf.set_cursor(3, 0);
        buf.move_home();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        buf.move_end();
        assert_eq!(buf.cursor(), Cursor::at(5, 0));
    }

    // --- Round trips ---

    #[test]
    fn test_hello_world_enter_then_type() {
        let mut buf = LineBuffer::from_text("hello\nworld");
        buf.set_cursor(5, 0);
        buf.split_line();
        assert_eq!(buf.lines(), &[b"hello".to_vec(), Vec::new(), b"world".to_vec()]);
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        buf.insert_bytes(b"!");
        assert_eq!(line(&buf, 1), b"!");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_lines() -> impl Strategy<Value = Vec<Vec<u8>>> {
            prop::collection::vec(prop::collection::vec(any::<u8>(), 0..12), 1..8)
        }

        fn arb_direction() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        proptest! {
            #[test]
            fn cursor_stays_in_bounds(
                lines in arb_lines(),
                start_col in 0..20usize,
                start_row in 0..10usize,
                moves in prop::collection::vec((arb_direction(), any::<u8>()), 0..40),
            ) {
                let mut buf = LineBuffer::new(lines);
                buf.set_cursor(start_col, start_row);
                for (direction, sel) in moves {
                    match sel % 4 {
                        0 => buf.move_home(),
                        1 => buf.move_end(),
                        _ => buf.move_cursor(direction),
                    }
                    let c = buf.cursor();
                    prop_assert!(c.row < buf.line_count());
                    prop_assert!(c.col <= buf.line_len(c.row));
                }
            }

            #[test]
            fn enter_then_backspace_restores_line(
                bytes in prop::collection::vec(any::<u8>(), 0..16),
                at in 0..17usize,
            ) {
                let col = at.min(bytes.len());
                let mut buf = LineBuffer::new(vec![bytes.clone()]);
                buf.set_cursor(col, 0);
                buf.split_line();
                buf.delete_back();
                prop_assert_eq!(buf.lines(), &[bytes]);
                prop_assert_eq!(buf.cursor(), Cursor::at(col, 0));
            }

            #[test]
            fn delete_at_end_of_line_inverts_enter(
                first in prop::collection::vec(any::<u8>(), 0..10),
                second in prop::collection::vec(any::<u8>(), 0..10),
            ) {
                let mut buf = LineBuffer::new(vec![first.clone(), second.clone()]);
                buf.set_cursor(first.len(), 0);
                buf.delete_forward();
                let mut joined = first.clone();
                joined.extend_from_slice(&second);
                prop_assert_eq!(buf.lines(), &[joined]);

                buf.split_line();
                prop_assert_eq!(buf.lines(), &[first, second]);
            }

            #[test]
            fn insert_then_backspace_restores(
                bytes in prop::collection::vec(any::<u8>(), 0..16),
                at in 0..17usize,
                x in any::<u8>(),
            ) {
                let col = at.min(bytes.len());
                let mut buf = LineBuffer::new(vec![bytes.clone()]);
                buf.set_cursor(col, 0);
                buf.insert_bytes(&[x]);
                buf.delete_back();
                prop_assert_eq!(buf.lines(), &[bytes]);
                prop_assert_eq!(buf.cursor(), Cursor::at(col, 0));
            }
        }
    }
}
