//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct places the file view on screen and tracks which
//! document rows are visible.

use std::ops::Range;

/// The visible window into a document.
///
/// The viewport tracks:
/// - Screen placement (origin column and row)
/// - Size in cells (width, height)
/// - Current scroll offset (the first visible document row)
///
/// The offset is kept in `0..=max_offset(total_lines)`, so the last
/// document line never scrolls above the bottom row.
///
/// # Example
///
/// ```
/// use bed::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(0, 1, 80, 10);
/// assert_eq!(vp.visible_rows(), 0..10);
///
/// vp.set_offset(vp.clamp_offset(500, 100));
/// assert_eq!(vp.offset(), 90);
/// assert_eq!(vp.visible_rows(), 90..100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    offset: usize,
}

impl Viewport {
    /// Create a new viewport scrolled to the top.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Screen position of the top-left cell
    /// * `width` - Width in columns
    /// * `height` - Height in rows; a zero height is treated as one row
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height: height.max(1),
            offset: 0,
        }
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Screen column of the left edge.
    pub const fn x(&self) -> u16 {
        self.x
    }

    /// Screen row of the top edge.
    pub const fn y(&self) -> u16 {
        self.y
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of visible rows as a row count.
    pub fn rows(&self) -> usize {
        usize::from(self.height)
    }

    /// Absolute document rows currently on screen, including rows past the
    /// end of the document.
    pub fn visible_rows(&self) -> Range<usize> {
        self.offset..self.offset + self.rows()
    }

    /// The last visible absolute row.
    pub fn last_row(&self) -> usize {
        self.offset + self.rows() - 1
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.visible_rows().contains(&row)
    }

    /// Screen row for an absolute document row, if it is visible.
    pub fn screen_row(&self, row: usize) -> Option<u16> {
        if !self.contains_row(row) {
            return None;
        }
        u16::try_from(row - self.offset)
            .ok()
            .map(|i| self.y.saturating_add(i))
    }

    /// First and last screen rows covered, inclusive.
    pub fn screen_span(&self) -> (u16, u16) {
        (self.y, self.y.saturating_add(self.height - 1))
    }

    /// Calculate the maximum valid offset.
    pub fn max_offset(&self, total_lines: usize) -> usize {
        total_lines.saturating_sub(self.rows())
    }

    /// Clamp a requested offset into `0..=max_offset`.
    pub fn clamp_offset(&self, offset: usize, total_lines: usize) -> usize {
        offset.min(self.max_offset(total_lines))
    }

    /// The offset that brings `row` into view while moving as little as
    /// possible.
    pub fn offset_to_show(&self, row: usize) -> usize {
        if row < self.offset {
            row
        } else if row > self.last_row() {
            row + 1 - self.rows()
        } else {
            self.offset
        }
    }

    /// Set the offset directly. Callers are expected to have clamped it.
    pub const fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Half the height, used for page movement.
    pub fn half_page(&self) -> usize {
        (self.rows() / 2).max(1)
    }

    /// Move and resize, keeping the offset valid for `total_lines`.
    pub fn reshape(&mut self, x: u16, y: u16, width: u16, height: u16, total_lines: usize) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height.max(1);
        self.offset = self.clamp_offset(self.offset, total_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(0, 1, 80, 24);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_rows(), 0..24);
    }

    #[test]
    fn test_zero_height_becomes_one_row() {
        let vp = Viewport::new(0, 0, 80, 0);
        assert_eq!(vp.height(), 1);
        assert_eq!(vp.visible_rows(), 0..1);
    }

    #[test]
    fn test_max_offset_keeps_last_line_on_bottom_row() {
        let vp = Viewport::new(0, 0, 80, 24);
        assert_eq!(vp.max_offset(100), 76);
    }

    #[test]
    fn test_max_offset_short_document_is_zero() {
        let vp = Viewport::new(0, 0, 80, 10);
        assert_eq!(vp.max_offset(3), 0);
        assert_eq!(vp.clamp_offset(5, 3), 0);
    }

    #[test]
    fn test_screen_row_translation() {
        let mut vp = Viewport::new(0, 1, 80, 5);
        vp.set_offset(10);
        assert_eq!(vp.screen_row(10), Some(1));
        assert_eq!(vp.screen_row(14), Some(5));
        assert_eq!(vp.screen_row(15), None);
        assert_eq!(vp.screen_row(9), None);
        assert_eq!(vp.screen_span(), (1, 5));
    }

    #[test]
    fn test_offset_to_show() {
        let mut vp = Viewport::new(0, 0, 80, 10);
        vp.set_offset(20);
        assert_eq!(vp.offset_to_show(5), 5);
        assert_eq!(vp.offset_to_show(25), 20);
        assert_eq!(vp.offset_to_show(30), 21);
    }

    #[test]
    fn test_half_page() {
        assert_eq!(Viewport::new(0, 0, 80, 24).half_page(), 12);
        assert_eq!(Viewport::new(0, 0, 80, 1).half_page(), 1);
    }

    #[test]
    fn test_reshape_keeps_valid_offset() {
        let mut vp = Viewport::new(0, 0, 80, 24);
        vp.set_offset(50);
        vp.reshape(0, 1, 80, 60, 100);
        assert_eq!(vp.offset(), 40);
        assert_eq!(vp.y(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamped_offset_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                request in 0..20000usize,
            ) {
                let vp = Viewport::new(0, 0, 80, height);
                let offset = vp.clamp_offset(request, total_lines);
                // 0 <= offset <= max(0, total - 1 - (height - 1))
                let bound = (total_lines as isize - 1 - (height as isize - 1)).max(0) as usize;
                prop_assert!(offset <= bound);
            }

            #[test]
            fn offset_to_show_contains_row(
                height in 1..100u16,
                start in 0..1000usize,
                row in 0..2000usize,
            ) {
                let mut vp = Viewport::new(0, 0, 80, height);
                vp.set_offset(start);
                vp.set_offset(vp.offset_to_show(row));
                prop_assert!(vp.contains_row(row));
            }
        }
    }
}
