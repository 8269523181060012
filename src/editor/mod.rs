//! Line editing and incremental redraw.
//!
//! Provides a byte-line buffer with a clamped cursor, row-level redraw
//! tracking, and [`FileView`], which ties both to a scrolling viewport.

mod buffer;
mod dirty;
mod file_view;

pub use buffer::{Cursor, Direction, DirtyLines, LineBuffer, split_lines};
pub use dirty::DrawnRows;
pub use file_view::{DEFAULT_TAB_WIDTH, DEFAULT_WHEEL_LINES, FileView};
