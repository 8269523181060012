use std::path::Path;

use crate::editor::Cursor;
use crate::term::{Attr, ClearMode, Surface, TermError, styled};

pub const HELP_TEXT: &str = "Ctrl-Q to quit, Ctrl-S to save";
const MODIFIED_MARKER: &[u8] = b" (modified)";

/// Draw the file name on row 0, with a faint marker while there are unsaved
/// changes.
pub fn render_title_bar<S: Surface + ?Sized>(
    surface: &mut S,
    path: &Path,
    modified: bool,
) -> Result<(), TermError> {
    let width = usize::from(surface.width());
    let name = path.display().to_string();
    let name = clip(name.as_bytes(), width);
    surface.move_cursor(0, 0)?;
    styled(surface, Attr::Bold)?.write(name)?;
    let mut used = name.len();
    if modified {
        let marker = clip(MODIFIED_MARKER, width - used);
        styled(surface, Attr::Faint)?.write(marker)?;
        used += marker.len();
    }
    clear_rest(surface, used, width)
}

/// Draw `message` (normally [`HELP_TEXT`]) on the last row, and the cursor
/// position and render count right-aligned after it.
pub fn render_status_bar<S: Surface + ?Sized>(
    surface: &mut S,
    message: &str,
    cursor: Cursor,
    renders: usize,
) -> Result<(), TermError> {
    let width = usize::from(surface.width());
    let y = surface.height().saturating_sub(1);
    let message = clip(message.as_bytes(), width);
    surface.move_cursor(0, y)?;
    styled(surface, Attr::Bold)?.write(message)?;
    clear_rest(surface, message.len(), width)?;

    let info = position_text(cursor, renders);
    let info = clip(info.as_bytes(), width);
    let x = u16::try_from(width - info.len()).unwrap_or(0);
    surface.move_cursor(x, y)?;
    styled(surface, Attr::Faint)?.write(info)
}

/// Show a bold question on the last row.
pub fn render_prompt<S: Surface + ?Sized>(surface: &mut S, question: &str) -> Result<(), TermError> {
    let y = surface.height().saturating_sub(1);
    surface.move_cursor(0, y)?;
    surface.clear(ClearMode::Line)?;
    let width = usize::from(surface.width());
    styled(surface, Attr::Bold)?.write(clip(question.as_bytes(), width))
}

fn position_text(cursor: Cursor, renders: usize) -> String {
    format!("Line {}, Col {}, {} redraws", cursor.row, cursor.col, renders)
}

fn clip(bytes: &[u8], room: usize) -> &[u8] {
    &bytes[..bytes.len().min(room)]
}

/// Erase after `used` columns. A row already filled to the right edge is
/// left alone: the cursor is still on its last column.
fn clear_rest<S: Surface + ?Sized>(
    surface: &mut S,
    used: usize,
    width: usize,
) -> Result<(), TermError> {
    if used < width {
        surface.clear(ClearMode::Right)?;
    }
    Ok(())
}
