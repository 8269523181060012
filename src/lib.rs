// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. term::TermError)
    clippy::module_name_repetitions
)]

//! # bed
//!
//! A small terminal text editor.
//!
//! bed edits a file as a list of byte lines and keeps terminal output to a
//! minimum:
//! - Only rows whose content changed are redrawn
//! - Scrolling shifts the screen with a terminal region scroll and draws
//!   just the rows it reveals
//! - The cursor and scroll offset are clamped, never rejected
//!
//! ## Modules
//!
//! - [`term`]: Terminal surface contract, keys, styling, crossterm backend
//! - [`editor`]: Line buffer, redraw tracking and the scrolling file view
//! - [`ui`]: Viewport math, line-number gutter, title and status bars
//! - [`app`]: Editor shell and main event loop
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod term;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Outcome, Session};
    pub use crate::editor::{Cursor, FileView, LineBuffer};
    pub use crate::term::{Key, KeyEvent, RecordingSurface, Surface};
    pub use crate::ui::viewport::Viewport;
}
