//! Editor shell and main event loop.
//!
//! - [`App`]: Builder that opens the terminal and runs a session
//! - [`Session`]: One open file: key dispatch, bars, save and quit
//! - [`persist`]: Loading and saving files as byte lines

mod event_loop;
pub mod persist;

pub use event_loop::{Outcome, Session};

use std::path::PathBuf;

use crate::editor::{DEFAULT_TAB_WIDTH, DEFAULT_WHEEL_LINES};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    mouse: bool,
    tab_width: usize,
    wheel_lines: usize,
}

impl App {
    /// Create a new application for the given file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            mouse: true,
            tab_width: DEFAULT_TAB_WIDTH,
            wheel_lines: DEFAULT_WHEEL_LINES,
        }
    }

    /// Enable or disable mouse capture.
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    /// Number of spaces inserted by Tab.
    pub const fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Rows moved per mouse-wheel step.
    pub const fn with_wheel_lines(mut self, lines: usize) -> Self {
        self.wheel_lines = lines;
        self
    }
}
