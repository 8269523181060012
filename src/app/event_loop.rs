use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::{App, persist};
use crate::editor::{FileView, LineBuffer};
use crate::term::{ClearMode, CrosstermSurface, CursorShape, Key, KeyEvent, Surface};
use crate::ui::status::{HELP_TEXT, render_prompt, render_status_bar, render_title_bar};
use crate::ui::viewport::Viewport;

/// How an editing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ctrl-Q, after any save the user asked for.
    Quit,
    /// Ctrl-C: leave immediately without saving.
    Aborted,
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or terminal I/O fails while editing.
    pub fn run(&self) -> Result<Outcome> {
        let lines = persist::load_lines(&self.file_path)?;
        let mut surface = CrosstermSurface::open(self.mouse)
            .context("Failed to initialize terminal; bed requires an interactive terminal")?;
        let mut session = Session::new(self.file_path.clone(), lines, &surface)
            .with_tab_width(self.tab_width)
            .with_wheel_lines(self.wheel_lines);
        tracing::info!(path = %self.file_path.display(), "editing session started");
        let outcome = session.edit(&mut surface)?;
        tracing::info!(?outcome, renders = session.renders(), "editing session ended");
        Ok(outcome)
    }
}

/// One file open in the editor.
///
/// The title bar sits on row 0, the file view fills the rows between, and
/// the status bar takes the last row.
pub struct Session {
    path: PathBuf,
    view: FileView,
    /// Modified state the title bar was last drawn with.
    title_drawn: Option<bool>,
    /// One-shot message shown in place of the key help.
    notice: Option<String>,
    renders: usize,
}

impl Session {
    /// Create a session for `lines`, laid out to fit `surface`.
    pub fn new<S: Surface + ?Sized>(path: PathBuf, lines: Vec<Vec<u8>>, surface: &S) -> Self {
        let (x, y, width, height) = view_area(surface);
        Self {
            path,
            view: FileView::new(LineBuffer::new(lines), Viewport::new(x, y, width, height)),
            title_drawn: None,
            notice: None,
            renders: 0,
        }
    }

    /// Load `path` and create a session for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open<S: Surface + ?Sized>(path: PathBuf, surface: &S) -> Result<Self> {
        let lines = persist::load_lines(&path)?;
        Ok(Self::new(path, lines, surface))
    }

    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.view = self.view.with_tab_width(width);
        self
    }

    #[must_use]
    pub fn with_wheel_lines(mut self, lines: usize) -> Self {
        self.view = self.view.with_wheel_lines(lines);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn view(&self) -> &FileView {
        &self.view
    }

    /// Number of frames rendered so far.
    pub const fn renders(&self) -> usize {
        self.renders
    }

    /// Draw the first frame, then process keys until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails.
    pub fn edit<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Outcome> {
        surface.set_cursor_shape(CursorShape::BlinkingBar)?;
        self.render(surface)?;
        loop {
            let Some(event) = surface.read_key(None)? else {
                continue;
            };
            if let Some(outcome) = self.handle_event(surface, event)? {
                return Ok(outcome);
            }
            self.render(surface)?;
        }
    }

    /// Apply one event. Returns the outcome if the event ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails. A failed save is reported on
    /// the status bar instead.
    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: KeyEvent,
    ) -> Result<Option<Outcome>> {
        match event.key {
            Key::Ctrl('c') => {
                tracing::debug!("aborted without saving");
                return Ok(Some(Outcome::Aborted));
            }
            Key::Ctrl('q') => {
                if !self.view.is_unsaved() || self.confirm_save(surface)? {
                    return Ok(Some(Outcome::Quit));
                }
            }
            Key::Ctrl('s') => {
                self.save_or_report();
            }
            Key::Resize => self.resize(surface)?,
            _ => self.view.handle_input(surface, event)?,
        }
        Ok(None)
    }

    /// Write the document to its file and clear the unsaved flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        persist::save_lines(&self.path, self.view.lines())?;
        self.view.mark_saved();
        Ok(())
    }

    /// Draw everything that changed and park the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal I/O fails.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        self.renders += 1;

        let modified = self.view.is_unsaved();
        if self.title_drawn != Some(modified) {
            render_title_bar(surface, &self.path, modified)?;
            self.title_drawn = Some(modified);
        }

        self.view.render(surface)?;

        let notice = self.notice.take();
        let message = notice.as_deref().unwrap_or(HELP_TEXT);
        render_status_bar(surface, message, self.view.cursor(), self.renders)?;

        self.view.place_cursor(surface)?;
        surface.flush()?;
        Ok(())
    }

    /// Ask whether to save before quitting. Returns whether to go ahead and
    /// quit, which is false only when the user said yes and the save failed.
    fn confirm_save<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<bool> {
        let question = format!("Do you want to save {}? [y/n]", self.path.display());
        render_prompt(surface, &question)?;
        surface.flush()?;
        let answer = surface.read_key(None)?.map(|event| event.key);
        if !matches!(answer, Some(Key::Char('y' | 'Y'))) {
            tracing::debug!("discarding unsaved changes");
            return Ok(true);
        }
        Ok(self.save_or_report())
    }

    fn save_or_report(&mut self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "save failed");
                self.notice = Some(format!("Save failed: {err:#}"));
                false
            }
        }
    }

    fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear(ClearMode::Screen)?;
        let (x, y, width, height) = view_area(surface);
        self.view.resize(x, y, width, height);
        self.title_drawn = None;
        tracing::debug!(width, height, "resized");
        Ok(())
    }
}

/// File view placement: full width, between the title and status rows.
fn view_area<S: Surface + ?Sized>(surface: &S) -> (u16, u16, u16, u16) {
    (0, 1, surface.width(), surface.height().saturating_sub(2))
}
