//! Raw-mode terminal session.
//!
//! Entering the session switches to raw mode and the alternate screen; the
//! previous state is restored by `cleanup` or, failing that, on drop.

use crate::error::{LogLensError, Result};
use crate::render::layout::Viewport;
use ratatui::crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Size assumed when the terminal cannot be queried.
pub const DEFAULT_SIZE: (u16, u16) = (80, 20);
/// Minimum number of content rows, however small the window.
pub const MIN_VIEW_HEIGHT: usize = 3;

/// Guard for raw mode plus the alternate screen.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    /// Fails when the terminal refuses raw mode; this is fatal for the pager.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| LogLensError::terminal(format!("cannot enter raw mode: {}", e)))?;
        let session = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .map_err(|e| LogLensError::terminal(e.to_string()))?;
        Ok(session)
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn cleanup(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            execute!(io::stdout(), Show, LeaveAlternateScreen)
                .map_err(|e| LogLensError::terminal(e.to_string()))?;
            disable_raw_mode().map_err(|e| LogLensError::terminal(e.to_string()))?;
        }
        Ok(())
    }

    /// Current `(columns, rows)`, or [`DEFAULT_SIZE`] when unavailable.
    pub fn size() -> (u16, u16) {
        terminal::size().unwrap_or_else(|e| {
            log::warn!("terminal size unavailable ({}), assuming 80x20", e);
            DEFAULT_SIZE
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Viewport for a terminal of `cols` x `rows`; the last row is kept for the prompt.
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    let height = usize::from(rows).saturating_sub(1).max(MIN_VIEW_HEIGHT);
    Viewport::new(height, usize::from(cols))
}

/// Row used for the command prompt and status messages.
pub fn prompt_row(rows: u16) -> u16 {
    rows.saturating_sub(1)
}
