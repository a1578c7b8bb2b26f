//! Terminal output components.
//!
//! This module hosts the raw-mode session guard, the frame writer, and the
//! styling used for gutters, matches and messages.

pub mod screen;
pub mod terminal;
pub mod theme;

pub use screen::Screen;
pub use terminal::{prompt_row, viewport_for, TerminalSession};
pub use theme::ColorTheme;
