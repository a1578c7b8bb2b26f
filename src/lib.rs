//! # loglens - Interactive Terminal Pager for Log Files
//!
//! A pager that indexes a file once and then renders any page by seeking to
//! its first line, so files larger than memory can be browsed. Lines longer
//! than the terminal wrap across rows; paging accounts for that in both
//! directions.
//!
//! ## Features
//!
//! - **Wrap-aware paging**: forward paging is exact, backward paging finds the
//!   previous page start by bounded binary search
//! - **Case-insensitive search**: every matching line is found up front and
//!   `n`/`N` cycle through them, with inline highlighting
//! - **Log payload cleanup**: optional trimming and unescaping of `\n`, `\t`
//!   and quote escapes
//! - **JSON view**: pretty-print any line that holds a JSON value
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Display options and optional config file
//! - [`file_handler`] - Line index and line-addressed file access
//! - [`transform`] / [`json`] - Per-line text transforms
//! - [`render`] - Page layout, highlighting and terminal output
//! - [`search`] / [`navigation`] - Search state and viewport movement
//! - [`input`] - Key bindings and command prompt
//! - [`app`] - Interactive loop and stream mode

// Core modules
pub mod config;
pub mod error;
pub mod file_handler;
pub mod json;
pub mod transform;

// Subsystems
pub mod input;
pub mod render;

// Core components
pub mod app;
pub mod navigation;
pub mod search;

// Re-export commonly used types for convenience
pub use config::{Config, DisplayOptions};
pub use error::{LogLensError, Result};

// Public API surface for external usage
pub use app::{process_stream, Application};
pub use file_handler::Document;
pub use navigation::{Navigator, SearchOutcome};
pub use render::{LayoutEngine, RenderResult, Viewport};
pub use search::{SearchEngine, SearchState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
