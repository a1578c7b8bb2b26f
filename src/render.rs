//! Rendering subsystem.
//!
//! `layout` decides which lines fit a viewport, `highlight` and `width` work
//! on line text that carries inline escape sequences, and `ui` writes frames
//! to the terminal.

pub mod highlight;
pub mod layout;
pub mod ui;
pub mod width;

pub use layout::{LayoutEngine, RenderResult, RenderedLine, Viewport};
