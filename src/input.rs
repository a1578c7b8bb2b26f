//! Keyboard input.
//!
//! `raw` polls crossterm for key and resize events; `service` runs the pager's
//! key bindings and command prompt over them and yields [`InputAction`]s.

pub mod raw;
pub mod service;

pub use raw::{RawInputCollector, RawInputEvent};
pub use service::{parse_command, InputAction, InputService, InputState, InputStateMachine};
