//! Terminal resize notification.
//!
//! Resizes are reported asynchronously (SIGWINCH, or a crossterm resize
//! event) but handled synchronously by the main loop, which checks the flag
//! once per iteration and recomputes the viewport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Shared "the window changed size" flag.
#[derive(Debug, Clone, Default)]
pub struct ResizeFlag(Arc<AtomicBool>);

impl ResizeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a resize happened. Repeated notifications coalesce.
    pub fn notify(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Consume a pending notification, returning whether there was one.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Listen for SIGWINCH and raise `flag` on every delivery.
///
/// Must be called from within a tokio runtime. Returns `None` when signal
/// handling is unavailable; crossterm resize events still reach the flag.
#[cfg(unix)]
pub fn spawn_resize_listener(flag: ResizeFlag) -> Option<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::window_change()) {
        Ok(mut stream) => Some(tokio::spawn(async move {
            while stream.recv().await.is_some() {
                flag.notify();
            }
        })),
        Err(err) => {
            log::warn!("cannot listen for window size changes: {}", err);
            None
        }
    }
}

#[cfg(not(unix))]
pub fn spawn_resize_listener(_flag: ResizeFlag) -> Option<JoinHandle<()>> {
    None
}
