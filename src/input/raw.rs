//! Low-level input collection: crossterm polling and translation into the
//! primitive events the input service consumes.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent};
use std::collections::VecDeque;
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// Collector that polls crossterm and queues the events the pager cares about.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.pending_events.is_empty()
    }

    /// Queue a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Retrieve the next raw event, blocking up to `timeout`.
    ///
    /// Returns `Ok(None)` when nothing relevant arrived in time.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.pop_pending() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(poll_timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        self.enqueue_event(event);
        Ok(self.pop_pending())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            _ => {}
        }
    }

    /// Pop the next queued event without polling the terminal.
    pub fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn queues_key_and_resize_in_order() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)));
        collector.process_event(Event::Resize(100, 30));

        match collector.pop_pending() {
            Some(RawInputEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('j')),
            other => panic!("expected key event, got {:?}", other),
        }
        assert_eq!(
            collector.pop_pending(),
            Some(RawInputEvent::Resize {
                width: 100,
                height: 30
            })
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn ignores_focus_changes() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::FocusGained);
        collector.process_event(Event::FocusLost);
        assert!(collector.is_idle());
    }

    #[test]
    fn queued_events_are_returned_before_polling() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Resize(10, 5));
        let event = collector.poll_event(Some(Duration::from_millis(1))).unwrap();
        assert_eq!(
            event,
            Some(RawInputEvent::Resize {
                width: 10,
                height: 5
            })
        );
    }
}
