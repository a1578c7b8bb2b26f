//! High-level input service.
//!
//! Runs the pager's key bindings over raw events. Most keys act immediately;
//! `:` and `/` open a command buffer on the prompt row that is interpreted
//! when Enter is pressed.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Current input mode: single-key navigation or an open command buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    /// Collecting a command after `sentinel` (`:` or `/`).
    Command { sentinel: char },
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    NextPage,
    PreviousPage,
    NextLine,
    PreviousLine,
    GoToStart,
    GoToEnd,
    /// Jump to a 1-based line number.
    GoToLine(usize),
    NextMatch,
    PreviousMatch,
    /// Search for a pattern; empty clears the current search.
    ExecuteSearch(String),
    /// Show a line as JSON: a 1-based line number, or the top line when `None`.
    FormatJson { line: Option<usize> },
    /// The prompt row now shows this buffer, sentinel included.
    UpdateCommand(String),
    /// The command buffer was closed without running anything.
    CancelCommand,
    Resize { width: u16, height: u16 },
    Quit,
    NoAction,
    InvalidInput,
}

/// Interpret a submitted command buffer (without its sentinel).
///
/// `:N` jumps to line N, `:f` formats the top line as JSON and `:fN` formats
/// line N. `/text` searches. Anything unparseable closes the prompt.
pub fn parse_command(sentinel: char, body: &str) -> InputAction {
    match sentinel {
        '/' => InputAction::ExecuteSearch(body.to_string()),
        ':' => {
            if let Some(rest) = body.strip_prefix('f') {
                if rest.is_empty() {
                    return InputAction::FormatJson { line: None };
                }
                return match rest.parse::<usize>() {
                    Ok(line) => InputAction::FormatJson { line: Some(line) },
                    Err(_) => InputAction::CancelCommand,
                };
            }
            match body.parse::<usize>() {
                Ok(line) => InputAction::GoToLine(line),
                Err(_) => InputAction::CancelCommand,
            }
        }
        _ => InputAction::CancelCommand,
    }
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// State machine for the pager's key bindings.
#[derive(Debug)]
pub struct InputStateMachine {
    state: InputState,
    command_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Navigation,
            command_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match (self.state, key_event.code, key_event.modifiers) {
            (InputState::Navigation, KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            (InputState::Navigation, KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                InputAction::NextPage
            }
            (InputState::Navigation, KeyCode::Char('b'), KeyModifiers::CONTROL) => {
                InputAction::PreviousPage
            }
            (InputState::Navigation, KeyCode::Char('q' | 'Q'), modifiers) if plain(modifiers) => {
                InputAction::Quit
            }
            (InputState::Navigation, KeyCode::Char(' '), modifiers) if plain(modifiers) => {
                InputAction::NextPage
            }
            (InputState::Navigation, KeyCode::PageDown, _) => InputAction::NextPage,
            (InputState::Navigation, KeyCode::Char('b'), modifiers) if plain(modifiers) => {
                InputAction::PreviousPage
            }
            (InputState::Navigation, KeyCode::PageUp, _) => InputAction::PreviousPage,
            (InputState::Navigation, KeyCode::Char('j' | 'J'), modifiers) if plain(modifiers) => {
                InputAction::NextLine
            }
            (InputState::Navigation, KeyCode::Down | KeyCode::Enter, _) => InputAction::NextLine,
            (InputState::Navigation, KeyCode::Char('k' | 'K'), modifiers) if plain(modifiers) => {
                InputAction::PreviousLine
            }
            (InputState::Navigation, KeyCode::Up, _) => InputAction::PreviousLine,
            (InputState::Navigation, KeyCode::Char('g'), modifiers) if plain(modifiers) => {
                InputAction::GoToStart
            }
            (InputState::Navigation, KeyCode::Home, _) => InputAction::GoToStart,
            (InputState::Navigation, KeyCode::Char('G'), modifiers) if plain(modifiers) => {
                InputAction::GoToEnd
            }
            (InputState::Navigation, KeyCode::End, _) => InputAction::GoToEnd,
            (InputState::Navigation, KeyCode::Char('n'), modifiers) if plain(modifiers) => {
                InputAction::NextMatch
            }
            (InputState::Navigation, KeyCode::Char('N'), modifiers) if plain(modifiers) => {
                InputAction::PreviousMatch
            }
            (InputState::Navigation, KeyCode::Char('f' | 'F'), modifiers) if plain(modifiers) => {
                InputAction::FormatJson { line: None }
            }
            (InputState::Navigation, KeyCode::Char(sentinel @ (':' | '/')), modifiers)
                if plain(modifiers) =>
            {
                self.state = InputState::Command { sentinel };
                self.command_buffer.clear();
                InputAction::UpdateCommand(sentinel.to_string())
            }
            (InputState::Command { .. }, KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (InputState::Command { .. }, KeyCode::Esc, _) => {
                self.close_command();
                InputAction::CancelCommand
            }
            (InputState::Command { sentinel }, KeyCode::Char(ch), modifiers)
                if !ch.is_control() && plain(modifiers) =>
            {
                self.command_buffer.push(ch);
                InputAction::UpdateCommand(format!("{}{}", sentinel, self.command_buffer))
            }
            (InputState::Command { sentinel }, KeyCode::Backspace, _) => {
                // The sentinel itself cannot be erased.
                self.command_buffer.pop();
                InputAction::UpdateCommand(format!("{}{}", sentinel, self.command_buffer))
            }
            (InputState::Command { sentinel }, KeyCode::Enter, _) => {
                let body = std::mem::take(&mut self.command_buffer);
                self.state = InputState::Navigation;
                parse_command(sentinel, &body)
            }
            (InputState::Command { .. }, _, _) => InputAction::NoAction,
            _ => InputAction::InvalidInput,
        }
    }

    fn close_command(&mut self) {
        self.state = InputState::Navigation;
        self.command_buffer.clear();
    }

    pub fn get_command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state_machine.get_state()
    }

    /// The open command buffer as shown on the prompt row, sentinel included.
    pub fn prompt(&self) -> Option<String> {
        match self.state() {
            InputState::Command { sentinel } => Some(format!(
                "{}{}",
                sentinel,
                self.state_machine.get_command_buffer()
            )),
            InputState::Navigation => None,
        }
    }

    /// Wait up to `timeout` for the next meaningful action.
    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        Ok(self
            .raw_input
            .poll_event(timeout)?
            .and_then(|event| self.process_raw_event(event)))
    }

    /// Block until any key is pressed, as on the JSON screen.
    ///
    /// Returns `true` when the terminal was resized while waiting. The key is
    /// swallowed and does not reach the state machine.
    pub fn wait_for_key(&mut self) -> Result<bool> {
        let mut resized = false;
        loop {
            match self.raw_input.poll_event(None)? {
                Some(RawInputEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    return Ok(resized)
                }
                Some(RawInputEvent::Resize { .. }) => resized = true,
                _ => {}
            }
        }
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.pop_pending() {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_str(machine: &mut InputStateMachine, text: &str) -> InputAction {
        let mut last = InputAction::NoAction;
        for ch in text.chars() {
            last = machine.handle_key_event(key(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn paging_bindings() {
        let mut machine = InputStateMachine::new();
        assert_eq!(machine.handle_key_event(ctrl('f')), InputAction::NextPage);
        assert_eq!(machine.handle_key_event(ctrl('b')), InputAction::PreviousPage);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char(' '))), InputAction::NextPage);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('b'))), InputAction::PreviousPage);
        assert_eq!(machine.handle_key_event(key(KeyCode::PageDown)), InputAction::NextPage);
        assert_eq!(machine.handle_key_event(key(KeyCode::PageUp)), InputAction::PreviousPage);
    }

    #[test]
    fn ctrl_f_is_not_format() {
        let mut machine = InputStateMachine::new();
        assert_eq!(machine.handle_key_event(ctrl('f')), InputAction::NextPage);
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char('f'))),
            InputAction::FormatJson { line: None }
        );
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char('F'))),
            InputAction::FormatJson { line: None }
        );
    }

    #[test]
    fn line_and_jump_bindings() {
        let mut machine = InputStateMachine::new();
        for code in [KeyCode::Char('j'), KeyCode::Char('J'), KeyCode::Down, KeyCode::Enter] {
            assert_eq!(machine.handle_key_event(key(code)), InputAction::NextLine);
        }
        for code in [KeyCode::Char('k'), KeyCode::Char('K'), KeyCode::Up] {
            assert_eq!(machine.handle_key_event(key(code)), InputAction::PreviousLine);
        }
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('g'))), InputAction::GoToStart);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('G'))), InputAction::GoToEnd);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('n'))), InputAction::NextMatch);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('N'))), InputAction::PreviousMatch);
    }

    #[test]
    fn quit_bindings() {
        let mut machine = InputStateMachine::new();
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('Q'))), InputAction::Quit);
        assert_eq!(machine.handle_key_event(ctrl('c')), InputAction::Quit);
    }

    #[test]
    fn unbound_key_is_invalid() {
        let mut machine = InputStateMachine::new();
        assert_eq!(machine.handle_key_event(key(KeyCode::Char('z'))), InputAction::InvalidInput);
    }

    #[test]
    fn goto_command() {
        let mut machine = InputStateMachine::new();
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char(':'))),
            InputAction::UpdateCommand(":".into())
        );
        assert_eq!(type_str(&mut machine, "42"), InputAction::UpdateCommand(":42".into()));
        assert_eq!(machine.handle_key_event(key(KeyCode::Enter)), InputAction::GoToLine(42));
        assert_eq!(machine.get_state(), InputState::Navigation);
    }

    #[test]
    fn search_command_keeps_case_and_spaces() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        type_str(&mut machine, "Disk Full");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Enter)),
            InputAction::ExecuteSearch("Disk Full".into())
        );
    }

    #[test]
    fn backspace_never_erases_sentinel() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        type_str(&mut machine, "a");
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateCommand("/".into())
        );
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateCommand("/".into())
        );
        assert_eq!(machine.get_state(), InputState::Command { sentinel: '/' });
    }

    #[test]
    fn escape_cancels_command() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char(':')));
        type_str(&mut machine, "12");
        assert_eq!(machine.handle_key_event(key(KeyCode::Esc)), InputAction::CancelCommand);
        assert_eq!(machine.get_state(), InputState::Navigation);
        assert_eq!(machine.get_command_buffer(), "");
    }

    #[test]
    fn keys_inside_command_are_text() {
        let mut machine = InputStateMachine::new();
        machine.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(
            machine.handle_key_event(key(KeyCode::Char('q'))),
            InputAction::UpdateCommand("/q".into())
        );
        assert_eq!(machine.handle_key_event(key(KeyCode::Down)), InputAction::NoAction);
    }

    #[test]
    fn parse_command_variants() {
        assert_eq!(parse_command(':', "7"), InputAction::GoToLine(7));
        assert_eq!(parse_command(':', "f"), InputAction::FormatJson { line: None });
        assert_eq!(parse_command(':', "f12"), InputAction::FormatJson { line: Some(12) });
        assert_eq!(parse_command(':', "fx"), InputAction::CancelCommand);
        assert_eq!(parse_command(':', "abc"), InputAction::CancelCommand);
        assert_eq!(parse_command(':', ""), InputAction::CancelCommand);
        assert_eq!(parse_command('/', ""), InputAction::ExecuteSearch(String::new()));
    }

    #[test]
    fn service_filters_invalid_and_passes_resize() {
        let mut service = InputService::new();
        assert!(service
            .process_event(Event::Key(key(KeyCode::Char('z'))))
            .is_empty());
        assert_eq!(
            service.process_event(Event::Resize(120, 40)),
            vec![InputAction::Resize {
                width: 120,
                height: 40
            }]
        );
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('j')))),
            vec![InputAction::NextLine]
        );
    }

    #[test]
    fn prompt_survives_a_resize_while_typing() {
        let mut service = InputService::new();
        assert_eq!(service.prompt(), None);

        for ch in ['/', 'e', 'r', 'r'] {
            service.process_event(Event::Key(key(KeyCode::Char(ch))));
        }
        service.process_event(Event::Resize(100, 30));
        assert_eq!(service.prompt().as_deref(), Some("/err"));

        service.process_event(Event::Key(key(KeyCode::Esc)));
        assert_eq!(service.prompt(), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut machine = InputStateMachine::new();
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(machine.handle_key_event(release), InputAction::NoAction);
    }
}
