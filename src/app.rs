//! Application orchestration layer
//!
//! Wires the document, navigator, input service and screen together and runs
//! the interactive loop. The non-interactive path lives in [`stream`].

pub mod resize;
pub mod stream;

use crate::config::DisplayOptions;
use crate::error::Result;
use crate::file_handler::Document;
use crate::input::{InputAction, InputService};
use crate::navigation::{Navigator, SearchOutcome};
use crate::render::ui::{prompt_row, viewport_for, ColorTheme, Screen, TerminalSession};
use crate::transform;
use resize::ResizeFlag;
use std::io::{self, Stdout};
use std::time::Duration;

pub use stream::process_stream;

/// How long one loop iteration waits for input before rechecking for resizes.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Interactive pager over a single document.
pub struct Application {
    navigator: Navigator,
    input: InputService,
    screen: Screen<Stdout>,
    resize: ResizeFlag,
    rows: u16,
    /// One-shot message shown on the prompt row after the next page draw.
    status: Option<String>,
}

impl Application {
    /// Create the pager for an opened, non-empty document.
    pub fn new(document: Document, options: DisplayOptions, theme: ColorTheme) -> Result<Self> {
        let (cols, rows) = TerminalSession::size();
        let navigator = Navigator::new(
            document,
            options.for_interactive(),
            theme.search_match,
            viewport_for(cols, rows),
        )?;

        Ok(Self {
            navigator,
            input: InputService::new(),
            screen: Screen::new(io::stdout(), theme),
            resize: ResizeFlag::new(),
            rows,
            status: None,
        })
    }

    /// Run the interactive loop until the user quits.
    ///
    /// The terminal is restored on every exit path, including errors.
    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        let listener = resize::spawn_resize_listener(self.resize.clone());

        let result = tokio::task::block_in_place(|| self.event_loop());

        if let Some(handle) = listener {
            handle.abort();
        }
        session.cleanup()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        self.handle_resize()?;
        loop {
            if self.resize.take() {
                self.handle_resize()?;
            }

            let Some(action) = self.input.poll_action(Some(POLL_INTERVAL))? else {
                continue;
            };
            if !self.execute(action)? {
                return Ok(());
            }
        }
    }

    /// Execute one action - returns false if the pager should quit
    fn execute(&mut self, action: InputAction) -> Result<bool> {
        log::trace!("action {:?}", action);
        let redraw = match action {
            InputAction::Quit => return Ok(false),
            InputAction::NextPage => self.navigator.next_page()?,
            InputAction::PreviousPage => self.navigator.prev_page()?,
            InputAction::NextLine => self.navigator.next_line()?,
            InputAction::PreviousLine => self.navigator.prev_line()?,
            InputAction::GoToStart => self.navigator.goto_first()?,
            InputAction::GoToEnd => self.navigator.goto_last()?,
            InputAction::GoToLine(line) => {
                if !self.navigator.goto_line(line)? {
                    self.status = Some(format!("Line {} out of range", line));
                }
                true
            }
            InputAction::NextMatch => {
                let moved = self.navigator.next_match()?;
                self.status = self.navigator.match_status();
                moved
            }
            InputAction::PreviousMatch => {
                let moved = self.navigator.prev_match()?;
                self.status = self.navigator.match_status();
                moved
            }
            InputAction::ExecuteSearch(pattern) => {
                self.status = match self.navigator.search(&pattern)? {
                    SearchOutcome::Cleared => Some("Search cleared".to_string()),
                    SearchOutcome::NotFound => Some(format!("Pattern not found: {}", pattern)),
                    SearchOutcome::Found { .. } => self.navigator.match_status(),
                };
                true
            }
            InputAction::FormatJson { line } => {
                self.show_json(line)?;
                true
            }
            InputAction::UpdateCommand(buffer) => {
                self.screen.draw_prompt(prompt_row(self.rows), &buffer)?;
                false
            }
            InputAction::CancelCommand => true,
            InputAction::Resize { .. } => {
                self.resize.notify();
                false
            }
            InputAction::NoAction | InputAction::InvalidInput => false,
        };

        if redraw {
            self.draw()?;
        }
        Ok(true)
    }

    fn draw(&mut self) -> Result<()> {
        self.screen
            .draw_page(self.navigator.page(), self.navigator.options())?;
        if let Some(message) = self.status.take() {
            self.screen.draw_status(prompt_row(self.rows), &message)?;
        }
        Ok(())
    }

    fn handle_resize(&mut self) -> Result<()> {
        let (cols, rows) = TerminalSession::size();
        log::debug!("terminal size {}x{}", cols, rows);
        self.rows = rows;
        self.navigator.resize(viewport_for(cols, rows))?;
        self.draw()?;
        if let Some(prompt) = self.input.prompt() {
            self.screen.draw_prompt(prompt_row(self.rows), &prompt)?;
        }
        Ok(())
    }

    /// Show a line (1-based, or the top line) on the JSON screen until a key is pressed.
    fn show_json(&mut self, line: Option<usize>) -> Result<()> {
        let total = self.navigator.document().total_lines();
        let target = match line {
            None => self.navigator.top(),
            Some(n) if (1..=total).contains(&n) => n - 1,
            Some(n) => {
                self.status = Some(format!("Line {} out of range", n));
                return Ok(());
            }
        };

        let Some(raw) = self.navigator.document().read_line(target)? else {
            return Ok(());
        };
        let text = transform::apply(self.navigator.options(), &raw);
        self.screen.show_json_line(target, &text)?;

        if self.input.wait_for_key()? {
            self.resize.notify();
        }
        Ok(())
    }
}
