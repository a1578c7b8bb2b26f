//! Screen output: pages, the prompt row, and the JSON screens.
//!
//! Everything is written as plain text with inline SGR sequences and `\r\n`
//! line endings, since raw mode performs no newline translation. The writer is
//! generic so tests can capture output in a `Vec<u8>`.

use crate::config::DisplayOptions;
use crate::error::{LogLensError, Result};
use crate::json;
use crate::render::layout::RenderResult;
use crate::render::ui::theme::ColorTheme;
use ratatui::crossterm::{
    cursor::MoveTo,
    queue,
    style::ContentStyle,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

const RETURN_HINT: &str = "Press any key to return...";

fn terminal_error(err: io::Error) -> LogLensError {
    LogLensError::terminal(err.to_string())
}

/// Writes pager frames to a terminal (or any `Write`).
#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
    theme: ColorTheme,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, theme: ColorTheme) -> Self {
        Self { out, theme }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    /// Clear the screen and draw a composed page from the top-left corner.
    pub fn draw_page(&mut self, page: &RenderResult, options: &DisplayOptions) -> Result<()> {
        self.write_page(page, options).map_err(terminal_error)
    }

    /// Replace the prompt row with the command buffer (sentinel included).
    pub fn draw_prompt(&mut self, row: u16, buffer: &str) -> Result<()> {
        self.write_row(row, buffer, None).map_err(terminal_error)
    }

    /// Replace the prompt row with a status message.
    pub fn draw_status(&mut self, row: u16, message: &str) -> Result<()> {
        let style = self.theme.status;
        self.write_row(row, message, Some(style))
            .map_err(terminal_error)
    }

    /// Show a transformed line on the JSON screen.
    ///
    /// A line that is not a JSON value gets the not-valid screen; a value that
    /// cannot be formatted gets the formatting-error screen.
    pub fn show_json_line(&mut self, line_number: usize, text: &str) -> Result<()> {
        if !json::is_well_formed(text) {
            return self.show_invalid_json(line_number, text);
        }
        match json::pretty_print(text) {
            Ok(formatted) => self.show_json(line_number, &formatted),
            Err(err) => self.show_format_error(line_number, text, &err.to_string()),
        }
    }

    /// Show a pretty-printed JSON line on its own screen.
    pub fn show_json(&mut self, line_number: usize, formatted: &str) -> Result<()> {
        self.write_json(line_number, formatted)
            .map_err(terminal_error)
    }

    /// Tell the user a line is not JSON, echoing its content.
    pub fn show_invalid_json(&mut self, line_number: usize, raw: &str) -> Result<()> {
        let headline = format!("Line {} is not valid JSON", line_number + 1);
        self.write_failure(&headline, raw).map_err(terminal_error)
    }

    /// Report a JSON line that parsed but could not be formatted.
    pub fn show_format_error(&mut self, line_number: usize, raw: &str, reason: &str) -> Result<()> {
        let headline = format!("Line {}: JSON formatting failed: {}", line_number + 1, reason);
        self.write_failure(&headline, raw).map_err(terminal_error)
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn write_page(&mut self, page: &RenderResult, options: &DisplayOptions) -> io::Result<()> {
        self.clear()?;
        for line in &page.lines {
            if options.show_line_number {
                let number = format!("{:>width$}", line.line + 1, width = page.number_width);
                write!(self.out, "{}  ", self.theme.line_numbers.apply(number))?;
            }
            write!(self.out, "{}\r\n", line.text)?;
        }
        self.out.flush()
    }

    fn write_row(&mut self, row: u16, text: &str, style: Option<ContentStyle>) -> io::Result<()> {
        queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        match style {
            Some(style) => write!(self.out, "{}", style.apply(text))?,
            None => self.out.write_all(text.as_bytes())?,
        }
        self.out.flush()
    }

    fn write_json(&mut self, line_number: usize, formatted: &str) -> io::Result<()> {
        self.clear()?;
        let title = format!("=== Line {} JSON ===", line_number + 1);
        write!(self.out, "{}\r\n\r\n", self.theme.title.apply(title))?;
        for line in formatted.lines() {
            write!(self.out, "{}\r\n", line)?;
        }
        write!(self.out, "\r\n{}", self.theme.status.apply(RETURN_HINT))?;
        self.out.flush()
    }

    fn write_failure(&mut self, headline: &str, raw: &str) -> io::Result<()> {
        self.clear()?;
        write!(self.out, "{}\r\n\r\n", self.theme.error_text.apply(headline))?;
        write!(self.out, "Original content:\r\n{}\r\n\r\n", raw)?;
        write!(self.out, "{}", self.theme.status.apply(RETURN_HINT))?;
        self.out.flush()
    }
}
