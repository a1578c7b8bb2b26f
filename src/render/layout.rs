//! Wrap-aware page layout.
//!
//! A page is composed forward from a start line: each line is transformed,
//! optionally highlighted, measured, and admitted while it still fits in the
//! viewport. Line height depends on content, terminal width and the gutter, so
//! the only reliable answer to "where did this page end?" is
//! [`RenderResult::last_line`]. Callers must never derive it from the height.

use crate::config::DisplayOptions;
use crate::error::Result;
use crate::file_handler::Document;
use crate::render::highlight::highlight;
use crate::render::width::{truncate_to_width, visible_width};
use crate::transform;
use ratatui::crossterm::style::ContentStyle;

/// Line numbers are right-aligned in at least this many columns.
pub const MIN_GUTTER_DIGITS: usize = 6;
/// Blank columns between a line number and the line content.
pub const GUTTER_PADDING: usize = 2;
/// Content width never drops below this, however narrow the terminal.
pub const MIN_CONTENT_WIDTH: usize = 10;
/// Appended to a line that was cut to fit the remaining rows.
pub const TRUNCATION_MARKER: &str = "...";

/// With fewer rows left than this, a line that does not fit is left for the next page.
const SPILL_GUARD_ROWS: usize = 3;
/// Candidate lines read per render, as a multiple of the viewport height.
const LOOKAHEAD_FACTOR: usize = 2;

/// Terminal area available for page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Rows available for lines (the prompt row is not included).
    pub height: usize,
    /// Terminal columns.
    pub width: usize,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Columns left for line content beside a gutter of `gutter_width` columns.
    pub fn content_width(&self, gutter_width: usize) -> usize {
        self.width.saturating_sub(gutter_width).max(MIN_CONTENT_WIDTH)
    }
}

/// Digits needed to number every line of a `total_lines` document.
pub fn gutter_digits(total_lines: usize) -> usize {
    let digits = total_lines.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(MIN_GUTTER_DIGITS)
}

/// Visible columns taken by the line-number gutter, zero when numbers are off.
pub fn gutter_width(options: &DisplayOptions, total_lines: usize) -> usize {
    if options.show_line_number {
        gutter_digits(total_lines) + GUTTER_PADDING
    } else {
        0
    }
}

/// One admitted line of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// 0-based line number in the document.
    pub line: usize,
    /// Display text after transforms, highlighting and truncation (no gutter).
    pub text: String,
    /// Terminal rows this line consumes.
    pub rows: usize,
    pub truncated: bool,
}

/// The outcome of composing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub start: usize,
    pub lines: Vec<RenderedLine>,
    /// Index of the last line actually shown.
    pub last_line: usize,
    pub rows_used: usize,
    /// Columns the line numbers are right-aligned in, when they are shown.
    pub number_width: usize,
}

/// Rows a line of `visible_len` columns needs at `content_width` columns per row.
pub fn rows_needed(visible_len: usize, content_width: usize) -> usize {
    visible_len.div_ceil(content_width.max(1)).max(1)
}

/// Composes pages over a document with a fixed set of display options.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    document: &'a Document,
    options: DisplayOptions,
    match_style: ContentStyle,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(document: &'a Document, options: DisplayOptions, match_style: ContentStyle) -> Self {
        Self {
            document,
            options,
            match_style,
        }
    }

    /// Compose the page that starts at `start`.
    ///
    /// Pure with respect to the document: it rereads from the indexed offset
    /// of `start` and never depends on earlier renders. `start` is clamped to
    /// the last line.
    pub fn render_page(
        &self,
        start: usize,
        viewport: Viewport,
        pattern: Option<&str>,
    ) -> Result<RenderResult> {
        let total = self.document.total_lines();
        let start = start.min(total.saturating_sub(1));
        let content_width = viewport.content_width(gutter_width(&self.options, total));
        let candidates = viewport.height.max(1) * LOOKAHEAD_FACTOR;
        let raw_lines = self.document.read_lines(start, candidates)?;

        let mut lines = Vec::new();
        let mut rows_used = 0;
        for (offset, raw) in raw_lines.iter().enumerate() {
            let line_number = start + offset;
            let text = transform::apply(&self.options, raw);
            let text = match pattern {
                Some(p) if !p.is_empty() => highlight(&text, p, &self.match_style).into_owned(),
                _ => text.into_owned(),
            };

            let visible_len = visible_width(&text);
            let mut rows = rows_needed(visible_len, content_width);
            let remaining = viewport.height.saturating_sub(rows_used);

            // The first candidate is always admitted so a page is never blank.
            if offset > 0 && remaining < SPILL_GUARD_ROWS && rows > remaining {
                break;
            }

            let mut text = text;
            let mut truncated = false;
            if rows_used + rows > viewport.height && remaining > 0 {
                let budget = remaining * content_width;
                if visible_len > budget {
                    let keep = budget.saturating_sub(TRUNCATION_MARKER.len());
                    let mut cut = truncate_to_width(&text, keep).into_owned();
                    cut.push_str(TRUNCATION_MARKER);
                    text = cut;
                    rows = remaining;
                    truncated = true;
                }
            }

            rows_used += rows;
            lines.push(RenderedLine {
                line: line_number,
                text,
                rows,
                truncated,
            });
        }

        let last_line = lines.last().map_or(start, |l| l.line);
        log::trace!(
            "render_page start={} last={} rows={}/{}",
            start,
            last_line,
            rows_used,
            viewport.height
        );

        Ok(RenderResult {
            start,
            lines,
            last_line,
            rows_used,
            number_width: gutter_digits(total),
        })
    }
}
