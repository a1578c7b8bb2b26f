//! Viewport navigation over a document.
//!
//! The [`Navigator`] owns the document, the current top line and the page
//! last composed for it. Every movement goes through the layout engine so the
//! recorded page always matches what is on screen.
//!
//! Forward paging is exact: the next page starts at the last line shown.
//! Backward paging has no such anchor because wrapped lines have variable
//! heights, so the new top is found by binary search over candidate starts
//! whose pages end at (or just before) the current top.

use crate::config::DisplayOptions;
use crate::error::Result;
use crate::file_handler::Document;
use crate::render::{LayoutEngine, RenderResult, Viewport};
use crate::search::{SearchEngine, SearchState};
use ratatui::crossterm::style::ContentStyle;
use std::cmp::Ordering;

/// Upper bound on layout probes spent on one backward page.
pub const MAX_REVERSE_PROBES: usize = 15;

/// Result of submitting a search pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty pattern: the previous search was dropped.
    Cleared,
    /// No line contains the pattern; the view did not move.
    NotFound,
    /// The view jumped to the first of `matches` matching lines.
    Found { matches: usize },
}

/// Navigation state machine for the interactive pager.
#[derive(Debug)]
pub struct Navigator {
    document: Document,
    options: DisplayOptions,
    match_style: ContentStyle,
    viewport: Viewport,
    top: usize,
    page: RenderResult,
    search: Option<SearchState>,
}

impl Navigator {
    /// Compose the first page of `document`.
    pub fn new(
        document: Document,
        options: DisplayOptions,
        match_style: ContentStyle,
        viewport: Viewport,
    ) -> Result<Self> {
        let page = LayoutEngine::new(&document, options, match_style).render_page(0, viewport, None)?;
        Ok(Self {
            document,
            options,
            match_style,
            viewport,
            top: 0,
            page,
            search: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// First line on screen (0-based).
    pub fn top(&self) -> usize {
        self.top
    }

    /// The page currently on screen.
    pub fn page(&self) -> &RenderResult {
        &self.page
    }

    pub fn search_state(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// Status line for the current match, e.g. `Match 2/5: timeout`.
    pub fn match_status(&self) -> Option<String> {
        let search = self.search.as_ref()?;
        let (current, total) = search.position()?;
        Some(format!("Match {}/{}: {}", current, total, search.pattern()))
    }

    fn last_index(&self) -> usize {
        self.document.total_lines().saturating_sub(1)
    }

    fn render_at(&self, start: usize) -> Result<RenderResult> {
        let pattern = self.search.as_ref().map(SearchState::pattern);
        LayoutEngine::new(&self.document, self.options, self.match_style)
            .render_page(start, self.viewport, pattern)
    }

    fn show(&mut self, top: usize) -> Result<bool> {
        self.page = self.render_at(top)?;
        self.top = self.page.start;
        Ok(true)
    }

    /// Re-render the current top, e.g. after the highlight pattern changed.
    pub fn refresh(&mut self) -> Result<()> {
        self.show(self.top).map(|_| ())
    }

    /// Page forward. The last line shown becomes the new top; when a single
    /// line fills the whole screen the view advances by one line instead.
    ///
    /// Returns `false` when the end of the document is already visible.
    pub fn next_page(&mut self) -> Result<bool> {
        let last = self.page.last_line;
        if last >= self.last_index() {
            return Ok(false);
        }
        let next = if last == self.top { self.top + 1 } else { last };
        self.show(next.min(self.last_index()))
    }

    /// Page backward to a top whose page ends at the current top line.
    pub fn prev_page(&mut self) -> Result<bool> {
        if self.top == 0 {
            return Ok(false);
        }
        let start = self.reverse_page_start()?;
        self.show(start)
    }

    /// Binary search for the start of the previous page.
    ///
    /// Candidates are `[0, top)`. A candidate whose page ends before `top` is
    /// too far back and becomes the best so far; one whose page runs past
    /// `top` is too close. The search stops on an exact hit, when the window
    /// closes, when the midpoint repeats the best candidate, or after
    /// [`MAX_REVERSE_PROBES`] probes. Falls back to the document start.
    pub fn reverse_page_start(&self) -> Result<usize> {
        let target = self.top;
        let (mut left, mut right, mut best) = (0, target, 0);

        for _ in 0..MAX_REVERSE_PROBES {
            if left >= right {
                break;
            }
            let mid = (left + right) / 2;
            if mid == best {
                break;
            }
            match self.render_at(mid)?.last_line.cmp(&target) {
                Ordering::Less => {
                    left = mid + 1;
                    best = mid;
                }
                Ordering::Greater => right = mid,
                Ordering::Equal => {
                    best = mid;
                    break;
                }
            }
        }

        log::debug!("reverse page from {} lands on {}", target, best);
        Ok(best)
    }

    /// Scroll down one line unless the end of the document is visible.
    pub fn next_line(&mut self) -> Result<bool> {
        if self.page.last_line >= self.last_index() {
            return Ok(false);
        }
        self.show(self.top + 1)
    }

    /// Scroll up one line.
    pub fn prev_line(&mut self) -> Result<bool> {
        if self.top == 0 {
            return Ok(false);
        }
        self.show(self.top - 1)
    }

    pub fn goto_first(&mut self) -> Result<bool> {
        self.show(0)
    }

    /// Put the last line of the document at the top of the screen.
    pub fn goto_last(&mut self) -> Result<bool> {
        self.show(self.last_index())
    }

    /// Jump to a 1-based line number. Returns `false` when it is out of range.
    pub fn goto_line(&mut self, line_number: usize) -> Result<bool> {
        if line_number == 0 || line_number > self.document.total_lines() {
            return Ok(false);
        }
        self.show(line_number - 1)
    }

    /// Put a 0-based line at the top of the screen.
    pub fn jump_to(&mut self, line: usize) -> Result<bool> {
        self.show(line.min(self.last_index()))
    }

    /// Recompose the current top for a new terminal size.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = viewport;
        self.refresh()
    }

    /// Run a new search, replacing any previous one, and jump to its first match.
    ///
    /// An empty pattern clears the search and its highlights.
    pub fn search(&mut self, pattern: &str) -> Result<SearchOutcome> {
        if pattern.is_empty() {
            self.search = None;
            self.refresh()?;
            return Ok(SearchOutcome::Cleared);
        }

        let matches = SearchEngine::new(&self.document, self.options).find_all(pattern)?;
        let state = SearchState::new(pattern, matches);
        let first = state.current();
        let count = state.matches().len();
        self.search = Some(state);

        match first {
            Some(line) => {
                self.jump_to(line)?;
                Ok(SearchOutcome::Found { matches: count })
            }
            None => {
                self.refresh()?;
                Ok(SearchOutcome::NotFound)
            }
        }
    }

    /// Jump to the next match, wrapping around. No-op without matches.
    pub fn next_match(&mut self) -> Result<bool> {
        match self.search.as_mut().and_then(SearchState::next_match) {
            Some(line) => self.jump_to(line),
            None => Ok(false),
        }
    }

    /// Jump to the previous match, wrapping around. No-op without matches.
    pub fn prev_match(&mut self) -> Result<bool> {
        match self.search.as_mut().and_then(SearchState::previous_match) {
            Some(line) => self.jump_to(line),
            None => Ok(false),
        }
    }
}
