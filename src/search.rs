//! Case-insensitive substring search over the whole document.
//!
//! A search is a full linear scan that applies the same trim/unescape
//! transforms used for display, so a line matches exactly when its displayed
//! text contains the pattern. Results are kept in a [`SearchState`] that is
//! replaced wholesale by every new search.

use crate::config::DisplayOptions;
use crate::error::Result;
use crate::file_handler::Document;
use crate::transform;

/// Scans a document for lines containing a pattern.
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    document: &'a Document,
    options: DisplayOptions,
}

impl<'a> SearchEngine<'a> {
    pub fn new(document: &'a Document, options: DisplayOptions) -> Self {
        Self { document, options }
    }

    /// Ordered 0-based numbers of every line containing `pattern`, ignoring case.
    ///
    /// An empty pattern matches nothing.
    pub fn find_all(&self, pattern: &str) -> Result<Vec<usize>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }

        let needle = pattern.to_lowercase();
        let mut matches = Vec::new();
        self.document.for_each_line(|line_number, raw| {
            let text = transform::apply(&self.options, raw);
            if text.to_lowercase().contains(&needle) {
                matches.push(line_number);
            }
        })?;

        log::debug!("search {:?}: {} matching lines", pattern, matches.len());
        Ok(matches)
    }
}

/// Pattern, its matching lines, and the cursor into those matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pattern: String,
    matches: Vec<usize>,
    cursor: Option<usize>,
}

impl SearchState {
    /// Start a search positioned on the first match, if any.
    pub fn new(pattern: impl Into<String>, matches: Vec<usize>) -> Self {
        let cursor = if matches.is_empty() { None } else { Some(0) };
        Self {
            pattern: pattern.into(),
            matches,
            cursor,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Line of the current match.
    pub fn current(&self) -> Option<usize> {
        self.cursor.map(|c| self.matches[c])
    }

    /// 1-based position of the current match and the match count.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.cursor.map(|c| (c + 1, self.matches.len()))
    }

    /// Advance to the next match, wrapping from the last to the first.
    pub fn next_match(&mut self) -> Option<usize> {
        let cursor = self.cursor?;
        self.cursor = Some((cursor + 1) % self.matches.len());
        self.current()
    }

    /// Step back to the previous match, wrapping from the first to the last.
    pub fn previous_match(&mut self) -> Option<usize> {
        let cursor = self.cursor?;
        self.cursor = Some(cursor.checked_sub(1).unwrap_or(self.matches.len() - 1));
        self.current()
    }
}
