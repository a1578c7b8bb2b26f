//! Case-insensitive search-match highlighting.
//!
//! Matching is done on a lowercased copy of the line, but every highlighted
//! span is cut from the original text so the user sees the file's own casing.
//! Text outside matches is copied through byte for byte.

use ratatui::crossterm::style::ContentStyle;
use std::borrow::Cow;
use std::fmt::Write;
use std::ops::Range;

/// Byte ranges of all non-overlapping, case-insensitive occurrences of `pattern`.
pub fn match_ranges(line: &str, pattern: &str) -> Vec<Range<usize>> {
    if pattern.is_empty() {
        return Vec::new();
    }
    let needle = pattern.to_lowercase();

    // Lowercasing may change byte lengths, so remember which original char
    // every lowered byte came from.
    let mut lowered = String::with_capacity(line.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(line.len());
    for (start, ch) in line.char_indices() {
        let end = start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            let before = lowered.len();
            lowered.push(lower);
            origin.extend(std::iter::repeat((start, end)).take(lowered.len() - before));
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut from = 0;
    while let Some(found) = lowered[from..].find(&needle) {
        let hit = from + found;
        let hit_end = hit + needle.len();
        from = hit_end;

        let last_end = ranges.last().map_or(0, |r| r.end);
        let start = origin[hit].0.max(last_end);
        let end = origin[hit_end - 1].1;
        if start < end {
            ranges.push(start..end);
        }
    }
    ranges
}

/// Wrap every occurrence of `pattern` in `line` with `style`.
pub fn highlight<'a>(line: &'a str, pattern: &str, style: &ContentStyle) -> Cow<'a, str> {
    let ranges = match_ranges(line, pattern);
    if ranges.is_empty() {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + ranges.len() * 16);
    let mut last = 0;
    for range in ranges {
        out.push_str(&line[last..range.start]);
        // Writing into a String cannot fail.
        let _ = write!(out, "{}", style.apply(&line[range.clone()]));
        last = range.end;
    }
    out.push_str(&line[last..]);
    Cow::Owned(out)
}
