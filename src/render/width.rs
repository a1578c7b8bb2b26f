//! Terminal display width of line text that may contain ANSI escape sequences.
//!
//! Escape sequences (SGR colors from highlighting or from the log itself) take
//! no columns. Tabs advance to the next multiple of [`TAB_STOP`].

use std::borrow::Cow;
use unicode_width::UnicodeWidthChar;

pub const TAB_STOP: usize = 8;

/// SGR reset appended when truncation cuts through styled text.
pub const SGR_RESET: &str = "\x1b[0m";

/// A piece of line text: either one printable char or one whole escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Escape(&'a str),
    Text(char),
}

/// Iterator splitting text into [`Piece`]s.
#[derive(Debug, Clone)]
pub struct Pieces<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Pieces<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let ch = rest.chars().next()?;
        if ch == '\x1b' {
            let len = escape_len(rest);
            self.pos += len;
            return Some(Piece::Escape(&rest[..len]));
        }
        self.pos += ch.len_utf8();
        Some(Piece::Text(ch))
    }
}

/// Byte length of the escape sequence at the start of `rest` (which begins with ESC).
fn escape_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if bytes.get(1) == Some(&b'[') {
        // CSI: parameters then a final byte in 0x40..=0x7E
        return bytes
            .iter()
            .skip(2)
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |i| i + 3);
    }
    rest[1..].chars().next().map_or(1, |c| 1 + c.len_utf8())
}

/// Column position after printing `ch` starting at column `col`.
fn advance(col: usize, ch: char) -> usize {
    match ch {
        '\t' => (col / TAB_STOP + 1) * TAB_STOP,
        c if c.is_control() => col,
        c => col + c.width().unwrap_or(0),
    }
}

/// Number of terminal columns `text` occupies on a single unbounded row.
pub fn visible_width(text: &str) -> usize {
    Pieces::new(text).fold(0, |col, piece| match piece {
        Piece::Escape(_) => col,
        Piece::Text(ch) => advance(col, ch),
    })
}

/// Remove escape sequences, leaving only printable text.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        Pieces::new(text)
            .filter_map(|piece| match piece {
                Piece::Text(ch) => Some(ch),
                Piece::Escape(_) => None,
            })
            .collect(),
    )
}

/// Cut `text` so that it occupies at most `max_width` columns.
///
/// Escape sequences before the cut are kept; if any were seen and the text was
/// cut, an SGR reset is appended so styling does not bleed into the marker.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    let mut col = 0;
    let mut saw_escape = false;
    let mut pos = 0;

    for piece in Pieces::new(text) {
        match piece {
            Piece::Escape(seq) => {
                saw_escape = true;
                pos += seq.len();
            }
            Piece::Text(ch) => {
                let next = advance(col, ch);
                if next > max_width {
                    let mut cut = text[..pos].to_string();
                    if saw_escape {
                        cut.push_str(SGR_RESET);
                    }
                    return Cow::Owned(cut);
                }
                col = next;
                pos += ch.len_utf8();
            }
        }
    }

    Cow::Borrowed(text)
}
