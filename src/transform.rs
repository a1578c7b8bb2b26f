//! Per-line text transforms applied before display and search.
//!
//! Transforms run in a fixed order: trim, then unescape. Highlighting happens
//! afterwards in the render layer and never re-enters these functions.

use crate::config::DisplayOptions;
use std::borrow::Cow;

/// Trim leading and trailing (Unicode) whitespace.
pub fn trim(line: &str) -> &str {
    line.trim()
}

/// Replace backslash escape sequences in a log payload.
///
/// Recognized sequences are `\n`, `\t`, `\r`, `\\`, `\"` and `\'`. With
/// `keep_one_line` an escaped newline becomes a space and an escaped carriage
/// return is dropped, so the output never spans more than one physical line.
/// Unknown sequences are copied through unchanged.
pub fn unescape(line: &str, keep_one_line: bool) -> Cow<'_, str> {
    if !line.contains('\\') {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let replacement = match chars.peek() {
            Some('n') if keep_one_line => Some(" "),
            Some('n') => Some("\n"),
            Some('r') if keep_one_line => Some(""),
            Some('r') => Some("\r"),
            Some('t') => Some("\t"),
            Some('\\') => Some("\\"),
            Some('"') => Some("\""),
            Some('\'') => Some("'"),
            _ => None,
        };

        match replacement {
            Some(text) => {
                chars.next();
                out.push_str(text);
            }
            None => out.push('\\'),
        }
    }

    Cow::Owned(out)
}

/// Apply the configured transforms to one raw line.
pub fn apply<'a>(options: &DisplayOptions, line: &'a str) -> Cow<'a, str> {
    let line = if options.trim_space { trim(line) } else { line };
    if options.unescape {
        unescape(line, options.keep_one_line)
    } else {
        Cow::Borrowed(line)
    }
}
