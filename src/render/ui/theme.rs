//! Color theme and styling definitions.
//!
//! Styles are crossterm `ContentStyle`s so they can be applied inline to line
//! text as SGR sequences (highlights must travel inside the text because the
//! layout engine measures and truncates it).

use crate::config::ThemeName;
use ratatui::crossterm::style::{Attribute, Attributes, Color, ContentStyle};

/// Color theme for terminal UI elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTheme {
    /// Line-number gutter
    pub line_numbers: ContentStyle,

    /// Search match highlighting
    pub search_match: ContentStyle,

    /// Status and prompt-row messages
    pub status: ContentStyle,

    /// Title of the JSON screen
    pub title: ContentStyle,

    /// Error/warning text
    pub error_text: ContentStyle,
}

fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

fn attr(attribute: Attribute) -> ContentStyle {
    ContentStyle {
        attributes: Attributes::from(attribute),
        ..ContentStyle::default()
    }
}

impl Default for ColorTheme {
    /// Cyan gutter, black-on-yellow matches, grey status text
    fn default() -> Self {
        Self {
            line_numbers: fg(Color::DarkCyan),
            search_match: ContentStyle {
                foreground_color: Some(Color::Black),
                background_color: Some(Color::DarkYellow),
                ..ContentStyle::default()
            },
            status: fg(Color::DarkGrey),
            title: fg(Color::DarkGreen),
            error_text: fg(Color::DarkRed),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            line_numbers: ContentStyle::default(),
            search_match: attr(Attribute::Reverse),
            status: attr(Attribute::Dim),
            title: attr(Attribute::Bold),
            error_text: attr(Attribute::Bold),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
        }
    }
}
