//! Display options and optional on-disk defaults.
//!
//! `DisplayOptions` is resolved once at startup and passed by value into every
//! component that transforms or measures line text. Nothing reads options from
//! ambient state.
//!
//! With the `config` feature enabled, defaults may also come from
//! `<config_dir>/loglens/config.toml`:
//!
//! ```toml
//! line_number = true
//! trim = false
//! unescape = true
//! keep_one_line = false
//! theme = "monochrome"
//! ```

use crate::error::Result;

/// Per-line display transforms and gutter selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Trim leading and trailing whitespace from every line.
    pub trim_space: bool,
    /// Replace `\n`, `\t`, `\r`, `\\`, `\"` and `\'` escape sequences.
    pub unescape: bool,
    /// When unescaping, turn `\n` into a space instead of a real newline.
    pub keep_one_line: bool,
    /// Prefix every line with a fixed-width line-number gutter.
    pub show_line_number: bool,
}

impl DisplayOptions {
    /// Options for the interactive pager.
    ///
    /// The line index is built over physical newline-delimited lines, so a real
    /// newline produced by unescaping would desynchronize index position `i`
    /// from displayed row `i`. Unescape therefore always keeps one line here.
    pub fn for_interactive(self) -> Self {
        Self {
            keep_one_line: self.keep_one_line || self.unescape,
            ..self
        }
    }
}

/// Named color schemes selectable from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
}

/// User defaults layered under the command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct Config {
    pub line_number: bool,
    pub trim: bool,
    pub unescape: bool,
    pub keep_one_line: bool,
    pub theme: ThemeName,
}

impl Config {
    /// Load the user's config file, falling back to defaults when absent.
    #[cfg(feature = "config")]
    pub fn load() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => Self::load_from(&dir.join("loglens").join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Without the `config` feature there is nothing to read.
    #[cfg(not(feature = "config"))]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }

    /// Load a specific config file. A missing file is not an error.
    #[cfg(feature = "config")]
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        use crate::error::LogLensError;

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(LogLensError::file_error(
                    format!("Cannot read config file {}", path.display()),
                    err,
                ))
            }
        };

        toml::from_str(&text)
            .map_err(|e| LogLensError::config(format!("{}: {}", path.display(), e)))
    }

    /// Merge with command-line flags. Flags can only switch options on.
    pub fn resolve(&self, flags: DisplayOptions) -> DisplayOptions {
        DisplayOptions {
            trim_space: flags.trim_space || self.trim,
            unescape: flags.unescape || self.unescape,
            keep_one_line: flags.keep_one_line || self.keep_one_line,
            show_line_number: flags.show_line_number || self.line_number,
        }
    }
}
