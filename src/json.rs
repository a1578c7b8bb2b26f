//! JSON detection and pretty-printing for a single log line.

use crate::error::Result;
use serde_json::Value;

/// Whether the line parses as a complete JSON value.
pub fn is_well_formed(line: &str) -> bool {
    serde_json::from_str::<Value>(line).is_ok()
}

/// Format a JSON line as indented multi-line text (two spaces, sorted keys).
pub fn pretty_print(line: &str) -> Result<String> {
    let value: Value = serde_json::from_str(line)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
