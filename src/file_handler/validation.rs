//! File validation utilities for ensuring a path can be paged.
//!
//! These checks run before the line index is built so that the user gets a
//! precise message instead of a generic read failure.

use crate::error::{LogLensError, Result};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for processing
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory)
/// - File is readable by the current process
///
/// Empty files pass validation; the viewer reports them itself.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(LogLensError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| LogLensError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(LogLensError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Try to open the file to verify read permissions
    File::open(path).map_err(|e| {
        LogLensError::file_error(format!("Cannot open file {}", path.display()), e)
    })?;

    Ok(())
}
