//! Line-indexed access to log files.
//!
//! Opening a file scans it once to record where every line starts. After that
//! any line can be read by seeking straight to its offset, so the pager never
//! holds the whole file in memory.

pub mod document;
pub mod line_index;
pub mod validation;

pub use document::Document;
pub use line_index::LineIndex;
pub use validation::validate_file_path;
