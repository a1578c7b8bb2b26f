//! Byte-offset index of line starts.
//!
//! The index is built in one sequential pass over a reader, using memchr for
//! SIMD-optimized newline detection. Only offsets are stored, never content,
//! so memory use is proportional to the line count rather than the file size.

use memchr::memchr_iter;
use std::io::{BufRead, BufReader, Read};

/// Read buffer used while scanning for newlines.
const SCAN_BUFFER_SIZE: usize = 64 * 1024;

/// Ordered byte offsets at which each line starts.
///
/// - `offsets[0] = 0` (first line always starts at byte 0)
/// - `offsets[n]` = byte position just after the nth newline
///
/// A file ending with `\n` therefore has one trailing entry equal to the file
/// size, which does not correspond to a displayable line. A final line without
/// a newline is indexed by its start offset and adds no trailing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    offsets: Vec<u64>,
}

impl LineIndex {
    /// Scan `reader` once from its current position and record every line start.
    ///
    /// # Errors
    /// Propagates any read error from the underlying reader.
    pub fn build<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut reader = BufReader::with_capacity(SCAN_BUFFER_SIZE, reader);
        let mut offsets = vec![0];
        let mut pos: u64 = 0;

        loop {
            let chunk = reader.fill_buf()?;
            if chunk.is_empty() {
                break;
            }

            offsets.extend(memchr_iter(b'\n', chunk).map(|nl| pos + nl as u64 + 1));

            let consumed = chunk.len();
            pos += consumed as u64;
            reader.consume(consumed);
        }

        Ok(Self { offsets })
    }

    /// Index an in-memory buffer.
    #[cfg(test)]
    fn from_bytes(data: &[u8]) -> Self {
        let mut offsets = vec![0];
        offsets.extend(memchr_iter(b'\n', data).map(|nl| nl as u64 + 1));
        Self { offsets }
    }

    /// Number of recorded offsets (including a trailing end-of-file entry).
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// An index always holds at least the initial zero offset.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Start offset of `line` (0-based), if recorded.
    pub fn offset(&self, line: usize) -> Option<u64> {
        self.offsets.get(line).copied()
    }

    #[cfg(test)]
    fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Count of displayable lines for a file of `file_size` bytes.
    ///
    /// When the last offset equals the file size the file ended with a newline
    /// and that entry yields no extra line.
    pub fn line_count(&self, file_size: u64) -> usize {
        match self.offsets.last() {
            Some(&last) if last == file_size => self.offsets.len() - 1,
            _ => self.offsets.len(),
        }
    }
}
