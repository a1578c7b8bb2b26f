//! An indexed, read-only view of the paged file.
//!
//! Every read reopens the file and seeks to the indexed offset, so renders are
//! independent of each other. Decoded lines are kept in a small LRU cache
//! because reverse paging renders the same region several times in a row.

use crate::error::{LogLensError, Result};
use crate::file_handler::line_index::LineIndex;
use crate::file_handler::validation::validate_file_path;
use bstr::ByteSlice;
use lru::LruCache;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Maximum number of decoded lines kept in memory.
const LINE_CACHE_CAPACITY: usize = 256;

/// File path, its line index and the derived line count.
///
/// The viewed file is assumed not to change while it is open.
pub struct Document {
    path: PathBuf,
    index: LineIndex,
    total_lines: usize,
    cache: Mutex<LruCache<usize, String>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("total_lines", &self.total_lines)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Validate `path` and build its line index in one sequential pass.
    ///
    /// # Errors
    /// Fails when the path is missing, not a regular file, or unreadable.
    pub fn open(path: &Path) -> Result<Self> {
        validate_file_path(path)?;

        let file = File::open(path)
            .map_err(|e| LogLensError::file_error(format!("Cannot open {}", path.display()), e))?;
        let file_size = file.metadata()?.len();
        let index = LineIndex::build(file).map_err(|e| {
            LogLensError::file_error(format!("Cannot index {}", path.display()), e)
        })?;
        let total_lines = index.line_count(file_size);

        log::debug!(
            "indexed {} lines ({} bytes) in {}",
            total_lines,
            file_size,
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            index,
            total_lines,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(LINE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
        })
    }

    /// Build the document on the blocking pool so large files do not stall the runtime.
    pub async fn open_async(path: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::open(&path))
            .await
            .map_err(|e| LogLensError::other(format!("indexing task failed: {}", e)))?
    }

    #[cfg(test)]
    fn index(&self) -> &LineIndex {
        &self.index
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn is_empty(&self) -> bool {
        self.total_lines == 0
    }

    /// Read up to `max` raw lines starting at `start` (0-based).
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped and invalid UTF-8 is
    /// replaced. Fewer lines are returned near the end of the document.
    pub fn read_lines(&self, start: usize, max: usize) -> Result<Vec<String>> {
        let end = start.saturating_add(max).min(self.total_lines);
        if start >= end {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.cached_range(start, end) {
            return Ok(cached);
        }

        let offset = self
            .index
            .offset(start)
            .ok_or_else(|| LogLensError::other(format!("line {} is not indexed", start)))?;

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::with_capacity(end - start);
        let mut buf = Vec::new();
        let mut cache = self.cache.lock();
        for line_number in start..end {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = decode_line(&buf);
            cache.put(line_number, line.clone());
            lines.push(line);
        }

        Ok(lines)
    }

    /// Read a single raw line, or `None` past the end of the document.
    pub fn read_line(&self, line: usize) -> Result<Option<String>> {
        Ok(self.read_lines(line, 1)?.pop())
    }

    /// Stream every line from the start of the file in order.
    ///
    /// Used by full scans (search) that must not evict the page cache.
    pub fn for_each_line<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(usize, &str),
    {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut buf = Vec::new();
        for line_number in 0..self.total_lines {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            visit(line_number, &decode_line(&buf));
        }
        Ok(())
    }

    fn cached_range(&self, start: usize, end: usize) -> Option<Vec<String>> {
        let mut cache = self.cache.lock();
        (start..end)
            .map(|line| cache.get(&line).cloned())
            .collect()
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line.to_str_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn document_with(content: &[u8]) -> (NamedTempFile, Document) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        let doc = Document::open(file.path()).unwrap();
        (file, doc)
    }

    #[test]
    fn counts_lines_with_and_without_trailing_newline() {
        let (_f, doc) = document_with(b"one\ntwo\nthree\n");
        assert_eq!(doc.total_lines(), 3);
        assert_eq!(doc.index().len(), 4);

        let (_f, doc) = document_with(b"one\ntwo\nthree");
        assert_eq!(doc.total_lines(), 3);
        assert_eq!(doc.index().len(), 3);
    }

    #[test]
    fn empty_file_has_no_lines() {
        let (_f, doc) = document_with(b"");
        assert!(doc.is_empty());
        assert!(doc.read_lines(0, 10).unwrap().is_empty());
    }

    #[test]
    fn reads_from_arbitrary_offsets() {
        let (_f, doc) = document_with(b"zero\r\none\ntwo\nthree\n");
        assert_eq!(doc.read_lines(1, 2).unwrap(), vec!["one", "two"]);
        assert_eq!(doc.read_lines(2, 10).unwrap(), vec!["two", "three"]);
        assert_eq!(doc.read_line(0).unwrap().as_deref(), Some("zero"));
        assert_eq!(doc.read_line(4).unwrap(), None);
    }

    #[test]
    fn cached_reads_match_disk_reads() {
        let (_f, doc) = document_with(b"a\nb\nc\nd\n");
        let first = doc.read_lines(0, 4).unwrap();
        let second = doc.read_lines(1, 2).unwrap();
        assert_eq!(second, first[1..3].to_vec());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let (_f, doc) = document_with(b"ok\n\xff\xfebad\n");
        let line = doc.read_line(1).unwrap().unwrap();
        assert!(line.ends_with("bad"));
        assert!(line.contains('\u{FFFD}'));
    }

    #[test]
    fn for_each_line_visits_everything_in_order() {
        let (_f, doc) = document_with(b"x\ny\nz");
        let mut seen = Vec::new();
        doc.for_each_line(|n, line| seen.push((n, line.to_string())))
            .unwrap();
        assert_eq!(
            seen,
            vec![
                (0, "x".to_string()),
                (1, "y".to_string()),
                (2, "z".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn open_async_indexes_on_blocking_pool() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1\n2\n").unwrap();
        let doc = Document::open_async(file.path().to_path_buf()).await.unwrap();
        assert_eq!(doc.total_lines(), 2);
    }

    #[test]
    fn open_rejects_missing_file() {
        assert!(matches!(
            Document::open(Path::new("/no/such/file.log")),
            Err(LogLensError::FileNotFound { .. })
        ));
    }
}
