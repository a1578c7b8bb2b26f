//! Non-interactive mode: transform lines and copy them to an output stream.
//!
//! Used when input is piped in or output is not a terminal. No paging,
//! highlighting or terminal control is involved.

use crate::config::DisplayOptions;
use crate::error::{LogLensError, Result};
use crate::render::ui::ColorTheme;
use crate::transform;
use bstr::ByteSlice;
use std::io::{self, BufRead, Write};

/// Copy every line of `reader` to `out`, applying the display transforms.
///
/// With line numbers enabled each line is prefixed by its 1-based number,
/// right-aligned to six columns and styled by the theme's gutter style. A
/// closed downstream pipe ends the copy quietly.
pub fn process_stream<R: BufRead, W: Write>(
    mut reader: R,
    mut out: W,
    options: &DisplayOptions,
    theme: &ColorTheme,
) -> Result<()> {
    match copy_lines(&mut reader, &mut out, options, theme) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("output closed early");
            Ok(())
        }
        Err(err) => Err(LogLensError::file_error("stream copy failed", err)),
        Ok(count) => {
            log::debug!("streamed {} lines", count);
            Ok(())
        }
    }
}

fn copy_lines<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    options: &DisplayOptions,
    theme: &ColorTheme,
) -> io::Result<usize> {
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let raw = raw.to_str_lossy();
        let text = transform::apply(options, &raw);

        if options.show_line_number {
            let number = format!("{:>6}", line_number);
            write!(out, "{}  ", theme.line_numbers.apply(number))?;
        }
        writeln!(out, "{}", text)?;
    }
    out.flush()?;
    Ok(line_number)
}
