//! Tab-aligned column output.
//!
//! [`TabWriter`] buffers tab-separated text and aligns the columns when
//! flushed. A cell is the text up to a `\t`; text after the last tab on a line
//! is written as-is and does not affect column widths. Widths are measured in
//! terminal columns with ANSI escape codes ignored, so styled cells line up
//! with plain ones.
//!
//! ```rust
//! use std::io::Write;
//! use termtext::TabWriter;
//!
//! let mut out = Vec::new();
//! let mut tw = TabWriter::new(&mut out, 4, 4, 3, ' ');
//! writeln!(tw, "Header\tValue").unwrap();
//! writeln!(tw, "Content-Type\t[application/json]").unwrap();
//! tw.flush().unwrap();
//! drop(tw);
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Header         Value\nContent-Type   [application/json]\n"
//! );
//! ```

use std::io::{self, Write};

use console::measure_text_width;

/// Aligns tab-terminated cells into columns.
pub struct TabWriter<W: Write> {
    inner: W,
    min_width: usize,
    tab_width: usize,
    padding: usize,
    pad_char: char,
    buf: Vec<u8>,
}

impl<W: Write> TabWriter<W> {
    /// Creates a writer.
    ///
    /// - `min_width`: minimal cell width including padding
    /// - `tab_width`: width of a tab stop, used when `pad_char` is `'\t'`
    /// - `padding`: added to the widest cell of a column
    /// - `pad_char`: character used to fill cells
    pub fn new(inner: W, min_width: usize, tab_width: usize, padding: usize, pad_char: char) -> Self {
        Self {
            inner,
            min_width,
            tab_width,
            padding,
            pad_char,
            buf: Vec::new(),
        }
    }

    /// Writes one row of cells, separated by tabs and terminated by a newline.
    pub fn row<I, S>(&mut self, cells: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for cell in cells {
            if !first {
                self.buf.push(b'\t');
            }
            first = false;
            self.buf.extend_from_slice(cell.as_ref().as_bytes());
        }
        self.buf.push(b'\n');
        Ok(())
    }

    /// Consumes the writer, returning the inner sink. Unflushed text is lost.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn format(&self) -> String {
        let text = String::from_utf8_lossy(&self.buf);
        let mut lines: Vec<&str> = text.split('\n').collect();
        // A trailing newline leaves an empty final piece; keep a partial line otherwise.
        let trailing = lines.pop().unwrap_or_default();

        let rows: Vec<Vec<&str>> = lines.iter().map(|line| line.split('\t').collect()).collect();

        // Only tab-terminated cells count toward column widths.
        let columns = rows.iter().map(|r| r.len().saturating_sub(1)).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &rows {
            for (i, cell) in row.iter().take(row.len().saturating_sub(1)).enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        let widths: Vec<usize> = widths.into_iter().map(|w| self.column_width(w)).collect();

        let mut out = String::new();
        for row in &rows {
            let last = row.len().saturating_sub(1);
            for (i, cell) in row.iter().enumerate() {
                out.push_str(cell);
                if i < last {
                    self.pad(&mut out, widths[i], measure_text_width(cell));
                }
            }
            out.push('\n');
        }
        out.push_str(trailing);
        out
    }

    fn column_width(&self, widest: usize) -> usize {
        let width = self.min_width.max(widest + self.padding);
        if self.pad_char == '\t' && self.tab_width > 0 {
            width.div_ceil(self.tab_width) * self.tab_width
        } else {
            width
        }
    }

    fn pad(&self, out: &mut String, width: usize, used: usize) {
        let gap = width.saturating_sub(used);
        if self.pad_char == '\t' && self.tab_width > 0 {
            for _ in 0..gap.div_ceil(self.tab_width) {
                out.push('\t');
            }
        } else {
            for _ in 0..gap {
                out.push(self.pad_char);
            }
        }
    }
}

impl<W: Write> Write for TabWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// Aligns everything buffered so far and writes it to the inner sink.
    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return self.inner.flush();
        }
        let formatted = self.format();
        self.buf.clear();
        self.inner.write_all(formatted.as_bytes())?;
        self.inner.flush()
    }
}
