//! The `.golh` plain-text frame format.
//!
//! ```text
//! # a glider
//! rows 3
//! cols 3
//! r .O.
//! r ..O
//! r OOO
//! ```
//!
//! A stream of frames shares one header and separates frames with
//! `frame <n>` marker lines. A document without markers holds a single frame.

use crate::cell::Cell;
use crate::error::{ParseError, PersistError};
use crate::frame::Frame;
use log::debug;
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(rows|cols)\s+(\d+)$").expect("valid header regex"))
}

fn row_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^r(?:\s+(\S*))?$").expect("valid row regex"))
}

fn marker_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^frame\s+\d+$").expect("valid marker regex"))
}

/// Parses a document that must hold exactly one frame.
pub fn parse_frame(contents: &str) -> Result<Frame, ParseError> {
    let mut frames = parse_frames(contents)?;

    if frames.len() != 1 {
        return Err(ParseError::FrameCount {
            found: frames.len(),
        });
    }

    Ok(frames.remove(0))
}

/// Parses a document holding one or more frames.
pub fn parse_frames(contents: &str) -> Result<Vec<Frame>, ParseError> {
    let mut parser = Parser::default();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();

        // Blank lines and comments carry no data
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(captures) = header_regex().captures(line) {
            if parser.started() {
                return Err(invalid_line(index, line));
            }
            let value = captures[2]
                .parse()
                .map_err(|_| invalid_line(index, line))?;
            let header = match &captures[1] {
                "rows" => &mut parser.rows,
                _ => &mut parser.cols,
            };
            // Each header may be given only once
            if header.replace(value).is_some() {
                return Err(invalid_line(index, line));
            }
        } else if marker_regex().is_match(line) {
            parser.start_frame()?;
        } else if let Some(captures) = row_regex().captures(line) {
            let cells = captures.get(1).map_or("", |m| m.as_str());
            parser.push_row(cells)?;
        } else {
            return Err(invalid_line(index, line));
        }
    }

    parser.finish()
}

/// Builds one frame out of row strings such as `".O."`.
pub(crate) fn frame_from_rows<S: AsRef<str>>(
    rows: usize,
    cols: usize,
    lines: &[S],
) -> Result<Frame, ParseError> {
    let mut parser = Parser {
        rows: Some(rows),
        cols: Some(cols),
        ..Parser::default()
    };

    for line in lines {
        parser.push_row(line.as_ref())?;
    }

    parser.close_frame()?;
    Ok(parser.frames.remove(0))
}

/// The inverse of [`frame_from_rows`].
pub(crate) fn frame_to_rows(frame: &Frame) -> Vec<String> {
    frame
        .iter_rows()
        .map(|row| row.iter().map(Cell::char).collect())
        .collect()
}

fn invalid_line(index: usize, line: &str) -> ParseError {
    ParseError::InvalidLine {
        line: index + 1,
        contents: line.to_string(),
    }
}

#[derive(Default)]
struct Parser {
    rows: Option<usize>,
    cols: Option<usize>,
    frames: Vec<Frame>,
    cells: Vec<Cell>,
    current_rows: usize,
    // Whether the open frame was introduced by a `frame` marker
    explicit: bool,
}

impl Parser {
    fn started(&self) -> bool {
        self.explicit || self.current_rows > 0 || !self.frames.is_empty()
    }

    fn dimensions(&self) -> Result<(usize, usize), ParseError> {
        let rows = self.rows.ok_or(ParseError::MissingHeader("rows"))?;
        let cols = self.cols.ok_or(ParseError::MissingHeader("cols"))?;
        Ok((rows, cols))
    }

    fn start_frame(&mut self) -> Result<(), ParseError> {
        self.dimensions()?;

        // Rows before the first marker form a frame of their own
        if self.explicit || self.current_rows > 0 {
            self.close_frame()?;
        }

        self.explicit = true;
        Ok(())
    }

    fn push_row(&mut self, line: &str) -> Result<(), ParseError> {
        let (rows, cols) = self.dimensions()?;
        let row = self.current_rows;

        if row >= rows {
            return Err(ParseError::RowCount {
                expected: rows,
                found: row + 1,
            });
        }

        let found = line.chars().count();
        if found != cols {
            return Err(ParseError::RowLength {
                row,
                expected: cols,
                found,
            });
        }

        for (col, value) in line.chars().enumerate() {
            let cell = Cell::from_char(value).ok_or(ParseError::InvalidCell { row, col, value })?;
            self.cells.push(cell);
        }

        self.current_rows += 1;
        Ok(())
    }

    fn close_frame(&mut self) -> Result<(), ParseError> {
        let (rows, cols) = self.dimensions()?;

        if self.current_rows != rows {
            return Err(ParseError::RowCount {
                expected: rows,
                found: self.current_rows,
            });
        }

        let cells = std::mem::take(&mut self.cells);
        self.frames.push(Frame::from_cells(rows, cols, cells));
        self.current_rows = 0;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Frame>, ParseError> {
        self.dimensions()?;

        if self.explicit || self.current_rows > 0 || self.frames.is_empty() {
            self.close_frame()?;
        }

        Ok(self.frames)
    }
}

/// Writes a stream of equally sized frames in the `.golh` format.
pub struct FrameWriter<W: Write> {
    inner: W,
    rows: usize,
    cols: usize,
    frames_written: usize,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W, rows: usize, cols: usize) -> FrameWriter<W> {
        FrameWriter {
            inner,
            rows,
            cols: if rows == 0 { 0 } else { cols },
            frames_written: 0,
        }
    }

    /// Writes one frame and returns the number of bytes written.
    ///
    /// The header is written together with the first frame.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<usize, PersistError> {
        if (frame.rows(), frame.cols()) != (self.rows, self.cols) {
            return Err(PersistError::DimensionMismatch {
                expected: (self.rows, self.cols),
                found: (frame.rows(), frame.cols()),
            });
        }

        let mut buffer = String::new();
        if self.frames_written == 0 {
            buffer.push_str(&format!("rows {}\ncols {}\n", self.rows, self.cols));
        }
        buffer.push_str(&format!("frame {}\n", self.frames_written));
        for row in frame.iter_rows() {
            buffer.push_str("r ");
            buffer.extend(row.iter().map(Cell::char));
            buffer.push('\n');
        }

        self.inner.write_all(buffer.as_bytes())?;
        self.frames_written += 1;
        debug!(
            "Wrote frame {} ({} bytes)",
            self.frames_written - 1,
            buffer.len()
        );

        Ok(buffer.len())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn flush(&mut self) -> Result<(), PersistError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
