//! Error types for frames, the `.golh` format, frame builders and persistence.
//!
//! Each concern gets its own small error type. Lower-level errors convert into
//! the higher-level ones through `From` so callers can bubble them up with `?`:
//! a [`ParseError`] found while loading a file becomes a [`BuildError::Parse`]
//! or a [`PersistError::Parse`] depending on who asked.

use std::fmt;
use std::io;

/// Returned when a cell is addressed outside the bounds of a frame.
///
/// Rows are checked before columns, so a coordinate that is out of bounds on
/// both axes reports the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// `row` is not smaller than the frame's `rows`.
    RowOutOfBounds { row: usize, rows: usize },
    /// `col` is not smaller than the frame's `cols`.
    ColOutOfBounds { col: usize, cols: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::RowOutOfBounds { row, rows } => write!(
                f,
                "row {} is invalid for a frame with only {} rows",
                row, rows
            ),
            FrameError::ColOutOfBounds { col, cols } => write!(
                f,
                "column {} is invalid for a frame with only {} columns",
                col, cols
            ),
        }
    }
}

impl std::error::Error for FrameError {}

/// Returned when a `.golh` document is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required header (`rows` or `cols`) is missing.
    MissingHeader(&'static str),
    /// A line that is neither a header, a row, a frame marker nor a comment.
    InvalidLine { line: usize, contents: String },
    /// A frame holds a different number of rows than the header declares.
    RowCount { expected: usize, found: usize },
    /// A row holds a different number of cells than the header declares.
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cell character other than `O` or `.`.
    InvalidCell { row: usize, col: usize, value: char },
    /// A single frame was expected but the document holds another amount.
    FrameCount { found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingHeader(name) => write!(f, "missing `{}` header", name),
            ParseError::InvalidLine { line, contents } => {
                write!(f, "invalid line {}: {:?}", line, contents)
            }
            ParseError::RowCount { expected, found } => {
                write!(f, "expected {} rows per frame, found {}", expected, found)
            }
            ParseError::RowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} should have {} cells, found {}",
                row, expected, found
            ),
            ParseError::InvalidCell { row, col, value } => {
                write!(f, "invalid cell {:?} at ({}, {})", value, row, col)
            }
            ParseError::FrameCount { found } => {
                write!(f, "expected exactly one frame, found {}", found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Returned by [`build_frame`](crate::build_frame).
#[derive(Debug)]
pub enum BuildError {
    /// The alive probability of a random frame is not a finite value in `[0, 1]`.
    InvalidProbability(f64),
    /// `rows * cols` does not fit in a `usize`.
    TooLarge { rows: usize, cols: usize },
    /// The frame file could not be read.
    Io(io::Error),
    /// The frame file is not a valid `.golh` document.
    Parse(ParseError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidProbability(p) => write!(
                f,
                "alive probability must be between 0 and 1, got {}",
                p
            ),
            BuildError::TooLarge { rows, cols } => {
                write!(f, "a {}x{} frame is too large", rows, cols)
            }
            BuildError::Io(e) => write!(f, "could not read frame file: {}", e),
            BuildError::Parse(e) => write!(f, "could not parse frame file: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidProbability(_) | BuildError::TooLarge { .. } => None,
            BuildError::Io(e) => Some(e),
            BuildError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for BuildError {
    fn from(e: io::Error) -> Self {
        BuildError::Io(e)
    }
}

impl From<ParseError> for BuildError {
    fn from(e: ParseError) -> Self {
        BuildError::Parse(e)
    }
}

/// Returned by the frame writer, persisters and simulation constructors.
#[derive(Debug)]
pub enum PersistError {
    /// A frame was appended or modified before a file was opened or created.
    NotOpen,
    /// A frame's dimensions differ from the frames already stored.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// `modify` addressed a frame that does not exist.
    FrameIndex { index: usize, len: usize },
    /// A simulation needs at least one frame.
    EmptySimulation,
    Io(io::Error),
    Json(serde_json::Error),
    Parse(ParseError),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::NotOpen => f.write_str("no simulation file is open"),
            PersistError::DimensionMismatch { expected, found } => write!(
                f,
                "frame is {}x{} but the simulation is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            PersistError::FrameIndex { index, len } => write!(
                f,
                "frame {} does not exist, the simulation has {} frames",
                index, len
            ),
            PersistError::EmptySimulation => f.write_str("simulation has no frames"),
            PersistError::Io(e) => write!(f, "i/o error: {}", e),
            PersistError::Json(e) => write!(f, "invalid simulation file: {}", e),
            PersistError::Parse(e) => write!(f, "invalid frame in simulation file: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
            PersistError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

impl From<ParseError> for PersistError {
    fn from(e: ParseError) -> Self {
        PersistError::Parse(e)
    }
}
