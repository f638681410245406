use crate::cell::Cell;
use crate::error::{FrameError, ParseError};
use crate::format;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::fmt;
use std::io::{self, stdout, Write};

/// A 2D grid of cells representing one generation of the Game of Life.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Frame {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Frame {
    /// Parses a `.golh` document holding a single frame.
    pub fn parse(contents: &str) -> Result<Frame, ParseError> {
        format::parse_frame(contents)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, FrameError> {
        let index = self.index(row, col)?;
        Ok(&self.cells[index])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, FrameError> {
        let index = self.index(row, col)?;
        Ok(&mut self.cells[index])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).ok().map(|index| &self.cells[index])
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), FrameError> {
        self.cell_mut(row, col)?.set(alive);
        Ok(())
    }

    pub fn is_alive(&self, row: usize, col: usize) -> Result<bool, FrameError> {
        self.cell(row, col).map(Cell::is_alive)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(index, _)| (index / self.cols, index % self.cols))
            .collect()
    }

    /// Counts the live cells among the 8 neighbours of the given coordinate.
    ///
    /// Edges do not wrap around: anything outside the frame counts as dead.
    /// A coordinate outside the frame has no live neighbours.
    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        if row >= self.rows || col >= self.cols {
            return 0;
        }

        let mut count = 0;

        for i in -1..=1 {
            for j in -1..=1 {
                if i == 0 && j == 0 {
                    continue;
                }

                // Skip coordinates that fall off the top or left edge
                let (Some(n_row), Some(n_col)) =
                    (row.checked_add_signed(i), col.checked_add_signed(j))
                else {
                    continue;
                };

                if self.get(n_row, n_col).is_some_and(Cell::is_alive) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Iterates over the rows of the frame as slices of cells.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.rows).map(move |row| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Draws the frame to the console.
    pub fn draw(&self, generation: usize) -> io::Result<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Generation: "),
            Print(generation.to_string()),
            Print("\nPopulation: "),
            Print(self.population().to_string()),
            Print("\n\n")
        )?;

        for row in self.iter_rows() {
            for cell in row {
                execute!(
                    stdout,
                    SetForegroundColor(cell.color()),
                    Print(cell.char()),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }

        stdout.flush()
    }

    /// Creates a frame with every cell set to `alive`.
    ///
    /// A frame without rows has no columns either.
    pub(crate) fn filled(rows: usize, cols: usize, alive: bool) -> Frame {
        let cols = if rows == 0 { 0 } else { cols };

        Frame {
            rows,
            cols,
            cells: vec![Cell::new(alive); rows * cols],
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Frame {
        debug_assert_eq!(cells.len(), rows * cols);
        let cols = if rows == 0 { 0 } else { cols };

        Frame { rows, cols, cells }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, FrameError> {
        if row >= self.rows {
            return Err(FrameError::RowOutOfBounds {
                row,
                rows: self.rows,
            });
        }

        if col >= self.cols {
            return Err(FrameError::ColOutOfBounds {
                col,
                cols: self.cols,
            });
        }

        Ok(row * self.cols + col)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows {}", self.rows)?;
        writeln!(f, "cols {}", self.cols)?;
        for row in self.iter_rows() {
            let line: String = row.iter().map(Cell::char).collect();
            writeln!(f, "r {}", line)?;
        }
        Ok(())
    }
}
