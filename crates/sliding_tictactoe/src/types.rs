//! Core domain types for sliding-window tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board, addressed 0-8 in row-major order.
pub const CELL_COUNT: usize = 9;

/// Number of placed pieces that stay on the board.
///
/// Placing a piece while this many are down removes the oldest one first.
pub const MAX_MOVES: usize = 6;

/// A player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (moves first).
    #[display("X")]
    X,
    /// Player O.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Glyph used when rendering the mark for people.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => '×',
            Mark::O => '○',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Holds a piece of the given mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Option<Mark>> for Cell {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Cell::Empty, Cell::Occupied)
    }
}

/// 3x3 board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from its nine cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks that `index` is on the board and empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of cells holding a piece.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Indices of empty cells, lowest first.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks_exact(3).enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Empty => write!(f, "{}", row * 3 + col + 1)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark.symbol())?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
