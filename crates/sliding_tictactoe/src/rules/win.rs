//! Win detection.

use crate::types::{Board, Cell, Mark};

/// Every line of three, checked in this order: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line and its mark.
pub fn winning_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|&[a, b, c]| {
        let cell = board.get(a)?;
        match cell {
            Cell::Occupied(mark) if board.get(b) == Some(cell) && board.get(c) == Some(cell) => {
                Some((mark, [a, b, c]))
            }
            _ => None,
        }
    })
}

/// Checks whether `mark` holds any full line.
pub fn holds_line(board: &Board, mark: Mark) -> bool {
    let cell = Cell::Occupied(mark);
    LINES
        .iter()
        .any(|line| line.iter().all(|&index| board.get(index) == Some(cell)))
}

/// Returns the mark holding a full line, `None` otherwise.
///
/// Only reports line completion. A full board without a line is for the
/// caller to treat as a draw.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}
