//! Piece placement under the sliding-window rule.
//!
//! Only the most recent [`MAX_MOVES`] pieces stay on the board. Placing
//! another one first removes the oldest piece and drops it from the
//! history. Both happen inside [`place`], so callers never see a board
//! with the old piece gone and the new one missing.

use crate::action::MoveError;
use crate::history::MoveHistory;
use crate::types::{Board, CELL_COUNT, Cell, MAX_MOVES, Mark};

/// Board and history after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Board with the new piece and without the evicted one.
    pub board: Board,
    /// History ending with the new piece.
    pub history: MoveHistory,
    /// Cell emptied to make room, if the window was full.
    pub evicted: Option<usize>,
}

/// Places `mark` at `index`, evicting the oldest piece when the window is full.
///
/// The target must be empty before eviction: the piece about to vanish
/// still blocks its own cell.
///
/// # Errors
///
/// - [`MoveError::OutOfRange`] if `index` is not a cell.
/// - [`MoveError::CellOccupied`] if the cell holds a piece.
pub fn place(
    board: &Board,
    history: &MoveHistory,
    index: usize,
    mark: Mark,
) -> Result<Placement, MoveError> {
    if index >= CELL_COUNT {
        return Err(MoveError::OutOfRange(index));
    }
    if !board.is_empty(index) {
        return Err(MoveError::CellOccupied(index));
    }

    let mut board = *board;
    let mut history = *history;
    let evicted = history.push_evicting(index);
    if let Some(oldest) = evicted {
        board.set(oldest, Cell::Empty);
    }
    board.set(index, Cell::Occupied(mark));

    debug_assert!(history.len() <= MAX_MOVES);
    Ok(Placement {
        board,
        history,
        evicted,
    })
}
