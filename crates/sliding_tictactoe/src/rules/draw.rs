//! Draw detection.
//!
//! With a six-piece window the board never fills up during play, so a
//! draw cannot arise from legal moves. The check stays for boards that
//! come from elsewhere.

use super::win::check_winner;
use crate::types::Board;

/// Checks if every cell holds a piece.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
