//! Moves and the ways they can be refused.

use crate::types::{CELL_COUNT, Mark};
use serde::{Deserialize, Serialize};

/// A placed piece: who put it where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark of the piece.
    pub mark: Mark,
    /// The cell it sits in.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, index: usize) -> Self {
        Self { mark, index }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.index)
    }
}

/// Broad class of a refused move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveErrorKind {
    /// The target cell cannot take a piece. Shown to players as "click ignored".
    InvalidMove,
    /// The move is not allowed right now (game over or wrong turn).
    IllegalMove,
}

/// Error returned when a move is refused.
///
/// A refused move never changes the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Index outside the board.
    #[display("Cell {} is off the board (must be 0-{})", _0, CELL_COUNT - 1)]
    OutOfRange(#[error(not(source))] usize),

    /// The cell already holds a piece.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),

    /// The game already has a winner.
    #[display("Game is already over, {} won", _0)]
    GameOver(#[error(not(source))] Mark),

    /// A seat tried to move while the other mark is to play.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Mark),
}

impl MoveError {
    /// Classifies the error.
    pub fn kind(&self) -> MoveErrorKind {
        match self {
            MoveError::OutOfRange(_) | MoveError::CellOccupied(_) => MoveErrorKind::InvalidMove,
            MoveError::GameOver(_) | MoveError::NotYourTurn(_) => MoveErrorKind::IllegalMove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(MoveError::OutOfRange(9).kind(), MoveErrorKind::InvalidMove);
        assert_eq!(MoveError::CellOccupied(4).kind(), MoveErrorKind::InvalidMove);
        assert_eq!(MoveError::GameOver(Mark::X).kind(), MoveErrorKind::IllegalMove);
        assert_eq!(MoveError::NotYourTurn(Mark::O).kind(), MoveErrorKind::IllegalMove);
    }

    #[test]
    fn test_messages() {
        assert_eq!(MoveError::NotYourTurn(Mark::O).to_string(), "It's not O's turn");
        assert_eq!(
            MoveError::OutOfRange(12).to_string(),
            "Cell 12 is off the board (must be 0-8)"
        );
    }
}
