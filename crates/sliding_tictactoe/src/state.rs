//! The game state exchanged with the outside world.

use crate::action::{Move, MoveError};
use crate::history::MoveHistory;
use crate::referee::try_apply_move;
use crate::rules::is_draw;
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Board, turn, history and winner of one game.
///
/// Snapshots are plain values: every transition takes one and returns a
/// new one. Only [`try_apply_move`] and [`crate::skip_turn`] produce
/// successors of a game in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: Mark,
    pub(crate) history: MoveHistory,
    pub(crate) winner: Option<Mark>,
}

/// Position in the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the given mark to move.
    Playing(Mark),
    /// Terminal until reset.
    Won(Mark),
}

/// Outcome-oriented view of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing, the given mark moves next.
    InProgress(Mark),
    /// Game ended in a win.
    Won(Mark),
    /// Full board without a line.
    Draw,
}

impl GameState {
    /// Creates the initial state: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            history: MoveHistory::new(),
            winner: None,
        }
    }

    /// Assembles a state from externally supplied parts, as is.
    ///
    /// No rule checks happen here: remote snapshots are taken verbatim.
    /// Use [`crate::invariants::check`] to inspect one.
    pub fn from_parts(
        board: Board,
        turn: Mark,
        history: MoveHistory,
        winner: Option<Mark>,
    ) -> Self {
        Self {
            board,
            turn,
            history,
            winner,
        }
    }

    /// Plays `indices` from the initial state, alternating from X.
    ///
    /// # Errors
    ///
    /// Stops at the first refused move.
    pub fn replay(indices: &[usize]) -> Result<Self, MoveError> {
        indices
            .iter()
            .try_fold(Self::new(), |state, &index| try_apply_move(&state, index))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move, or the winner once the game is over.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Checks whether a winner is set.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        match self.winner {
            Some(mark) => Phase::Won(mark),
            None => Phase::Playing(self.turn),
        }
    }

    /// Current status, including the draw case.
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(mark) => GameStatus::Won(mark),
            None if is_draw(&self.board) => GameStatus::Draw,
            None => GameStatus::InProgress(self.turn),
        }
    }

    /// Cells the side to move may take, lowest first. Empty once won.
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    /// The piece that vanishes on the next placement, if the window is full.
    pub fn fading_cell(&self) -> Option<usize> {
        if self.history.is_full() {
            self.history.oldest()
        } else {
            None
        }
    }

    /// Pieces still on the board, oldest first, with their marks.
    pub fn moves(&self) -> Vec<Move> {
        self.history
            .iter()
            .filter_map(|index| {
                let mark = self.board.get(index)?.mark()?;
                Some(Move::new(mark, index))
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
