//! Sliding-window tic-tac-toe engine.
//!
//! Only the last [`MAX_MOVES`] pieces stay on the board: placing a new
//! piece while six are down removes the oldest one. The crate holds the
//! pure game logic shared by every way of playing:
//!
//! - **Board model**: [`place`] with atomic eviction.
//! - **Win detector**: [`check_winner`].
//! - **Referee**: [`try_apply_move`] / [`apply_move`], the only
//!   transition from one [`GameState`] to the next.
//! - **Search**: [`best_move`], minimax that simulates eviction.
//!
//! Nothing here performs I/O or holds state between calls. Every
//! function takes a snapshot and returns a new one, so identical inputs
//! give identical outputs whether computed locally or re-derived from a
//! remote update.
//!
//! # Example
//!
//! ```
//! use sliding_tictactoe::{GameState, Mark, apply_move};
//!
//! let state = [0, 3, 1, 4, 2]
//!     .into_iter()
//!     .fold(GameState::new(), |state, index| apply_move(&state, index));
//! assert_eq!(state.winner(), Some(Mark::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod history;
mod referee;
mod search;
mod state;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError, MoveErrorKind};
pub use board::{Placement, place};
pub use history::{HistoryError, MoveHistory};
pub use referee::{apply_move, reset, skip_turn, try_apply_move, try_apply_move_as};
pub use rules::{check_winner, winning_line};
pub use search::{
    Analysis, DEFAULT_MAX_DEPTH, MAX_DEPTH, MIN_DEPTH, SearchConfig, WIN_SCORE, analyze,
    best_move, best_move_with,
};
pub use state::{GameState, GameStatus, Phase};
pub use types::{Board, CELL_COUNT, Cell, MAX_MOVES, Mark};
