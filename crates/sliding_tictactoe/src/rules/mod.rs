//! Game rules for sliding-window tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Line completion lives
//! in [`win`]; [`draw`] only answers whether the board is full, which the
//! caller combines with the win check.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, holds_line, winning_line};
