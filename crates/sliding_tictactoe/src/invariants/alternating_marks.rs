//! Alternating marks invariant: pieces in the window alternate X, O, X, ...

use super::Invariant;
use crate::state::GameState;
use crate::types::Cell;

/// Invariant: walking the history from newest to oldest, the marks
/// alternate, starting with the mark that moved last.
///
/// The last mover is the winner of a finished game and the opponent of
/// `turn` otherwise.
pub struct AlternatingMarksInvariant;

impl Invariant<GameState> for AlternatingMarksInvariant {
    fn holds(state: &GameState) -> bool {
        let mut expected = state.winner().unwrap_or(state.turn().opponent());
        for index in state.history().iter().rev() {
            if state.board().get(index) != Some(Cell::Occupied(expected)) {
                return false;
            }
            expected = expected.opponent();
        }
        true
    }

    fn description() -> &'static str {
        "Marks in the window alternate, ending with the last mover"
    }
}
