//! Single line owner invariant: at most one mark holds a line.

use super::Invariant;
use crate::rules::holds_line;
use crate::state::GameState;
use crate::types::Mark;
use strum::IntoEnumIterator;

/// Invariant: lines are never completed by both marks at once.
///
/// Only the mover places a piece, and eviction only removes one, so a
/// move can complete lines for the mover alone.
pub struct SingleLineOwnerInvariant;

impl Invariant<GameState> for SingleLineOwnerInvariant {
    fn holds(state: &GameState) -> bool {
        Mark::iter()
            .filter(|&mark| holds_line(state.board(), mark))
            .count()
            <= 1
    }

    fn description() -> &'static str {
        "At most one mark holds a completed line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MoveHistory;
    use crate::types::{Board, Cell};

    #[test]
    fn test_won_game_holds() {
        let state = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert!(SingleLineOwnerInvariant::holds(&state));
    }

    #[test]
    fn test_two_owners_violate() {
        // X X X / O O O / _ _ _
        let x = Cell::Occupied(Mark::X);
        let o = Cell::Occupied(Mark::O);
        let e = Cell::Empty;
        let state = GameState::from_parts(
            Board::from_cells([x, x, x, o, o, o, e, e, e]),
            Mark::X,
            MoveHistory::from_indices(&[0, 3, 1, 4, 2, 5]).unwrap(),
            Some(Mark::X),
        );
        assert!(!SingleLineOwnerInvariant::holds(&state));
    }
}
