//! History consistency invariant: history and occupied cells are the same set.

use super::Invariant;
use crate::state::GameState;

/// Invariant: every history entry is an occupied cell.
///
/// Together with [`super::WindowBoundInvariant`] this makes the set of
/// occupied cells equal to the set of history entries.
pub struct HistoryMatchesBoardInvariant;

impl Invariant<GameState> for HistoryMatchesBoardInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .history()
            .iter()
            .all(|index| matches!(state.board().get(index), Some(cell) if !cell.is_empty()))
    }

    fn description() -> &'static str {
        "Every history entry points at an occupied cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MoveHistory;
    use crate::types::Board;

    #[test]
    fn test_replayed_game_holds() {
        let state = GameState::replay(&[4, 0, 8, 2]).unwrap();
        assert!(HistoryMatchesBoardInvariant::holds(&state));
    }

    #[test]
    fn test_history_on_empty_cell_violates() {
        let state = GameState::from_parts(
            Board::new(),
            crate::Mark::O,
            MoveHistory::from_indices(&[4]).unwrap(),
            None,
        );
        assert!(!HistoryMatchesBoardInvariant::holds(&state));
    }
}
