//! Window bound invariant: pieces on the board match the window size.

use super::Invariant;
use crate::state::GameState;
use crate::types::MAX_MOVES;

/// Invariant: history holds at most six entries and the board holds
/// exactly as many pieces.
pub struct WindowBoundInvariant;

impl Invariant<GameState> for WindowBoundInvariant {
    fn holds(state: &GameState) -> bool {
        let history_len = state.history().len();
        history_len <= MAX_MOVES && state.board().occupied_count() == history_len
    }

    fn description() -> &'static str {
        "Occupied cells equal history length, which is at most six"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_through_a_long_game() {
        let mut state = GameState::new();
        // Cycles the window several times without completing a line.
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8, 0, 1, 2] {
            state = crate::referee::try_apply_move(&state, index).unwrap();
            assert!(WindowBoundInvariant::holds(&state));
        }
        assert_eq!(state.history().len(), MAX_MOVES);
    }
}
