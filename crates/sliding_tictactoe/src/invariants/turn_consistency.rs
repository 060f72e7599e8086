//! Turn consistency invariant: winner and turn agree with the board.

use super::Invariant;
use crate::rules::check_winner;
use crate::state::GameState;
use crate::types::Mark;

/// Invariant: the recorded winner is the board's winner, a finished game
/// keeps `turn` on the winner, and a game without moves has X to play.
pub struct TurnConsistencyInvariant;

impl Invariant<GameState> for TurnConsistencyInvariant {
    fn holds(state: &GameState) -> bool {
        if state.winner() != check_winner(state.board()) {
            return false;
        }
        if let Some(winner) = state.winner() {
            return state.turn() == winner;
        }
        !state.history().is_empty() || state.turn() == Mark::X
    }

    fn description() -> &'static str {
        "Winner matches the board and turn stays on the winner"
    }
}
