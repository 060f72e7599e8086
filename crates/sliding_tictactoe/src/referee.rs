//! The single authoritative state transition.
//!
//! Every mode goes through [`try_apply_move`]: local play, the computer
//! opponent, and optimistic moves in a networked match. Mode code only
//! decides who may call it and where the result goes.

use crate::action::MoveError;
use crate::board::place;
use crate::invariants::audit;
use crate::rules::check_winner;
use crate::state::GameState;
use crate::types::Mark;
use tracing::{debug, info, instrument, warn};

/// Applies one move for the side to move.
///
/// On success the piece is placed (evicting the oldest one if the window
/// is full). A completed line sets the winner and keeps `turn` on the
/// winner; otherwise `turn` passes to the opponent.
///
/// # Errors
///
/// - [`MoveError::GameOver`] once a winner is set.
/// - [`MoveError::OutOfRange`] / [`MoveError::CellOccupied`] for bad cells.
///
/// The input state is never modified.
#[instrument(skip(state), fields(turn = %state.turn, history_len = state.history.len()))]
pub fn try_apply_move(state: &GameState, index: usize) -> Result<GameState, MoveError> {
    if let Some(winner) = state.winner {
        return Err(MoveError::GameOver(winner));
    }

    let mark = state.turn;
    let placed = place(&state.board, &state.history, index, mark)?;
    let winner = check_winner(&placed.board);

    let next = GameState {
        board: placed.board,
        turn: if winner.is_some() { mark } else { mark.opponent() },
        history: placed.history,
        winner,
    };
    audit(&next);

    if let Some(evicted) = placed.evicted {
        debug!(evicted, "Oldest piece removed");
    }
    match winner {
        Some(winner) => info!(%winner, index, "Move completed a line"),
        None => debug!(index, next_turn = %next.turn, "Move accepted"),
    }
    Ok(next)
}

/// Applies one move, returning `state` unchanged if it is refused.
///
/// Never fails: refusals are logged and absorbed.
pub fn apply_move(state: &GameState, index: usize) -> GameState {
    try_apply_move(state, index).unwrap_or_else(|error| {
        warn!(index, %error, kind = ?error.kind(), "Move ignored");
        *state
    })
}

/// Applies a move on behalf of `seat`, refusing it when `seat` is not to move.
///
/// # Errors
///
/// [`MoveError::NotYourTurn`] in addition to those of [`try_apply_move`].
/// A finished game reports [`MoveError::GameOver`] first.
#[instrument(skip(state), fields(turn = %state.turn))]
pub fn try_apply_move_as(
    state: &GameState,
    seat: Mark,
    index: usize,
) -> Result<GameState, MoveError> {
    if let Some(winner) = state.winner {
        return Err(MoveError::GameOver(winner));
    }
    if state.turn != seat {
        return Err(MoveError::NotYourTurn(seat));
    }
    try_apply_move(state, index)
}

/// Passes the turn without placing a piece.
///
/// For a side with no empty cell to play. Sliding play always leaves
/// three cells free, so only an externally supplied full board gets
/// here; the window no longer alternates afterwards.
///
/// # Errors
///
/// [`MoveError::GameOver`] once a winner is set.
#[instrument(skip(state), fields(turn = %state.turn))]
pub fn skip_turn(state: &GameState) -> Result<GameState, MoveError> {
    if let Some(winner) = state.winner {
        return Err(MoveError::GameOver(winner));
    }
    info!(skipped = %state.turn, "Turn skipped");
    Ok(GameState {
        turn: state.turn.opponent(),
        ..*state
    })
}

/// The state every game starts from and every reset returns to.
pub fn reset() -> GameState {
    GameState::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_accepted_move_alternates_turn() {
        let state = try_apply_move(&GameState::new(), 4).unwrap();
        assert_eq!(state.turn(), Mark::O);
        assert_eq!(state.board().get(4), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_winning_move_keeps_turn() {
        let before = GameState::replay(&[0, 3, 1, 4]).unwrap();
        assert_eq!(before.turn(), Mark::X);

        let after = try_apply_move(&before, 2).unwrap();
        assert_eq!(after.winner(), Some(Mark::X));
        assert_eq!(after.turn(), Mark::X);
    }

    #[test]
    fn test_refused_move_leaves_state_unchanged() {
        let state = GameState::replay(&[4]).unwrap();
        assert_eq!(apply_move(&state, 4), state);
        assert_eq!(apply_move(&state, 42), state);
    }

    #[test]
    fn test_no_move_after_win() {
        let won = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(try_apply_move(&won, 8), Err(MoveError::GameOver(Mark::X)));
        assert_eq!(apply_move(&won, 8), won);
    }

    #[test]
    fn test_seat_must_match_turn() {
        let state = GameState::new();
        assert_eq!(
            try_apply_move_as(&state, Mark::O, 4),
            Err(MoveError::NotYourTurn(Mark::O))
        );
        assert!(try_apply_move_as(&state, Mark::X, 4).is_ok());
    }

    #[test]
    fn test_skip_passes_turn_only() {
        let state = GameState::replay(&[4, 0]).unwrap();
        let skipped = skip_turn(&state).unwrap();
        assert_eq!(skipped.turn(), Mark::O);
        assert_eq!(skipped.board(), state.board());
        assert_eq!(skipped.history(), state.history());

        let won = GameState::replay(&[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(skip_turn(&won), Err(MoveError::GameOver(Mark::X)));
    }

    #[test]
    fn test_reset_is_initial_state() {
        assert_eq!(reset(), GameState::new());
    }
}
