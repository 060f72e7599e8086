//! Exhaustive checks over every legal move sequence up to a fixed depth.

use sliding_tictactoe::rules::{LINES, holds_line};
use sliding_tictactoe::{Cell, GameState, MAX_MOVES, Mark, try_apply_move};

/// Eight plies covers two evictions.
const PLIES: usize = 8;

/// Calls `check(before, index, after, accepted_moves)` for every legal
/// transition reachable from `state` within `depth` plies.
fn walk(
    state: &GameState,
    accepted: usize,
    depth: usize,
    check: &mut dyn FnMut(&GameState, usize, &GameState, usize),
) {
    if depth == 0 || state.is_over() {
        return;
    }
    for index in state.legal_moves() {
        let next = try_apply_move(state, index).expect("legal move must be accepted");
        check(state, index, &next, accepted + 1);
        walk(&next, accepted + 1, depth - 1, check);
    }
}

#[test]
fn test_window_length_matches_accepted_moves() {
    walk(&GameState::new(), 0, PLIES, &mut |_, _, after, accepted| {
        let expected = accepted.min(MAX_MOVES);
        assert_eq!(after.history().len(), expected);
        assert_eq!(after.board().occupied_count(), expected);
    });
}

#[test]
fn test_turn_alternates_unless_move_wins() {
    walk(&GameState::new(), 0, PLIES, &mut |before, _, after, _| {
        match after.winner() {
            Some(winner) => {
                assert_eq!(winner, before.turn(), "only the mover can complete a line");
                assert_eq!(after.turn(), before.turn());
            }
            None => assert_eq!(after.turn(), before.turn().opponent()),
        }
    });
}

#[test]
fn test_only_the_mover_can_hold_a_line() {
    walk(&GameState::new(), 0, PLIES, &mut |before, _, after, _| {
        let waiting = before.turn().opponent();
        assert!(!holds_line(after.board(), waiting));
        let waiting_cell = Some(Cell::Occupied(waiting));
        for line in LINES {
            assert!(!line.iter().all(|&index| after.board().get(index) == waiting_cell));
        }
    });
}

#[test]
fn test_seventh_move_evicts_exactly_the_first() {
    walk(&GameState::new(), 0, PLIES, &mut |before, index, after, _| {
        let mut expected: Vec<usize> = before.history().iter().collect();
        if before.history().is_full() {
            let oldest = expected.remove(0);
            assert_eq!(after.board().get(oldest), Some(Cell::Empty));
        }
        expected.push(index);
        assert_eq!(after.history().to_vec(), expected);

        // Every other piece keeps its mark.
        for kept in &expected[..expected.len() - 1] {
            assert_eq!(after.board().get(*kept), before.board().get(*kept));
        }
        assert_eq!(after.board().get(index), Some(Cell::Occupied(before.turn())));
    });
}

#[test]
fn test_every_reachable_state_satisfies_invariants() {
    walk(&GameState::new(), 0, PLIES, &mut |_, _, after, _| {
        assert!(sliding_tictactoe::invariants::check(after).is_ok());
    });
}

#[test]
fn test_apply_move_is_deterministic() {
    walk(&GameState::new(), 0, 5, &mut |before, index, after, _| {
        assert_eq!(try_apply_move(before, index).as_ref(), Ok(after));
    });
}

#[test]
fn test_long_game_cycles_the_window() {
    let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8, 0, 1, 2];
    let state = GameState::replay(&moves).expect("no line is completed");
    assert_eq!(state.winner(), None);
    assert_eq!(state.history().to_vec(), vec![7, 6, 8, 0, 1, 2]);
    assert_eq!(state.turn(), Mark::X);
}
