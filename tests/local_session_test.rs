//! Tests for local play against the computer.

use sliding_games::{ComputerOutcome, LocalSession};
use sliding_tictactoe::{GameState, Mark, MoveError, SearchConfig};

#[test]
fn test_computer_answers_human_move() {
    let mut session = LocalSession::new(Mark::X, SearchConfig::new(4));
    assert_eq!(session.status_text(), "Your turn");
    assert!(session.computer_ticket().is_none());

    session.play_human(4).unwrap();
    assert_eq!(session.status_text(), "Computer is thinking...");

    match session.play_computer() {
        Some(ComputerOutcome::Played { index, state }) => {
            assert_ne!(index, 4);
            assert_eq!(state.history().len(), 2);
            assert_eq!(state.turn(), Mark::X);
        }
        other => panic!("expected a computer move, got {:?}", other),
    }
    assert_eq!(session.status_text(), "Your turn");
}

#[test]
fn test_computer_opens_when_human_plays_o() {
    let mut session = LocalSession::new(Mark::O, SearchConfig::new(2));
    let ticket = session.computer_ticket().expect("computer moves first");
    assert_eq!(*ticket.mark(), Mark::X);

    let choice = ticket.run();
    assert!(matches!(
        session.finish_computer(&ticket, choice),
        ComputerOutcome::Played { .. }
    ));
}

#[test]
fn test_stale_search_result_is_discarded() {
    let mut session = LocalSession::new(Mark::X, SearchConfig::new(3));
    session.play_human(0).unwrap();
    let ticket = session.computer_ticket().unwrap();

    // The player restarts while the computer is still searching.
    session.reset();
    let choice = ticket.run();
    assert_eq!(session.finish_computer(&ticket, choice), ComputerOutcome::Stale);
    assert_eq!(session.state(), &GameState::new());
}

#[test]
fn test_human_moves_refused_while_computer_to_move() {
    let mut session = LocalSession::new(Mark::X, SearchConfig::new(2));
    session.play_human(4).unwrap();
    assert_eq!(session.play_human(0), Err(MoveError::NotYourTurn(Mark::X)));
    assert_eq!(session.play_human(4), Err(MoveError::NotYourTurn(Mark::X)));
}

#[test]
fn test_reset_starts_over() {
    let mut session = LocalSession::new(Mark::X, SearchConfig::new(2));
    session.play_human(4).unwrap();
    session.reset();
    assert_eq!(session.state(), &GameState::new());
    assert_eq!(session.status_text(), "Your turn");
    assert!(session.play_human(4).is_ok());
}
