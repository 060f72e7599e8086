//! First-class invariants for sliding-window tic-tac-toe.
//!
//! Invariants are logical properties every state produced by the referee
//! satisfies. States assembled from outside (remote snapshots) may break
//! them; [`check`] reports which ones.

use crate::state::GameState;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod alternating_marks;
pub mod history_matches_board;
pub mod single_line_owner;
pub mod turn_consistency;
pub mod window_bound;

pub use alternating_marks::AlternatingMarksInvariant;
pub use history_matches_board::HistoryMatchesBoardInvariant;
pub use single_line_owner::SingleLineOwnerInvariant;
pub use turn_consistency::TurnConsistencyInvariant;
pub use window_bound::WindowBoundInvariant;

/// All game-state invariants as a composable set.
pub type SlidingInvariants = (
    WindowBoundInvariant,
    HistoryMatchesBoardInvariant,
    AlternatingMarksInvariant,
    TurnConsistencyInvariant,
    SingleLineOwnerInvariant,
);

/// Checks every invariant on `state`.
pub fn check(state: &GameState) -> Result<(), Vec<InvariantViolation>> {
    SlidingInvariants::check_all(state)
}

/// Logs each violated invariant. Returns whether all of them hold.
pub fn audit(state: &GameState) -> bool {
    match check(state) {
        Ok(()) => true,
        Err(violations) => {
            for violation in &violations {
                warn!(%violation, "Game state invariant violated");
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MoveHistory;
    use crate::types::{Board, Cell, Mark};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(check(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_evictions() {
        let state = GameState::replay(&[0, 1, 2, 3, 5, 4, 7, 8]).unwrap();
        assert!(state.history().is_full());
        assert!(check(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Occupied(Mark::O);
        let state = GameState::from_parts(
            Board::from_cells(cells),
            Mark::X,
            MoveHistory::from_indices(&[4]).unwrap(),
            None,
        );

        let violations = check(&state).unwrap_err();
        assert!(violations.len() >= 2);
        assert!(!audit(&state));
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (WindowBoundInvariant, TurnConsistencyInvariant);
        assert!(TwoInvariants::check_all(&GameState::new()).is_ok());
    }
}
