//! Mapping between [`GameState`] and the columns of a remote match record.
//!
//! A record stores the board as nine `"X"`/`"O"`/`null` entries, the
//! history as an integer list and the marks as strings. Snapshots are
//! full: every update carries all four game columns.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use sliding_tictactoe::{Board, CELL_COUNT, Cell, GameState, Mark, MoveHistory, invariants};
use tracing::{instrument, warn};

/// Identifier of a match, shared with the other player as a room code.
pub type MatchId = String;

/// Lifecycle of a match record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    /// Created, waiting for O to join.
    Waiting,
    /// Both seats taken, game in progress.
    Active,
    /// Somebody completed a line.
    Finished,
    /// A player left.
    Abandoned,
}

/// The game columns of a match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateColumns {
    /// Nine entries, `"X"`, `"O"` or `null`.
    pub board: Vec<Option<String>>,
    /// Cell indices, oldest first.
    pub moves_history: Vec<i64>,
    /// `"X"` or `"O"`.
    pub turn: String,
    /// `"X"`, `"O"` or `null`.
    pub winner: Option<String>,
}

/// A full match record as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    /// Room code.
    pub id: MatchId,
    /// Name of the creator, who plays X.
    pub player_x_name: Option<String>,
    /// Name of the joiner, who plays O.
    pub player_o_name: Option<String>,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Game columns.
    #[serde(flatten)]
    pub state: StateColumns,
}

impl MatchRow {
    /// Decodes the game columns.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn game_state(&self) -> Result<GameState, SyncError> {
        decode(&self.state)
    }
}

/// Column value for a mark.
pub fn mark_column(mark: Mark) -> String {
    mark.to_string()
}

/// Parses a mark column.
///
/// # Errors
///
/// Returns [`SyncError`] for anything but `"X"` or `"O"`.
#[track_caller]
pub fn parse_mark(value: &str) -> Result<Mark, SyncError> {
    match value {
        "X" => Ok(Mark::X),
        "O" => Ok(Mark::O),
        other => Err(SyncError::new(format!("Invalid mark: '{}'", other))),
    }
}

/// Encodes a state as record columns.
#[instrument(skip(state), fields(history_len = state.history().len()))]
pub fn encode(state: &GameState) -> StateColumns {
    StateColumns {
        board: state
            .board()
            .cells()
            .iter()
            .map(|cell| cell.mark().map(mark_column))
            .collect(),
        moves_history: state.history().iter().map(|index| index as i64).collect(),
        turn: mark_column(state.turn()),
        winner: state.winner().map(mark_column),
    }
}

/// Decodes record columns into a state, taking them verbatim.
///
/// Only the shape is validated. A well-formed snapshot that breaks a game
/// rule is still returned; the violation is logged.
///
/// # Errors
///
/// Returns [`SyncError`] when the board does not have nine cells, a mark
/// is unknown, or the history is not a valid window.
#[instrument(skip(columns))]
pub fn decode(columns: &StateColumns) -> Result<GameState, SyncError> {
    if columns.board.len() != CELL_COUNT {
        return Err(SyncError::new(format!(
            "Board has {} cells, expected {}",
            columns.board.len(),
            CELL_COUNT
        )));
    }

    let mut cells = [Cell::Empty; CELL_COUNT];
    for (cell, value) in cells.iter_mut().zip(&columns.board) {
        if let Some(value) = value {
            *cell = Cell::Occupied(parse_mark(value)?);
        }
    }

    let indices = columns
        .moves_history
        .iter()
        .map(|&index| {
            usize::try_from(index)
                .map_err(|_| SyncError::new(format!("History entry {} is negative", index)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let history = MoveHistory::from_indices(&indices)
        .map_err(|e| SyncError::new(format!("Invalid history: {}", e)))?;

    let turn = parse_mark(&columns.turn)?;
    let winner = columns.winner.as_deref().map(parse_mark).transpose()?;

    let state = GameState::from_parts(Board::from_cells(cells), turn, history, winner);
    if !invariants::audit(&state) {
        warn!("Accepted remote state that breaks game rules");
    }
    Ok(state)
}

/// Malformed record columns.
#[derive(Debug, Clone, Display, Error)]
#[display("Sync error: {} at {}:{}", message, file, line)]
pub struct SyncError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SyncError {
    /// Creates a new sync error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_initial_state() {
        let columns = encode(&GameState::new());
        assert_eq!(columns.board, vec![None; 9]);
        assert!(columns.moves_history.is_empty());
        assert_eq!(columns.turn, "X");
        assert_eq!(columns.winner, None);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(MatchStatus::Abandoned.to_string(), "abandoned");
        assert_eq!("active".parse::<MatchStatus>().unwrap(), MatchStatus::Active);
    }

    #[test]
    fn test_unknown_mark_rejected() {
        assert!(parse_mark("x").is_err());
        assert!(parse_mark("").is_err());
        assert_eq!(parse_mark("O").unwrap(), Mark::O);
    }
}
