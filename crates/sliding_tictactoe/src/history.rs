//! Bounded move history backing the sliding window.

use crate::types::{CELL_COUNT, MAX_MOVES};
use serde::{Deserialize, Serialize};

/// Cell indices of the pieces still on the board, oldest first.
///
/// Holds at most [`MAX_MOVES`] distinct indices. Serializes as a plain
/// integer sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct MoveHistory {
    entries: [u8; MAX_MOVES],
    len: u8,
}

/// Reasons a sequence of indices cannot be a move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    /// More entries than the window holds.
    #[display("history holds {} entries, at most {} allowed", _0, MAX_MOVES)]
    TooLong(#[error(not(source))] usize),
    /// Entry is not a cell index.
    #[display("history entry {} is not a cell index", _0)]
    OutOfRange(#[error(not(source))] usize),
    /// The same cell appears twice.
    #[display("cell {} appears more than once in history", _0)]
    Duplicate(#[error(not(source))] usize),
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from indices, oldest first.
    pub fn from_indices(indices: &[usize]) -> Result<Self, HistoryError> {
        if indices.len() > MAX_MOVES {
            return Err(HistoryError::TooLong(indices.len()));
        }
        let mut history = Self::new();
        for &index in indices {
            if index >= CELL_COUNT {
                return Err(HistoryError::OutOfRange(index));
            }
            if history.contains(index) {
                return Err(HistoryError::Duplicate(index));
            }
            history.entries[usize::from(history.len)] = index as u8;
            history.len += 1;
        }
        Ok(history)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Checks whether no move has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks whether the next placement evicts the oldest piece.
    pub fn is_full(&self) -> bool {
        self.len() >= MAX_MOVES
    }

    /// The oldest piece still on the board.
    pub fn oldest(&self) -> Option<usize> {
        self.iter().next()
    }

    /// The most recent placement.
    pub fn latest(&self) -> Option<usize> {
        self.iter().last()
    }

    /// Checks whether `index` is in the window.
    pub fn contains(&self, index: usize) -> bool {
        self.iter().any(|entry| entry == index)
    }

    /// Iterates indices, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.entries[..self.len()].iter().map(|&entry| usize::from(entry))
    }

    /// Copies the indices into a vector, oldest first.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Appends `index`, dropping and returning the oldest entry when full.
    ///
    /// Callers guarantee `index < CELL_COUNT`.
    pub(crate) fn push_evicting(&mut self, index: usize) -> Option<usize> {
        let evicted = if self.is_full() {
            let oldest = usize::from(self.entries[0]);
            self.entries.copy_within(1.., 0);
            self.len -= 1;
            Some(oldest)
        } else {
            None
        };
        self.entries[self.len()] = index as u8;
        self.len += 1;
        evicted
    }
}

impl From<MoveHistory> for Vec<usize> {
    fn from(history: MoveHistory) -> Self {
        history.to_vec()
    }
}

impl TryFrom<Vec<usize>> for MoveHistory {
    type Error = HistoryError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_indices(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full_keeps_order() {
        let mut history = MoveHistory::new();
        for index in [4, 0, 8, 2, 6, 1] {
            assert_eq!(history.push_evicting(index), None);
        }
        assert!(history.is_full());
        assert_eq!(history.to_vec(), vec![4, 0, 8, 2, 6, 1]);
    }

    #[test]
    fn test_seventh_push_evicts_first() {
        let mut history = MoveHistory::from_indices(&[4, 0, 8, 2, 6, 1]).unwrap();
        assert_eq!(history.push_evicting(3), Some(4));
        assert_eq!(history.to_vec(), vec![0, 8, 2, 6, 1, 3]);
        assert_eq!(history.len(), MAX_MOVES);
    }

    #[test]
    fn test_from_indices_rejects_bad_input() {
        assert_eq!(
            MoveHistory::from_indices(&[0, 1, 2, 3, 4, 5, 6]),
            Err(HistoryError::TooLong(7))
        );
        assert_eq!(MoveHistory::from_indices(&[9]), Err(HistoryError::OutOfRange(9)));
        assert_eq!(MoveHistory::from_indices(&[3, 3]), Err(HistoryError::Duplicate(3)));
    }

    #[test]
    fn test_serializes_as_integer_array() {
        let history = MoveHistory::from_indices(&[2, 5, 0]).unwrap();
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, "[2,5,0]");

        let back: MoveHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
        assert!(serde_json::from_str::<MoveHistory>("[1,1]").is_err());
    }
}
