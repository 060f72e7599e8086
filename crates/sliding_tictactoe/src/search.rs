//! Depth-bounded minimax for the computer opponent.
//!
//! Every node is expanded with [`place`], so the search sees pieces
//! vanish exactly as they do in play. X maximizes, O minimizes.

use crate::board::place;
use crate::history::MoveHistory;
use crate::rules::check_winner;
use crate::types::{Board, CELL_COUNT, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a win found one ply from the root, before the depth penalty.
///
/// Larger than the deepest allowed search, so every win outranks a draw.
pub const WIN_SCORE: i32 = 10;

/// Default search horizon in plies.
pub const DEFAULT_MAX_DEPTH: u8 = 8;

/// Shallowest horizon that still sees an immediate win or a forced block.
pub const MIN_DEPTH: u8 = 2;

/// Deepest horizon: keeps the slowest win scoring above zero.
pub const MAX_DEPTH: u8 = 9;

/// Search settings.
///
/// Serializes as the bare depth; deserializing goes through [`SearchConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct SearchConfig {
    max_depth: u8,
}

impl SearchConfig {
    /// Creates a config, clamping the depth to `MIN_DEPTH..=MAX_DEPTH`.
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth: max_depth.clamp(MIN_DEPTH, MAX_DEPTH),
        }
    }

    /// Search horizon in plies.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

impl From<u8> for SearchConfig {
    fn from(max_depth: u8) -> Self {
        Self::new(max_depth)
    }
}

impl From<SearchConfig> for u8 {
    fn from(config: SearchConfig) -> Self {
        config.max_depth
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// The result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Chosen cell, `None` when no cell is empty.
    pub best: Option<usize>,
    /// Minimax value of the chosen cell (positive favours X).
    pub score: i32,
    /// Positions visited.
    pub nodes: u64,
}

/// Picks a move with the default horizon.
///
/// `maximizing` selects the side to move: `true` for X, `false` for O.
/// Returns `None` (no move) when the board has no empty cell.
pub fn best_move(board: &Board, history: &MoveHistory, maximizing: bool) -> Option<usize> {
    best_move_with(board, history, maximizing, SearchConfig::default())
}

/// Picks a move with an explicit horizon.
pub fn best_move_with(
    board: &Board,
    history: &MoveHistory,
    maximizing: bool,
    config: SearchConfig,
) -> Option<usize> {
    analyze(board, history, maximizing, config).best
}

/// Runs the search and reports the chosen move with its value.
///
/// Equal scores keep the lowest cell index, so results are reproducible.
#[instrument(skip(board, history), fields(depth = config.max_depth))]
pub fn analyze(
    board: &Board,
    history: &MoveHistory,
    maximizing: bool,
    config: SearchConfig,
) -> Analysis {
    let mut search = Minimax {
        max_depth: config.max_depth,
        nodes: 0,
    };
    let mark = mover(maximizing);

    let mut best = None;
    let mut best_score = 0;
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;

    for index in 0..CELL_COUNT {
        let Ok(child) = place(board, history, index, mark) else {
            continue;
        };
        let score = search.value(&child.board, &child.history, 1, !maximizing, alpha, beta);
        let improves = match best {
            None => true,
            Some(_) if maximizing => score > best_score,
            Some(_) => score < best_score,
        };
        if improves {
            best = Some(index);
            best_score = score;
        }
        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
    }

    let analysis = Analysis {
        best,
        score: best_score,
        nodes: search.nodes,
    };
    debug!(
        best = ?analysis.best,
        score = analysis.score,
        nodes = analysis.nodes,
        "Search finished"
    );
    analysis
}

fn mover(maximizing: bool) -> Mark {
    if maximizing { Mark::X } else { Mark::O }
}

struct Minimax {
    max_depth: u8,
    nodes: u64,
}

impl Minimax {
    /// Alpha-beta minimax value of a position reached after `ply` moves.
    fn value(
        &mut self,
        board: &Board,
        history: &MoveHistory,
        ply: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(winner) = check_winner(board) {
            let score = WIN_SCORE - i32::from(ply);
            return match winner {
                Mark::X => score,
                Mark::O => -score,
            };
        }
        if ply >= self.max_depth {
            return 0;
        }

        let mark = mover(maximizing);
        let mut best: Option<i32> = None;
        for index in 0..CELL_COUNT {
            let Ok(child) = place(board, history, index, mark) else {
                continue;
            };
            let score = self.value(&child.board, &child.history, ply + 1, !maximizing, alpha, beta);
            if maximizing {
                let value = best.map_or(score, |best| best.max(score));
                best = Some(value);
                alpha = alpha.max(value);
            } else {
                let value = best.map_or(score, |best| best.min(score));
                best = Some(value);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        // No empty cell: nothing left to play, score as a draw.
        best.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameState;

    #[test]
    fn test_config_clamps_depth() {
        assert_eq!(SearchConfig::new(0).max_depth(), MIN_DEPTH);
        assert_eq!(SearchConfig::new(40).max_depth(), MAX_DEPTH);
        assert_eq!(SearchConfig::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_deserialized_depth_is_clamped() {
        let deep: SearchConfig = serde_json::from_str("40").unwrap();
        assert_eq!(deep.max_depth(), MAX_DEPTH);
        let shallow: SearchConfig = serde_json::from_str("0").unwrap();
        assert_eq!(shallow.max_depth(), MIN_DEPTH);
        assert_eq!(serde_json::to_string(&SearchConfig::new(5)).unwrap(), "5");
    }

    #[test]
    fn test_immediate_win_scores_highest() {
        let state = GameState::replay(&[0, 3, 1, 4]).unwrap();
        let analysis = analyze(state.board(), state.history(), true, SearchConfig::default());
        assert_eq!(analysis.best, Some(2));
        assert_eq!(analysis.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_no_move_on_full_board() {
        use crate::types::Cell;
        let x = Cell::Occupied(Mark::X);
        let o = Cell::Occupied(Mark::O);
        let board = Board::from_cells([x, o, x, o, x, x, o, x, o]);
        assert_eq!(best_move(&board, &MoveHistory::new(), true), None);
    }

    #[test]
    fn test_repeated_searches_agree() {
        let state = GameState::replay(&[4, 0, 8]).unwrap();
        let first = analyze(state.board(), state.history(), false, SearchConfig::new(6));
        let second = analyze(state.board(), state.history(), false, SearchConfig::new(6));
        assert_eq!(first, second);
    }
}
