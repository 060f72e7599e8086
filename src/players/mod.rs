//! Participants the orchestrator can ask for moves.

mod computer;

pub use computer::ComputerPlayer;

use anyhow::Result;
use sliding_tictactoe::GameState;

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Picks a cell (0-8) for the side to move in `state`.
    ///
    /// `Ok(None)` means the player has no cell to play and skips the turn.
    async fn choose(&mut self, state: &GameState) -> Result<Option<usize>>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
