//! Computer player backed by the minimax search.

use super::Player;
use anyhow::Result;
use sliding_tictactoe::{GameState, Mark, SearchConfig, best_move_with};
use tracing::{info, instrument};

/// Searches for its moves on a blocking worker thread.
#[derive(Debug, Clone, derive_new::new)]
pub struct ComputerPlayer {
    name: String,
    mark: Mark,
    config: SearchConfig,
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    #[instrument(skip(self, state), fields(player = %self.name, mark = %self.mark))]
    async fn choose(&mut self, state: &GameState) -> Result<Option<usize>> {
        let snapshot = *state;
        let maximizing = self.mark == Mark::X;
        let config = self.config;
        let choice = tokio::task::spawn_blocking(move || {
            best_move_with(snapshot.board(), snapshot.history(), maximizing, config)
        })
        .await?;
        info!(?choice, "Computer chose");
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
