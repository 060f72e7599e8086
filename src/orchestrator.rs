//! Game orchestration between two players.

use crate::players::Player;
use anyhow::Result;
use sliding_tictactoe::{GameState, Mark, skip_turn, try_apply_move};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A player is being asked for a move.
    AwaitingMove {
        /// Player name.
        player: String,
        /// Mark to move.
        mark: Mark,
        /// State the player sees.
        state: GameState,
    },
    /// Move was made.
    MoveMade {
        /// Player name.
        player: String,
        /// Cell taken.
        index: usize,
        /// Cell cleared to make room, if the window was full.
        evicted: Option<usize>,
        /// State after the move.
        state: GameState,
    },
    /// The referee refused a move; the same player is asked again.
    Rejected {
        /// Player name.
        player: String,
        /// Requested cell.
        index: usize,
        /// Why it was refused.
        reason: String,
    },
    /// A player had no cell to play; the turn passed to the opponent.
    Skipped {
        /// Player name.
        player: String,
        /// Mark that skipped.
        mark: Mark,
    },
    /// Both players skipped in a row, so nobody can move.
    Stalled,
    /// The game was cut off after this many moves.
    MoveLimitReached {
        /// Moves played.
        moves: usize,
    },
    /// Game ended.
    GameOver {
        /// Winning player's name.
        winner: String,
        /// Winning mark.
        mark: Mark,
    },
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    state: GameState,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    move_limit: Option<usize>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            state: GameState::new(),
            player_x,
            player_o,
            event_tx,
            move_limit: None,
        }
    }

    /// Stops the game after `limit` accepted moves.
    ///
    /// Two strong players can keep a sliding game going forever.
    pub fn with_move_limit(mut self, limit: usize) -> Self {
        self.move_limit = Some(limit);
        self
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs the game loop until someone wins, nobody can move, or the
    /// move limit is hit.
    ///
    /// Returns the final state.
    #[instrument(skip(self), fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub async fn run(&mut self) -> Result<GameState> {
        info!(move_limit = ?self.move_limit, "Starting game orchestration");
        let mut moves = 0;
        let mut skips_in_a_row = 0;

        loop {
            if let Some(winner) = self.state.winner() {
                let winner_name = self.player(winner).name().to_string();
                info!(winner = %winner_name, moves, "Game over");
                self.event_tx.send(GameEvent::GameOver {
                    winner: winner_name,
                    mark: winner,
                })?;
                return Ok(self.state);
            }
            if self.move_limit.is_some_and(|limit| moves >= limit) {
                info!(moves, "Move limit reached");
                self.event_tx.send(GameEvent::MoveLimitReached { moves })?;
                return Ok(self.state);
            }

            let mark = self.state.turn();
            let state = self.state;
            let player_name = self.player(mark).name().to_string();
            self.event_tx.send(GameEvent::AwaitingMove {
                player: player_name.clone(),
                mark,
                state,
            })?;

            debug!(player = %player_name, "Waiting for move");
            let Some(index) = self.player_mut(mark).choose(&state).await? else {
                self.state = skip_turn(&state)?;
                self.event_tx.send(GameEvent::Skipped {
                    player: player_name,
                    mark,
                })?;
                skips_in_a_row += 1;
                if skips_in_a_row == 2 {
                    warn!(moves, "Neither player can move");
                    self.event_tx.send(GameEvent::Stalled)?;
                    return Ok(self.state);
                }
                continue;
            };

            match try_apply_move(&state, index) {
                Ok(next) => {
                    self.state = next;
                    moves += 1;
                    skips_in_a_row = 0;
                    self.event_tx.send(GameEvent::MoveMade {
                        player: player_name,
                        index,
                        evicted: state.fading_cell(),
                        state: next,
                    })?;
                }
                Err(error) => {
                    self.event_tx.send(GameEvent::Rejected {
                        player: player_name,
                        index,
                        reason: error.to_string(),
                    })?;
                }
            }
        }
    }

    fn player(&self, mark: Mark) -> &dyn Player {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    fn player_mut(&mut self, mark: Mark) -> &mut Box<dyn Player> {
        match mark {
            Mark::X => &mut self.player_x,
            Mark::O => &mut self.player_o,
        }
    }
}
