//! One seat of a two-player match backed by a [`MatchStore`].
//!
//! The store decides what the game looks like. A client computes its own
//! move locally, shows it right away and publishes the snapshot; whatever
//! arrives from the store afterwards replaces the local copy wholesale.

use crate::store::{MatchStore, StoreError};
use crate::sync::{MatchId, MatchRow, MatchStatus, StateColumns, SyncError, encode};
use derive_getters::Getters;
use sliding_tictactoe::{GameState, Mark, MoveError, reset, try_apply_move_as};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Local view of a match from one seat.
#[derive(Debug, Clone, Getters)]
pub struct MatchSession {
    match_id: MatchId,
    seat: Mark,
    status: MatchStatus,
    opponent_name: Option<String>,
    state: GameState,
}

impl MatchSession {
    /// Builds a session for `seat` from a store record.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the record's game columns are malformed.
    #[instrument(skip(row), fields(match_id = %row.id))]
    pub fn from_row(seat: Mark, row: &MatchRow) -> Result<Self, SyncError> {
        let state = row.game_state()?;
        Ok(Self {
            match_id: row.id.clone(),
            seat,
            status: row.status,
            opponent_name: opponent_name(seat, row),
            state,
        })
    }

    /// Whether this seat may move now.
    pub fn is_my_turn(&self) -> bool {
        self.status == MatchStatus::Active
            && !self.state.is_over()
            && self.state.turn() == self.seat
    }

    /// Applies this seat's move to the local copy and returns the snapshot
    /// to publish.
    ///
    /// # Errors
    ///
    /// Returns the referee's refusal; [`MoveError::NotYourTurn`] is the
    /// advisory shown when the other player is to move, and while the
    /// match is waiting for O or abandoned.
    #[instrument(skip(self), fields(match_id = %self.match_id, seat = %self.seat))]
    pub fn play(&mut self, index: usize) -> Result<StateColumns, MoveError> {
        match self.status {
            MatchStatus::Active => {}
            // The referee reports the finished game.
            MatchStatus::Finished if self.state.is_over() => {}
            status => {
                debug!(%status, "Match is not accepting moves");
                return Err(MoveError::NotYourTurn(self.seat));
            }
        }
        let next = try_apply_move_as(&self.state, self.seat, index)?;
        self.state = next;
        Ok(encode(&next))
    }

    /// Replaces the local copy with a record from the store.
    ///
    /// # Errors
    ///
    /// A malformed record is refused and the local copy kept.
    #[instrument(skip(self, row), fields(match_id = %self.match_id))]
    pub fn apply_remote(&mut self, row: &MatchRow) -> Result<(), SyncError> {
        if row.id != self.match_id {
            return Err(SyncError::new(format!(
                "Update for match {} delivered to match {}",
                row.id, self.match_id
            )));
        }
        let state = row.game_state()?;
        self.state = state;
        self.status = row.status;
        self.opponent_name = opponent_name(self.seat, row);
        debug!(status = %row.status, turn = %state.turn(), "Applied remote snapshot");
        Ok(())
    }

    /// Resets the local copy and returns the snapshot to publish.
    pub fn reset(&mut self) -> StateColumns {
        self.state = reset();
        encode(&self.state)
    }

    /// Short status line for the player.
    pub fn status_text(&self) -> String {
        match (self.status, self.state.winner()) {
            (MatchStatus::Waiting, _) => "Waiting for an opponent to join".to_string(),
            (MatchStatus::Abandoned, _) => "Your opponent left the match".to_string(),
            (_, Some(winner)) if winner == self.seat => "You won!".to_string(),
            (_, Some(winner)) => format!("{} won.", winner),
            (_, None) if self.state.turn() == self.seat => "Your turn".to_string(),
            (_, None) => format!("Waiting for {} to move", self.state.turn()),
        }
    }
}

fn opponent_name(seat: Mark, row: &MatchRow) -> Option<String> {
    match seat {
        Mark::X => row.player_o_name.clone(),
        Mark::O => row.player_x_name.clone(),
    }
}

/// A [`MatchSession`] wired to a store and its update stream.
pub struct MatchClient {
    store: Arc<dyn MatchStore>,
    session: MatchSession,
    updates: broadcast::Receiver<MatchRow>,
}

/// Errors from a networked move.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MatchError {
    /// The referee refused the move locally.
    #[display("{}", _0)]
    Move(MoveError),
    /// The store refused the request.
    #[display("{}", _0)]
    Store(StoreError),
    /// A record could not be decoded.
    #[display("{}", _0)]
    Sync(SyncError),
}

impl MatchClient {
    /// Creates a match and takes the X seat.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank.
    #[instrument(skip(store))]
    pub async fn create(
        store: Arc<dyn MatchStore>,
        player_name: &str,
    ) -> Result<Self, MatchError> {
        let row = store.create_match(player_name).await?;
        Self::attach(store, Mark::X, &row).await
    }

    /// Joins an existing match in the O seat.
    ///
    /// # Errors
    ///
    /// Fails for blank names, unknown room codes and full matches.
    #[instrument(skip(store))]
    pub async fn join(
        store: Arc<dyn MatchStore>,
        match_id: &str,
        player_name: &str,
    ) -> Result<Self, MatchError> {
        let row = store.join_match(match_id, player_name).await?;
        Self::attach(store, Mark::O, &row).await
    }

    async fn attach(
        store: Arc<dyn MatchStore>,
        seat: Mark,
        row: &MatchRow,
    ) -> Result<Self, MatchError> {
        let updates = store.subscribe(&row.id).await?;
        let session = MatchSession::from_row(seat, row)?;
        info!(match_id = %row.id, %seat, "Attached to match");
        Ok(Self {
            store,
            session,
            updates,
        })
    }

    /// The local view.
    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    /// Plays a move optimistically and publishes it.
    ///
    /// If the store refuses the snapshot the local copy is rolled back.
    ///
    /// # Errors
    ///
    /// [`MatchError::Move`] for refused moves, [`MatchError::Store`] when
    /// publishing fails.
    #[instrument(skip(self), fields(match_id = %self.session.match_id))]
    pub async fn play(&mut self, index: usize) -> Result<GameState, MatchError> {
        let before = self.session.state;
        let columns = self.session.play(index)?;
        match self.store.publish(&self.session.match_id, columns).await {
            Ok(_) => Ok(self.session.state),
            Err(error) => {
                warn!(%error, "Publish failed, rolling back");
                self.session.state = before;
                Err(error.into())
            }
        }
    }

    /// Publishes a fresh game.
    ///
    /// # Errors
    ///
    /// Returns the store's refusal.
    #[instrument(skip(self), fields(match_id = %self.session.match_id))]
    pub async fn reset(&mut self) -> Result<GameState, MatchError> {
        let columns = self.session.reset();
        let row = self.store.publish(&self.session.match_id, columns).await?;
        self.session.apply_remote(&row)?;
        Ok(self.session.state)
    }

    /// Leaves the match.
    ///
    /// # Errors
    ///
    /// Returns the store's refusal.
    pub async fn leave(&mut self) -> Result<(), MatchError> {
        let row = self.store.abandon(&self.session.match_id).await?;
        self.session.apply_remote(&row)?;
        Ok(())
    }

    /// Applies every update already delivered. Returns how many were applied.
    ///
    /// Malformed records are skipped.
    #[instrument(skip(self), fields(match_id = %self.session.match_id))]
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.updates.try_recv() {
                Ok(row) => {
                    if self.apply(&row) {
                        applied += 1;
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed updates, waiting for the next snapshot");
                }
                Err(_) => return applied,
            }
        }
    }

    /// Waits for the next update and applies it.
    ///
    /// Returns `None` once the store drops the match.
    pub async fn next_update(&mut self) -> Option<GameState> {
        loop {
            match self.updates.recv().await {
                Ok(row) => {
                    if self.apply(&row) {
                        return Some(self.session.state);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed updates, waiting for the next snapshot");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn apply(&mut self, row: &MatchRow) -> bool {
        match self.session.apply_remote(row) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "Ignoring malformed update");
                false
            }
        }
    }
}
