//! Shared storage for two-player matches.
//!
//! The store is the single source of truth: clients publish full
//! snapshots and receive every accepted snapshot back through a
//! subscription, their own included.

use crate::sync::{MatchId, MatchRow, MatchStatus, StateColumns, encode};
use async_trait::async_trait;
use derive_more::{Display, Error};
use sliding_tictactoe::GameState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, instrument, warn};

/// Updates buffered per subscriber before the slowest one starts lagging.
const UPDATE_BUFFER: usize = 32;

/// Storage backend for match records.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Creates a match with `player_x_name` in the X seat.
    async fn create_match(&self, player_x_name: &str) -> Result<MatchRow, StoreError>;

    /// Seats `player_o_name` as O and activates the match.
    async fn join_match(&self, id: &str, player_o_name: &str) -> Result<MatchRow, StoreError>;

    /// Returns the current record.
    async fn fetch(&self, id: &str) -> Result<MatchRow, StoreError>;

    /// Replaces the game columns and notifies subscribers.
    async fn publish(&self, id: &str, state: StateColumns) -> Result<MatchRow, StoreError>;

    /// Marks the match abandoned.
    async fn abandon(&self, id: &str) -> Result<MatchRow, StoreError>;

    /// Receives every record accepted after this call.
    async fn subscribe(&self, id: &str) -> Result<broadcast::Receiver<MatchRow>, StoreError>;
}

/// Why a store operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StoreErrorKind {
    /// A blank player name.
    #[display("Your name is required to play")]
    NameRequired,
    /// No match has this id.
    #[display("The room code is invalid")]
    InvalidRoomCode,
    /// Both seats are taken.
    #[display("This match already has two players")]
    MatchFull,
    /// The match was abandoned and takes no more updates.
    #[display("This match has been abandoned")]
    MatchAbandoned,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", kind, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub kind: StoreErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: StoreErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Message suitable for showing to a player.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}

struct MatchEntry {
    row: MatchRow,
    updates: broadcast::Sender<MatchRow>,
}

impl MatchEntry {
    fn notify(&self) {
        // No subscribers is fine.
        let receivers = self.updates.send(self.row.clone()).unwrap_or(0);
        debug!(match_id = %self.row.id, receivers, "Published update");
    }
}

#[derive(Default)]
struct StoreInner {
    matches: HashMap<MatchId, MatchEntry>,
    created: u32,
}

/// Process-local [`MatchStore`].
///
/// Clones share the same matches.
#[derive(Clone, Default)]
pub struct InMemoryMatchStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryMatchStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory match store");
        Self::default()
    }
}

/// Six uppercase characters derived from a counter.
fn room_code(counter: u32) -> MatchId {
    const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    // Spread consecutive counters over the code space.
    let mut value = counter.wrapping_mul(2_654_435_761) ^ 0x5A5A_5A5A;
    (0..6)
        .map(|_| {
            let c = ALPHABET[(value % 32) as usize] as char;
            value /= 32;
            c
        })
        .collect()
}

#[track_caller]
fn require_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::new(StoreErrorKind::NameRequired));
    }
    Ok(name.to_string())
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    #[instrument(skip(self))]
    async fn create_match(&self, player_x_name: &str) -> Result<MatchRow, StoreError> {
        let player_x_name = require_name(player_x_name)?;
        let mut inner = self.inner.lock().await;

        let id = loop {
            inner.created = inner.created.wrapping_add(1);
            let id = room_code(inner.created);
            if !inner.matches.contains_key(&id) {
                break id;
            }
        };
        let row = MatchRow {
            id: id.clone(),
            player_x_name: Some(player_x_name),
            player_o_name: None,
            status: MatchStatus::Waiting,
            state: encode(&GameState::new()),
        };
        let (updates, _) = broadcast::channel(UPDATE_BUFFER);
        inner.matches.insert(
            id.clone(),
            MatchEntry {
                row: row.clone(),
                updates,
            },
        );

        info!(match_id = %id, "Match created");
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn join_match(&self, id: &str, player_o_name: &str) -> Result<MatchRow, StoreError> {
        let player_o_name = require_name(player_o_name)?;
        let mut inner = self.inner.lock().await;
        let entry = inner
            .matches
            .get_mut(id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::InvalidRoomCode))?;

        match entry.row.status {
            MatchStatus::Abandoned => {
                return Err(StoreError::new(StoreErrorKind::MatchAbandoned));
            }
            _ if entry.row.player_o_name.is_some() => {
                warn!(match_id = id, "Join attempt on a full match");
                return Err(StoreError::new(StoreErrorKind::MatchFull));
            }
            _ => {}
        }

        entry.row.player_o_name = Some(player_o_name);
        entry.row.status = MatchStatus::Active;
        entry.notify();

        info!(match_id = id, "Player joined as O");
        Ok(entry.row.clone())
    }

    #[instrument(skip(self))]
    async fn fetch(&self, id: &str) -> Result<MatchRow, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .matches
            .get(id)
            .map(|entry| entry.row.clone())
            .ok_or_else(|| StoreError::new(StoreErrorKind::InvalidRoomCode))
    }

    #[instrument(skip(self, state), fields(turn = %state.turn))]
    async fn publish(&self, id: &str, state: StateColumns) -> Result<MatchRow, StoreError> {
        let mut inner = self.inner.lock().await;
        let entry = inner
            .matches
            .get_mut(id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::InvalidRoomCode))?;

        if entry.row.status == MatchStatus::Abandoned {
            return Err(StoreError::new(StoreErrorKind::MatchAbandoned));
        }

        entry.row.status = if state.winner.is_some() {
            MatchStatus::Finished
        } else if entry.row.player_o_name.is_some() {
            MatchStatus::Active
        } else {
            MatchStatus::Waiting
        };
        entry.row.state = state;
        entry.notify();

        debug!(match_id = id, status = %entry.row.status, "Snapshot stored");
        Ok(entry.row.clone())
    }

    #[instrument(skip(self))]
    async fn abandon(&self, id: &str) -> Result<MatchRow, StoreError> {
        let mut inner = self.inner.lock().await;
        let entry = inner
            .matches
            .get_mut(id)
            .ok_or_else(|| StoreError::new(StoreErrorKind::InvalidRoomCode))?;

        entry.row.status = MatchStatus::Abandoned;
        entry.notify();

        info!(match_id = id, "Match abandoned");
        Ok(entry.row.clone())
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, id: &str) -> Result<broadcast::Receiver<MatchRow>, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .matches
            .get(id)
            .map(|entry| entry.updates.subscribe())
            .ok_or_else(|| StoreError::new(StoreErrorKind::InvalidRoomCode))
    }
}
