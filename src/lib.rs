//! Sliding Games library - sliding-window tic-tac-toe sessions
//!
//! Builds playable games on top of the `sliding_tictactoe` engine.
//!
//! # Architecture
//!
//! - **Sessions**: a human against the computer ([`LocalSession`]) and one
//!   seat of a two-player match ([`MatchSession`], [`MatchClient`])
//! - **Store**: shared match records ([`MatchStore`], [`InMemoryMatchStore`])
//! - **Sync**: conversion between engine state and record columns
//! - **Players**: computer participants driven by the [`Orchestrator`]
//! - **Input**: terminal lines read off the async runtime ([`stdin_lines`])
//!
//! # Example
//!
//! ```
//! use sliding_games::{LocalSession, ComputerOutcome};
//! use sliding_tictactoe::{Mark, SearchConfig};
//!
//! let mut session = LocalSession::new(Mark::X, SearchConfig::new(4));
//! session.play_human(4).unwrap();
//! let outcome = session.play_computer();
//! assert!(matches!(outcome, Some(ComputerOutcome::Played { .. })));
//! assert_eq!(session.status_text(), "Your turn");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod input;
mod logging;
mod orchestrator;
mod players;
mod session;
mod store;
mod sync;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, GameConfig};

// Crate-level exports - Logging
pub use logging::init_tracing;

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{ComputerPlayer, Player};

// Crate-level exports - Terminal input
pub use input::{PlayerInput, spawn_line_reader, stdin_lines};

// Crate-level exports - Sessions
pub use session::{
    ComputerOutcome, LocalSession, MatchClient, MatchError, MatchSession, SearchTicket,
};

// Crate-level exports - Match storage and sync
pub use store::{InMemoryMatchStore, MatchStore, StoreError, StoreErrorKind};
pub use sync::{
    MatchId, MatchRow, MatchStatus, StateColumns, SyncError, decode, encode, mark_column,
    parse_mark,
};
