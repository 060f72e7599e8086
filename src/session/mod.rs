//! Turn bookkeeping for the two ways of playing.
//!
//! Both sessions route every move through the engine's referee. They only
//! decide who may move and what happens to the resulting snapshot.

mod local;
mod multiplayer;

pub use local::{ComputerOutcome, LocalSession, SearchTicket};
pub use multiplayer::{MatchClient, MatchError, MatchSession};
