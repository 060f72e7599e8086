//! A human against the computer on one machine.

use derive_getters::Getters;
use sliding_tictactoe::{
    GameState, Mark, MoveError, SearchConfig, best_move_with, reset, skip_turn,
    try_apply_move_as,
};
use tracing::{debug, info, instrument, warn};

/// Result of handing a finished search back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerOutcome {
    /// The move was played.
    Played {
        /// Cell the computer took.
        index: usize,
        /// State after the move.
        state: GameState,
    },
    /// The game changed while searching; the result was dropped.
    Stale,
    /// No empty cell to play; the turn passed to the human.
    NoMove,
    /// The referee refused the search result.
    Refused(MoveError),
}

/// A pending computer move.
///
/// Captures the state and the session generation at the time it was
/// issued. Results for an older generation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct SearchTicket {
    generation: u64,
    state: GameState,
    mark: Mark,
    config: SearchConfig,
}

impl SearchTicket {
    /// Runs the search. Blocking; call from a worker thread in async code.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn run(&self) -> Option<usize> {
        best_move_with(
            self.state.board(),
            self.state.history(),
            self.mark == Mark::X,
            self.config,
        )
    }
}

/// Local game against the computer.
#[derive(Debug, Clone, Getters)]
pub struct LocalSession {
    state: GameState,
    human: Mark,
    search: SearchConfig,
    /// Bumped by every change, so late search results can be recognized.
    generation: u64,
}

impl LocalSession {
    /// Starts a new game with the human playing `human`.
    #[instrument]
    pub fn new(human: Mark, search: SearchConfig) -> Self {
        info!(%human, depth = search.max_depth(), "Starting local session");
        Self {
            state: GameState::new(),
            human,
            search,
            generation: 0,
        }
    }

    /// Mark the computer plays.
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }

    /// Plays a human move.
    ///
    /// # Errors
    ///
    /// Refuses moves while the computer is to play, after a win, and on
    /// occupied or off-board cells. The state is unchanged on error.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play_human(&mut self, index: usize) -> Result<GameState, MoveError> {
        let next = try_apply_move_as(&self.state, self.human, index)?;
        self.advance(next);
        Ok(next)
    }

    /// Issues a search ticket when the computer is to move.
    pub fn computer_ticket(&self) -> Option<SearchTicket> {
        if self.state.is_over() || self.state.turn() != self.computer() {
            return None;
        }
        Some(SearchTicket {
            generation: self.generation,
            state: self.state,
            mark: self.computer(),
            config: self.search,
        })
    }

    /// Applies a search result, unless the game moved on since `ticket`.
    #[instrument(skip(self, ticket), fields(ticket = ticket.generation, current = self.generation))]
    pub fn finish_computer(
        &mut self,
        ticket: &SearchTicket,
        choice: Option<usize>,
    ) -> ComputerOutcome {
        if ticket.generation != self.generation {
            debug!("Discarding stale search result");
            return ComputerOutcome::Stale;
        }
        let Some(index) = choice else {
            warn!("Computer has no move");
            if let Ok(state) = skip_turn(&self.state) {
                self.advance(state);
            }
            return ComputerOutcome::NoMove;
        };
        match try_apply_move_as(&self.state, ticket.mark, index) {
            Ok(state) => {
                self.advance(state);
                ComputerOutcome::Played { index, state }
            }
            Err(error) => {
                warn!(index, %error, "Search result refused");
                ComputerOutcome::Refused(error)
            }
        }
    }

    /// Plays the computer's move synchronously.
    pub fn play_computer(&mut self) -> Option<ComputerOutcome> {
        let ticket = self.computer_ticket()?;
        let choice = ticket.run();
        Some(self.finish_computer(&ticket, choice))
    }

    /// Starts over. Any search in flight becomes stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameState {
        self.advance(reset());
        info!("Local game reset");
        self.state
    }

    /// Short status line for the player.
    pub fn status_text(&self) -> &'static str {
        match self.state.winner() {
            Some(winner) if winner == self.human => "You won!",
            Some(_) => "The computer won.",
            None if self.state.turn() == self.human => "Your turn",
            None => "Computer is thinking...",
        }
    }

    fn advance(&mut self, state: GameState) {
        self.state = state;
        self.generation += 1;
    }
}
