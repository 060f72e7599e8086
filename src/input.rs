//! Terminal input.

use sliding_tictactoe::CELL_COUNT;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Take a cell, 0-8.
    Cell(usize),
    /// Start the game over.
    Reset,
    /// Leave the game.
    Quit,
}

impl PlayerInput {
    /// Parses `1`-`9` (as shown on the board), `r`/`reset` or `q`/`quit`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Some(Self::Quit);
        }
        if line.eq_ignore_ascii_case("r") || line.eq_ignore_ascii_case("reset") {
            return Some(Self::Reset);
        }
        match line.parse::<usize>() {
            Ok(number @ 1..=CELL_COUNT) => Some(Self::Cell(number - 1)),
            _ => None,
        }
    }
}

/// Forwards lines from `reader` on a dedicated thread.
///
/// The channel closes at end of input or on a read error. The thread
/// blocks in `read_line` and is never joined, so it does not hold up
/// runtime shutdown.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        debug!("Input receiver dropped");
                        return;
                    }
                }
                Err(error) => {
                    warn!(%error, "Failed to read input");
                    return;
                }
            }
        }
        debug!("End of input");
    });
    rx
}

/// Forwards stdin lines on a dedicated thread. See [`spawn_line_reader`].
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
}
