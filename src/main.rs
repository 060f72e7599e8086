//! Sliding Games - Unified CLI
//!
//! Local games against the computer, two-player duels, computer
//! self-play and move hints.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use sliding_games::{
    ComputerOutcome, ComputerPlayer, GameConfig, GameEvent, InMemoryMatchStore, LocalSession,
    MatchClient, MatchRow, MatchStore, Orchestrator, PlayerInput, init_tracing, stdin_lines,
};
use sliding_tictactoe::{GameState, Mark, SearchConfig, analyze};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)?;
    init_tracing(config.log_filter());

    match cli.command {
        Command::Local { mark, depth } => {
            let mut config = config;
            if let Some(mark) = mark {
                config = config.with_human_mark(mark);
            }
            if let Some(depth) = depth {
                config = config.with_search_depth(depth);
            }
            run_local(config).await
        }
        Command::Duel { x_name, o_name } => run_duel(x_name, o_name).await,
        Command::Watch {
            x_depth,
            o_depth,
            moves,
        } => run_watch(SearchConfig::new(x_depth), SearchConfig::new(o_depth), moves).await,
        Command::Suggest { file, depth } => {
            let search = depth.map_or_else(|| config.search(), SearchConfig::new);
            run_suggest(file, search).await
        }
    }
}

/// Board plus a note on which piece vanishes next.
fn render(state: &GameState) -> String {
    match state.fading_cell() {
        Some(index) if !state.is_over() => {
            format!("{}\n(cell {} vanishes on the next move)", state.board(), index + 1)
        }
        _ => state.board().to_string(),
    }
}

fn prompt(text: &str) {
    print!("{}", text);
    // A failed flush only delays the prompt.
    std::io::stdout().flush().ok();
}

fn announce_eviction(evicted: Option<usize>) {
    if let Some(cell) = evicted {
        println!("Cell {} vanished.", cell + 1);
    }
}

/// Human against the computer.
///
/// The search runs on a blocking worker while input keeps arriving, so a
/// reset during the search makes its result stale.
#[instrument(skip(config))]
async fn run_local(config: GameConfig) -> Result<()> {
    info!(human = %config.human_mark(), depth = config.search_depth(), "Starting local game");

    let mut session = LocalSession::new(*config.human_mark(), config.search());
    let mut input = stdin_lines();
    println!(
        "{} plays {}. Enter 1-9 to move, r to restart, q to quit.",
        config.player_name(),
        session.human()
    );

    loop {
        let state = *session.state();
        println!("\n{}\n{}", render(&state), session.status_text());

        if let Some(ticket) = session.computer_ticket() {
            let mut search = tokio::task::spawn_blocking(move || ticket.run());
            let choice = loop {
                tokio::select! {
                    choice = &mut search => break choice?,
                    line = input.recv() => match line.as_deref().map(PlayerInput::parse) {
                        None | Some(Some(PlayerInput::Quit)) => return Ok(()),
                        Some(Some(PlayerInput::Reset)) => {
                            session.reset();
                            println!("Restarting once the computer stops thinking.");
                        }
                        Some(_) => println!("Wait for the computer to move."),
                    },
                }
            };

            match session.finish_computer(&ticket, choice) {
                ComputerOutcome::Played { index, .. } => {
                    announce_eviction(state.fading_cell());
                    println!("Computer took cell {}.", index + 1);
                }
                ComputerOutcome::Stale => debug!("Dropped search for an old position"),
                ComputerOutcome::NoMove => println!("The computer has no move and passes."),
                ComputerOutcome::Refused(error) => {
                    anyhow::bail!("Computer move refused: {}", error)
                }
            }
            continue;
        }

        if state.is_over() {
            prompt("r to play again, q to quit: ");
        } else {
            prompt("Your move [1-9]: ");
        }
        let Some(line) = input.recv().await else {
            break;
        };
        match PlayerInput::parse(&line) {
            Some(PlayerInput::Cell(index)) => match session.play_human(index) {
                Ok(_) => announce_eviction(state.fading_cell()),
                Err(error) => println!("{}", error),
            },
            Some(PlayerInput::Reset) => {
                session.reset();
            }
            Some(PlayerInput::Quit) => break,
            None => println!("Invalid input! Try again."),
        }
    }
    Ok(())
}

/// Two people on one terminal, each seat a separate store client.
#[instrument]
async fn run_duel(x_name: String, o_name: String) -> Result<()> {
    let store: Arc<dyn MatchStore> = Arc::new(InMemoryMatchStore::new());
    let mut host = MatchClient::create(store.clone(), &x_name).await?;
    let room = host.session().match_id().clone();
    let mut guest = MatchClient::join(store, &room, &o_name).await?;
    host.drain_updates();
    guest.drain_updates();
    println!("Room {}: {} (X) vs {} (O)", room, x_name, o_name);

    let mut input = stdin_lines();
    loop {
        let state = *host.session().state();
        println!("\n{}\n", render(&state));

        if let Some(winner) = state.winner() {
            let name = if winner == Mark::X { &x_name } else { &o_name };
            println!("{} wins!", name);
            prompt("r to play again, anything else to quit: ");
            let again = input.recv().await;
            if again.as_deref().and_then(PlayerInput::parse) == Some(PlayerInput::Reset) {
                host.reset().await?;
            } else {
                host.leave().await?;
                break;
            }
        } else {
            let (client, name) = match state.turn() {
                Mark::X => (&mut host, &x_name),
                Mark::O => (&mut guest, &o_name),
            };
            prompt(&format!("{} ({}) [1-9, r to restart, q to quit]: ", name, state.turn()));
            let Some(line) = input.recv().await else {
                break;
            };
            match PlayerInput::parse(&line) {
                Some(PlayerInput::Cell(index)) => {
                    if let Err(error) = client.play(index).await {
                        warn!(%error, "Move refused");
                        println!("{}", error);
                    }
                }
                Some(PlayerInput::Reset) => {
                    client.reset().await?;
                }
                Some(PlayerInput::Quit) => {
                    client.leave().await?;
                    println!("{} left the match.", name);
                    break;
                }
                None => println!("Invalid input! Try again."),
            }
        }

        host.drain_updates();
        guest.drain_updates();
    }
    Ok(())
}

/// The computer against itself, one search depth per side.
#[instrument]
async fn run_watch(x_search: SearchConfig, o_search: SearchConfig, moves: usize) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::AwaitingMove { player, .. } => debug!(%player, "Thinking"),
                GameEvent::MoveMade {
                    player,
                    index,
                    evicted,
                    state,
                } => {
                    announce_eviction(evicted);
                    println!("{} took cell {}.\n{}\n", player, index + 1, state.board());
                }
                GameEvent::Rejected { player, reason, .. } => println!("{}: {}", player, reason),
                GameEvent::Skipped { player, .. } => println!("{} has no move and passes.", player),
                GameEvent::Stalled => println!("Neither side can move."),
                GameEvent::MoveLimitReached { moves } => {
                    println!("No winner after {} moves.", moves)
                }
                GameEvent::GameOver { winner, mark } => println!("{} ({}) wins!", winner, mark),
            }
        }
    });

    let player_x = ComputerPlayer::new(
        format!("Computer X (depth {})", x_search.max_depth()),
        Mark::X,
        x_search,
    );
    let player_o = ComputerPlayer::new(
        format!("Computer O (depth {})", o_search.max_depth()),
        Mark::O,
        o_search,
    );
    let mut orchestrator =
        Orchestrator::new(Box::new(player_x), Box::new(player_o), event_tx).with_move_limit(moves);
    orchestrator.run().await?;
    drop(orchestrator);
    printer.await?;
    Ok(())
}

/// Reads a match record and prints the computer's analysis as JSON.
#[instrument]
async fn run_suggest(file: Option<PathBuf>, search: SearchConfig) -> Result<()> {
    let json = match &file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    let row: MatchRow = serde_json::from_str(&json).context("Invalid match record")?;
    let state = row.game_state()?;
    if let Some(winner) = state.winner() {
        anyhow::bail!("Game is already over, {} won", winner);
    }

    let analysis = analyze(
        state.board(),
        state.history(),
        state.turn() == Mark::X,
        search,
    );
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
