//! Tests for the orchestrated game loop.

use anyhow::Result;
use sliding_games::{ComputerPlayer, GameEvent, Orchestrator, Player};
use sliding_tictactoe::{GameState, Mark, SearchConfig};
use tokio::sync::mpsc;

/// Plays a fixed list of cells, then skips.
struct Scripted {
    name: String,
    moves: Vec<usize>,
}

impl Scripted {
    fn new(name: &str, moves: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.iter().rev().copied().collect(),
        }
    }
}

#[async_trait::async_trait]
impl Player for Scripted {
    async fn choose(&mut self, _state: &GameState) -> Result<Option<usize>> {
        Ok(self.moves.pop())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_scripted_game_reports_win() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(Scripted::new("Ann", &[0, 1, 2])),
        Box::new(Scripted::new("Bo", &[3, 4])),
        tx,
    );

    let state = orchestrator.run().await.unwrap();
    assert_eq!(state.winner(), Some(Mark::X));

    let events = drain(&mut rx);
    let moves = events
        .iter()
        .filter(|event| matches!(event, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, 5);
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            winner: "Ann".to_string(),
            mark: Mark::X,
        })
    );
}

#[tokio::test]
async fn test_rejected_move_asks_same_player_again() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(Scripted::new("Ann", &[4, 0])),
        // 4 is taken; the retry takes 8, then both scripts run out.
        Box::new(Scripted::new("Bo", &[4, 8])),
        tx,
    );

    let state = orchestrator.run().await.unwrap();
    assert_eq!(state.history().to_vec(), vec![4, 8, 0]);

    let events = drain(&mut rx);
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::Rejected { player, index: 4, .. } if player == "Bo"
    )));
    let tail = &events[events.len() - 5..];
    assert!(matches!(
        tail,
        [
            GameEvent::AwaitingMove { .. },
            GameEvent::Skipped { player, mark: Mark::O },
            GameEvent::AwaitingMove { .. },
            GameEvent::Skipped { .. },
            GameEvent::Stalled,
        ] if player == "Bo"
    ));
}

#[tokio::test]
async fn test_eviction_reported_on_seventh_move() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(Scripted::new("Ann", &[0, 2, 3, 7])),
        Box::new(Scripted::new("Bo", &[1, 4, 5])),
        tx,
    );

    let state = orchestrator.run().await.unwrap();
    assert_eq!(state.history().to_vec(), vec![1, 2, 4, 3, 5, 7]);

    let evictions: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::MoveMade { evicted, .. } => Some(evicted),
            _ => None,
        })
        .collect();
    assert_eq!(evictions, vec![None, None, None, None, None, None, Some(0)]);
}

#[tokio::test]
async fn test_computer_without_move_passes_turn() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        // X has nothing after its first move; O keeps playing.
        Box::new(Scripted::new("Ann", &[4])),
        Box::new(Scripted::new("Bo", &[0, 1, 2])),
        tx,
    );

    let state = orchestrator.run().await.unwrap();
    assert_eq!(state.winner(), Some(Mark::O));
    assert_eq!(state.history().to_vec(), vec![4, 0, 1, 2]);

    let events = drain(&mut rx);
    let skips: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Skipped { player, mark } => Some((player.as_str(), *mark)),
            _ => None,
        })
        .collect();
    assert_eq!(skips, vec![("Ann", Mark::X), ("Ann", Mark::X)]);
    assert!(!events.contains(&GameEvent::Stalled));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            winner: "Bo".to_string(),
            mark: Mark::O,
        })
    );
}

#[tokio::test]
async fn test_two_skips_in_a_row_stall() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(Scripted::new("Ann", &[])),
        Box::new(Scripted::new("Bo", &[])),
        tx,
    );

    let state = orchestrator.run().await.unwrap();
    assert!(state.history().is_empty());
    assert_eq!(state.winner(), None);
    assert_eq!(drain(&mut rx).last(), Some(&GameEvent::Stalled));
}

#[tokio::test]
async fn test_computers_stop_at_move_limit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(ComputerPlayer::new(
            "X".to_string(),
            Mark::X,
            SearchConfig::new(2),
        )),
        Box::new(ComputerPlayer::new(
            "O".to_string(),
            Mark::O,
            SearchConfig::new(2),
        )),
        tx,
    )
    .with_move_limit(3);

    let state = orchestrator.run().await.unwrap();
    assert_eq!(state.history().len(), 3);
    assert_eq!(
        drain(&mut rx).last(),
        Some(&GameEvent::MoveLimitReached { moves: 3 })
    );
}
