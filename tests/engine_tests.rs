//! Turn engine behavior over complete games.
//!
//! Every game here runs on a single replica with four AI clients attached,
//! so the engine's choice stream comes from the same place a real session's
//! would, just without the fan-out.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flying_chess::ai::StrategyKind;
use flying_chess::core::{Board, GameState, PieceId, PlayerId, SessionConfig, WinRule, SEATS};
use flying_chess::protocol::{
    choice_queue, ChoiceSender, EventLog, TurnEvent, TurnEventKind, TurnListener,
};
use flying_chess::rules::TurnEngine;

use common::{hot_seat, init_logging};

const MIXED: [StrategyKind; 4] = [
    StrategyKind::Heuristic,
    StrategyKind::Random,
    StrategyKind::Heuristic,
    StrategyKind::Random,
];

fn config(seed: &str) -> SessionConfig {
    SessionConfig::new(seed).with_max_turns(50_000)
}

#[tokio::test]
async fn test_same_seed_same_game() {
    init_logging();
    let mut a = hot_seat(config("replay"), MIXED);
    let mut b = hot_seat(config("replay"), MIXED);

    let outcome_a = a.play().await.unwrap();
    let outcome_b = b.play().await.unwrap();

    assert_eq!(outcome_a, outcome_b);
    assert_eq!(a.state().history, b.state().history);
    assert_eq!(
        a.state().snapshot().fingerprint().unwrap(),
        b.state().snapshot().fingerprint().unwrap()
    );
}

#[tokio::test]
async fn test_different_seeds_different_games() {
    init_logging();
    let mut a = hot_seat(config("alpha"), MIXED);
    let mut b = hot_seat(config("omega"), MIXED);

    a.play().await.unwrap();
    b.play().await.unwrap();

    assert_ne!(a.state().history, b.state().history);
}

#[tokio::test]
async fn test_finish_order_is_a_permutation() {
    init_logging();
    let mut engine = hot_seat(config("finish-order"), [StrategyKind::Heuristic; 4]);

    let outcome = engine.play().await.unwrap();

    let mut seen = outcome.order.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), SEATS, "every seat finishes exactly once");
    assert_eq!(outcome.winner(), Some(outcome.order[0]));
    assert_eq!(outcome.turns, engine.state().turn_number);

    let state = engine.state();
    for seat in PlayerId::all() {
        assert!(state.board.all_finished(seat));
    }
    let finishing: Vec<_> = state
        .history
        .iter()
        .filter(|record| record.finished)
        .map(|record| record.player)
        .collect();
    assert_eq!(finishing, outcome.order);
}

#[tokio::test]
async fn test_six_repeats_turn() {
    init_logging();
    let mut engine = hot_seat(config("sixes"), MIXED);
    engine.play().await.unwrap();

    let history: Vec<_> = engine.state().history.iter().cloned().collect();
    let mut finished = [false; SEATS];
    for pair in history.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.finished {
            finished[prev.player.index()] = true;
        }
        if prev.roll.is_six() && !prev.finished {
            assert_eq!(next.player, prev.player, "six keeps the seat at turn {}", prev.turn);
        } else {
            let mut expected = prev.player.next();
            while finished[expected.index()] {
                expected = expected.next();
            }
            assert_eq!(next.player, expected, "turn passes on after turn {}", prev.turn);
        }
        assert_eq!(next.turn, prev.turn + 1);
    }
}

#[tokio::test]
async fn test_no_one_evicts_an_ally() {
    init_logging();
    let config = config("alliances").with_opposite_teams();
    let mut engine = hot_seat(config.clone(), MIXED);
    engine.play().await.unwrap();

    let mut evictions = 0;
    for record in engine.state().history.iter() {
        for eviction in &record.evictions {
            evictions += 1;
            assert_ne!(eviction.player, record.player);
            assert!(!config.allied(eviction.player, record.player));
        }
        if record.piece.is_none() {
            assert!(record.evictions.is_empty());
        }
    }
    assert!(evictions > 0, "a full game should see at least one capture");
}

#[tokio::test]
async fn test_first_alliance_ends_early() {
    init_logging();
    let config = config("first-alliance")
        .with_opposite_teams()
        .with_win_rule(WinRule::FirstAlliance);
    let mut engine = hot_seat(config.clone(), MIXED);

    let outcome = engine.play().await.unwrap();

    assert_eq!(outcome.winners.len(), 2);
    assert!(config.allied(outcome.winners[0], outcome.winners[1]));
    for &seat in &outcome.winners {
        assert!(engine.state().is_finished(seat));
    }
    assert!(outcome.order.len() < SEATS, "losing alliance cannot have finished both seats");
}

#[tokio::test]
async fn test_events_alternate_per_turn() {
    init_logging();
    let mut engine = hot_seat(config("events"), MIXED);
    let log = Arc::new(EventLog::new());
    engine.subscribe(log.clone());

    engine.play().await.unwrap();

    let events = log.events();
    assert_eq!(events.len() as u64, 2 * engine.state().turn_number);
    for pair in events.chunks(2) {
        assert_eq!(pair[0].kind, TurnEventKind::Start);
        assert_eq!(pair[1], TurnEvent::end(pair[0].player));
    }
}

/// Answers the first Start with a piece that can never move, then plays
/// the first movable piece.
struct Stubborn {
    tx: ChoiceSender,
    starts: Mutex<u32>,
}

#[async_trait]
impl TurnListener for Stubborn {
    async fn on_event(&self, event: TurnEvent, state: &GameState) {
        if !event.is_start() {
            return;
        }
        let mut starts = self.starts.lock().unwrap();
        *starts += 1;
        let movable = state.board.movable(event.player, state.roll);
        let choice = if *starts == 1 {
            PieceId::new(1)
        } else {
            movable.first().copied().unwrap_or_default()
        };
        self.tx.push(choice);
    }
}

#[tokio::test]
async fn test_illegal_choice_is_asked_again() {
    init_logging();
    let (tx, queue) = choice_queue();
    let mut state = GameState::from_seed("stubborn");
    // Piece 1 has finished and can never be moved.
    state.board = Board::from_raw([[10, 56, -1, -1], [-1; 4], [-1; 4], [-1; 4]]);
    let mut engine = TurnEngine::with_state(SessionConfig::default(), state, queue);

    let stubborn = Arc::new(Stubborn {
        tx,
        starts: Mutex::new(0),
    });
    let log = Arc::new(EventLog::new());
    engine.subscribe(stubborn.clone());
    engine.subscribe(log.clone());

    engine.play_turn().await.unwrap();

    let player = PlayerId::new(0);
    assert_eq!(
        log.events(),
        vec![TurnEvent::start(player), TurnEvent::start(player), TurnEvent::end(player)]
    );
    let record = engine.state().last_move().unwrap();
    assert_eq!(record.piece, Some(PieceId::new(0)));
    assert_eq!(engine.state().history.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_step_delay_paces_moves() {
    init_logging();
    let config = config("paced").with_step_delay(Duration::from_millis(250));
    let mut engine = hot_seat(config, MIXED);

    let started = tokio::time::Instant::now();
    let outcome = engine.play().await.unwrap();

    let multi_step = engine
        .state()
        .history
        .iter()
        .filter(|record| record.steps.len() > 1)
        .count() as u32;
    assert!(multi_step > 0);
    assert!(started.elapsed() >= Duration::from_millis(250) * multi_step);
    assert_eq!(outcome.order.len(), SEATS);
}
