//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use flying_chess::ai::StrategyKind;
use flying_chess::core::{GameRng, PlayerId, SessionConfig};
use flying_chess::protocol::{choice_queue, AiNegotiator, ChoiceRelay, Client};
use flying_chess::rules::TurnEngine;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A single replica with all four seats played by AI clients attached to it.
pub fn hot_seat(config: SessionConfig, kinds: [StrategyKind; 4]) -> TurnEngine {
    let (tx, queue) = choice_queue();
    let relay = ChoiceRelay::single(tx);
    let base = GameRng::from_seed_str(&config.seed);

    let mut engine = TurnEngine::new(config, queue);
    for seat in PlayerId::all() {
        let strategy = kinds[seat.index()].build(base.for_context(&format!("ai-{}", seat.index())));
        let negotiator = Arc::new(AiNegotiator::new(strategy));
        engine.subscribe(Arc::new(Client::new(seat, negotiator, relay.clone())));
    }
    engine
}
