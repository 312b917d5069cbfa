//! Negotiators: who decides which piece a seat moves.
//!
//! A negotiator has one job: given the turn that just started for its seat,
//! produce a piece. The engine validates the answer; an illegal piece is
//! simply asked for again.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashSet;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::ai::{BoardQuery, Strategy};
use crate::core::{GameState, PieceId, PlayerId, Roll};

/// The turn a negotiator is asked to decide.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    /// The acting seat (the negotiator's own seat).
    pub seat: PlayerId,
    pub roll: Roll,
    pub state: &'a GameState,
}

impl<'a> TurnContext<'a> {
    #[must_use]
    pub fn new(seat: PlayerId, state: &'a GameState) -> Self {
        Self {
            seat,
            roll: state.roll,
            state,
        }
    }

    /// Pieces the engine will accept.
    #[must_use]
    pub fn movable(&self) -> Vec<PieceId> {
        self.state.board.movable(self.seat, self.roll)
    }

    /// Board view framed on the acting seat.
    #[must_use]
    pub fn query(&self) -> BoardQuery<'a> {
        BoardQuery::new(&self.state.board, self.seat)
    }
}

/// Produces a choice for a started turn.
#[async_trait]
pub trait Negotiator: Send + Sync {
    async fn decide(&self, turn: &TurnContext<'_>) -> PieceId;
}

/// Negotiator backed by an AI strategy. Decides immediately.
pub struct AiNegotiator {
    strategy: Box<dyn Strategy>,
}

impl AiNegotiator {
    #[must_use]
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}

impl std::fmt::Debug for AiNegotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiNegotiator")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

#[async_trait]
impl Negotiator for AiNegotiator {
    async fn decide(&self, turn: &TurnContext<'_>) -> PieceId {
        let choice = self.strategy.choose(turn.roll, &turn.query());
        debug!(seat = %turn.seat, roll = %turn.roll, %choice, strategy = self.strategy.name(), "ai decided");
        choice
    }
}

/// Choice that needs no input: nothing movable, a single candidate, or
/// several candidates that all stand on the same tile.
#[must_use]
pub fn forced_choice(turn: &TurnContext<'_>) -> Option<PieceId> {
    let movable = turn.movable();
    let Some(&first) = movable.first() else {
        return Some(PieceId::default());
    };
    let tiles: FxHashSet<_> = movable
        .iter()
        .map(|&piece| turn.state.board.get(turn.seat, piece))
        .collect();
    (tiles.len() == 1).then_some(first)
}

/// Single-slot rendezvous between a waiting negotiator and the input entry
/// point.
#[derive(Debug, Default)]
struct Rendezvous {
    slot: Mutex<Option<oneshot::Sender<PieceId>>>,
}

impl Rendezvous {
    fn park(&self) -> oneshot::Receiver<PieceId> {
        let (tx, rx) = oneshot::channel();
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        rx
    }

    fn fill(&self, piece: PieceId) -> bool {
        let pending = self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        match pending {
            Some(tx) => tx.send(piece).is_ok(),
            None => false,
        }
    }

    fn clear(&self) {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    fn is_waiting(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Input entry point for a human-controlled seat.
#[derive(Clone, Debug)]
pub struct HumanInput {
    rendezvous: Arc<Rendezvous>,
}

impl HumanInput {
    /// Supply the piece for the outstanding decision.
    ///
    /// Returns false (and does nothing) when no decision is outstanding.
    pub fn choose(&self, piece: PieceId) -> bool {
        self.rendezvous.fill(piece)
    }

    /// True while a decision is waiting for input.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.rendezvous.is_waiting()
    }
}

/// Negotiator that waits for a person, unless the choice is forced.
#[derive(Debug, Default)]
pub struct HumanNegotiator {
    rendezvous: Arc<Rendezvous>,
    timeout: Option<Duration>,
}

impl HumanNegotiator {
    /// Negotiator that waits indefinitely.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up waiting after `timeout` and move the first movable piece.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Handle for supplying choices.
    #[must_use]
    pub fn input(&self) -> HumanInput {
        HumanInput {
            rendezvous: self.rendezvous.clone(),
        }
    }
}

#[async_trait]
impl Negotiator for HumanNegotiator {
    async fn decide(&self, turn: &TurnContext<'_>) -> PieceId {
        if let Some(choice) = forced_choice(turn) {
            debug!(seat = %turn.seat, %choice, "forced choice, no input needed");
            return choice;
        }

        let fallback = turn.movable().first().copied().unwrap_or_default();
        let rx = self.rendezvous.park();

        let received = match self.timeout {
            None => rx.await.ok(),
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(received) => received.ok(),
                Err(_) => {
                    self.rendezvous.clear();
                    warn!(seat = %turn.seat, ?limit, %fallback, "input timed out, moving first piece");
                    None
                }
            },
        };

        received.unwrap_or(fallback)
    }
}
