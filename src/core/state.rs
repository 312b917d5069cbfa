//! Replica game state.
//!
//! ## GameState
//!
//! Everything one replica knows about the session:
//! - Board positions
//! - Turn state: acting seat, current roll, finished flags, phase
//! - Finish order
//! - Move history
//! - RNG
//!
//! The turn engine is the only writer. Listeners receive `&GameState` for
//! the duration of a notification.
//!
//! ## GameSnapshot
//!
//! Serializable copy of the authoritative parts of a `GameState`, used to
//! checkpoint a replica and to compare replicas byte for byte.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::piece::Roll;
use super::player::{PlayerId, PlayerMap};
use super::record::MoveRecord;
use super::rng::{GameRng, GameRngState};

/// Where the turn engine is within one iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Skipping finished seats and checking for game over.
    #[default]
    AwaitingFinishCheck,
    /// Rolling the die for the acting seat.
    RollingDice,
    /// The acting seat cannot move; its placeholder choice is awaited.
    NoLegalMove,
    /// Waiting for the acting seat's choice.
    AwaitingChoice,
    /// Applying the chosen movement step by step.
    ApplyingMove,
    /// Checking whether the acting seat finished.
    CheckWin,
    /// Deciding between an extra turn and the next seat.
    AdvanceOrRepeat,
    /// Terminal.
    AllFinished,
}

/// Complete replica state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Piece positions.
    pub board: Board,

    /// Acting seat.
    pub current: PlayerId,

    /// Latest roll.
    pub roll: Roll,

    /// Seats whose four pieces are all finished.
    pub finished: PlayerMap<bool>,

    /// Seats in the order they finished.
    pub order: Vec<PlayerId>,

    /// Number of rolls made so far.
    pub turn_number: u64,

    /// Current state machine phase.
    pub phase: TurnPhase,

    /// Completed turns, oldest first.
    pub history: Vector<MoveRecord>,

    /// Deterministic dice RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create the initial state: every piece home, seat 0 to act.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            board: Board::new(),
            current: PlayerId::new(0),
            roll: Roll::default(),
            finished: PlayerMap::with_value(false),
            order: Vec::new(),
            turn_number: 0,
            phase: TurnPhase::default(),
            history: Vector::new(),
            rng,
        }
    }

    /// Create the initial state from a text seed.
    #[must_use]
    pub fn from_seed(seed: &str) -> Self {
        Self::new(GameRng::from_seed_str(seed))
    }

    #[must_use]
    pub fn is_finished(&self, player: PlayerId) -> bool {
        self.finished[player]
    }

    /// Most recent completed turn.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.back()
    }

    /// Mark a seat finished. Appends to the finish order at most once.
    ///
    /// Returns true if the seat was newly marked.
    pub fn mark_finished(&mut self, player: PlayerId) -> bool {
        if self.finished[player] {
            return false;
        }
        self.finished[player] = true;
        self.order.push(player);
        true
    }

    /// Record a completed turn.
    pub fn record_move(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }

    /// Capture the authoritative state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current: self.current,
            roll: self.roll,
            finished: self.finished,
            order: self.order.clone(),
            turn_number: self.turn_number,
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot. History is not part of a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            board: snapshot.board,
            current: snapshot.current,
            roll: snapshot.roll,
            finished: snapshot.finished,
            order: snapshot.order.clone(),
            turn_number: snapshot.turn_number,
            phase: TurnPhase::AwaitingFinishCheck,
            history: Vector::new(),
            rng: GameRng::from_state(&snapshot.rng),
        }
    }
}

/// Serializable checkpoint of a replica.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current: PlayerId,
    pub roll: Roll,
    pub finished: PlayerMap<bool>,
    pub order: Vec<PlayerId>,
    pub turn_number: u64,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Compact binary encoding. Equal snapshots encode to equal bytes.
    pub fn fingerprint(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by [`GameSnapshot::fingerprint`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
