//! # flying-chess
//!
//! A deterministic four-seat flying chess engine with pluggable move
//! negotiation.
//!
//! ## Design Principles
//!
//! 1. **Replicated, Not Shared**: Every seat runs its own replica of the
//!    game. Replicas share only the seed and the ordered stream of move
//!    choices, and must therefore reach identical states.
//!
//! 2. **Seat-Relative Board**: Positions are stored in each seat's own frame
//!    (0 is the seat's start tile). Collisions compare positions through
//!    [`rules::remap`].
//!
//! 3. **Negotiation Over Callbacks**: The engine never asks "who is
//!    playing". It announces turns and waits for a choice; AI and human
//!    negotiators look the same from the engine's side.
//!
//! ## Modules
//!
//! - `core`: seats, pieces, board, RNG, configuration, state
//! - `rules`: position remapping, movement, the turn engine
//! - `ai`: random and heuristic strategies
//! - `protocol`: turn events, choice queues, negotiators, clients
//! - `session`: wiring four replicas into one local game
//! - `error`: engine error type

pub mod core;
pub mod rules;
pub mod ai;
pub mod protocol;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, SEATS,
    PieceId, Position, Roll, PIECES,
    Board, GameRng, GameRngState,
    SessionConfig, WinRule,
    Eviction, EvictionCause, MoveRecord,
    GameSnapshot, GameState, TurnPhase,
};

pub use crate::rules::{remap, plan_move, Movement, GameOutcome, TurnEngine};

pub use crate::ai::{BoardQuery, HeuristicStrategy, RandomStrategy, Strategy, StrategyKind};

pub use crate::protocol::{
    choice_queue, ChoiceQueue, ChoiceRelay, ChoiceSender,
    Client, SeatView,
    TurnEvent, TurnEventKind, TurnListener, TurnNotifier,
    AiNegotiator, HumanInput, HumanNegotiator, Negotiator, TurnContext,
};

pub use crate::session::{LocalSession, SessionHandle};

pub use crate::error::{EngineError, Result};
