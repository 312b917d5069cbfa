//! Core engine types: seats, pieces, board, RNG, configuration, state.
//!
//! This module contains the plain data the rules operate on. It knows the
//! shape of a flying chess table but none of the movement rules; those live
//! in [`crate::rules`].

pub mod player;
pub mod piece;
pub mod board;
pub mod rng;
pub mod config;
pub mod record;
pub mod state;

pub use player::{PlayerId, PlayerMap, SEATS};
pub use piece::{PieceId, Position, Roll, PIECES};
pub use board::Board;
pub use rng::{GameRng, GameRngState};
pub use config::{SessionConfig, WinRule};
pub use record::{Eviction, EvictionCause, MoveRecord, Steps};
pub use state::{GameSnapshot, GameState, TurnPhase};
