//! Engine error taxonomy.
//!
//! The engine has no player-facing error codes. Illegal move choices are
//! retried silently and never reach this type. What remains are defects in
//! the surrounding plumbing (a closed choice channel, diverging replicas) and
//! the optional turn limit.

use thiserror::Error;

use crate::core::PlayerId;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The input queue closed while a choice was outstanding.
    #[error("choice channel closed while waiting for {player}")]
    ChoiceChannelClosed { player: PlayerId },

    /// The configured roll limit was reached before the game ended.
    #[error("turn limit reached after {turns} rolls")]
    TurnLimitReached { turns: u64 },

    /// Replicas of one session finished in different states.
    #[error("replicas diverged: {detail}")]
    ReplicaDivergence { detail: String },

    /// A replica task panicked or was cancelled.
    #[error("replica task failed: {0}")]
    ReplicaFailed(String),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
