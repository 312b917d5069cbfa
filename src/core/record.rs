//! Move history: what one turn did to the board.
//!
//! Used for:
//! - Renderers replaying the step sequence of the last move
//! - Replica comparison and debugging
//! - Test assertions on captures and finishes

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::piece::{PieceId, Position, Roll};
use super::player::PlayerId;

/// Sequence of stops one movement visits, in order.
///
/// Only the last stop is authoritative; the earlier ones exist for
/// animation. SmallVec covers the longest rule chain (three stops) inline.
pub type Steps = SmallVec<[Position; 4]>;

/// Why a piece was sent home.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvictionCause {
    /// The mover landed on the piece's absolute tile.
    Collision,
    /// The mover flew over the shortcut while the piece sat on the trap tile.
    Trap,
}

/// A piece sent back home during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eviction {
    pub player: PlayerId,
    pub piece: PieceId,
    /// Seat-relative position the piece was evicted from.
    pub from: Position,
    pub cause: EvictionCause,
}

/// One completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Roll counter value when this turn was rolled (starts at 1).
    pub turn: u64,

    /// The seat that acted.
    pub player: PlayerId,

    /// The die roll.
    pub roll: Roll,

    /// The moved piece, or `None` when nothing could move.
    pub piece: Option<PieceId>,

    /// Stops visited by the moved piece.
    pub steps: Steps,

    /// Pieces sent home by this move, in the order they were evicted.
    pub evictions: Vec<Eviction>,

    /// The move passed over the shortcut.
    pub flew: bool,

    /// The seat completed all four pieces with this move.
    pub finished: bool,
}

impl MoveRecord {
    /// Record for a turn in which no piece could move.
    #[must_use]
    pub fn skipped(turn: u64, player: PlayerId, roll: Roll) -> Self {
        Self {
            turn,
            player,
            roll,
            piece: None,
            steps: Steps::new(),
            evictions: Vec::new(),
            flew: false,
            finished: false,
        }
    }

    /// Final position of the moved piece, if any piece moved.
    #[must_use]
    pub fn destination(&self) -> Option<Position> {
        self.steps.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_skipped_record() {
        let record = MoveRecord::skipped(3, PlayerId::new(1), Roll::new(2));

        assert_eq!(record.piece, None);
        assert!(record.steps.is_empty());
        assert_eq!(record.destination(), None);
        assert!(!record.finished);
    }

    #[test]
    fn test_destination_is_last_step() {
        let record = MoveRecord {
            turn: 1,
            player: PlayerId::new(0),
            roll: Roll::new(4),
            piece: Some(PieceId::new(2)),
            steps: smallvec![Position::new(18), Position::new(30), Position::new(34)],
            evictions: Vec::new(),
            flew: true,
            finished: false,
        };

        assert_eq!(record.destination(), Some(Position::new(34)));
    }

    #[test]
    fn test_record_serialization() {
        let record = MoveRecord {
            turn: 9,
            player: PlayerId::new(2),
            roll: Roll::SIX,
            piece: Some(PieceId::new(0)),
            steps: smallvec![Position::START],
            evictions: vec![Eviction {
                player: PlayerId::new(3),
                piece: PieceId::new(1),
                from: Position::new(13),
                cause: EvictionCause::Collision,
            }],
            flew: false,
            finished: false,
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
