//! Pieces, board positions and die rolls.
//!
//! A position is always seat-relative: `0` is the seat's own starting tile,
//! and the same number means a different physical tile for every seat. Use
//! [`crate::rules::remap`] to compare positions across seats.

use serde::{Deserialize, Serialize};

/// Number of pieces each seat owns.
pub const PIECES: usize = 4;

/// Piece identifier within a seat, `0..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u8);

impl PieceId {
    /// Create a new piece ID.
    ///
    /// Panics if `id` is not a valid piece index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PIECES, "Piece must be in 0..4");
        Self(id)
    }

    /// Get the raw piece index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all four piece IDs.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..PIECES as u8).map(PieceId)
    }
}

impl Default for PieceId {
    fn default() -> Self {
        Self(0)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece {}", self.0)
    }
}

/// Seat-relative board position in `[-1, 56]`.
///
/// | Range | Meaning |
/// |---|---|
/// | `-1` | home, not yet released |
/// | `0..=49` | shared outer track |
/// | `50..=55` | the seat's private home stretch |
/// | `56` | finished |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(i8);

impl Position {
    /// Piece waiting at home.
    pub const HOME: Position = Position(-1);
    /// The seat's starting tile.
    pub const START: Position = Position(0);
    /// First tile of the private home stretch.
    pub const STRETCH: Position = Position(50);
    /// Piece has reached the end.
    pub const FINISHED: Position = Position(56);

    /// Create a position.
    ///
    /// Panics if `value` is outside `[-1, 56]`.
    #[must_use]
    pub const fn new(value: i8) -> Self {
        assert!(value >= -1 && value <= 56, "Position must be in -1..=56");
        Self(value)
    }

    /// Get the raw position value.
    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        self.0 == Self::HOME.0
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.0 == Self::FINISHED.0
    }

    /// On the shared outer track.
    #[must_use]
    pub const fn is_on_track(self) -> bool {
        self.0 >= 0 && self.0 < Self::STRETCH.0
    }

    /// In the seat's private home stretch (not yet finished).
    #[must_use]
    pub const fn is_in_stretch(self) -> bool {
        self.0 >= Self::STRETCH.0 && self.0 < Self::FINISHED.0
    }

    /// Raw sum of this position and a roll, without any rule applied.
    #[must_use]
    pub const fn plus(self, roll: Roll) -> i8 {
        self.0 + roll.value() as i8
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::HOME
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::HOME => write!(f, "home"),
            Self::FINISHED => write!(f, "finished"),
            Position(v) => write!(f, "{}", v),
        }
    }
}

/// One die roll, `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roll(u8);

impl Roll {
    /// The roll that releases pieces and grants an extra turn.
    pub const SIX: Roll = Roll(6);

    /// Create a roll.
    ///
    /// Panics if `value` is outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value >= 1 && value <= 6, "Roll must be in 1..=6");
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }
}

impl Default for Roll {
    fn default() -> Self {
        Self(1)
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
