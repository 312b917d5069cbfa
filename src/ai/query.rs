//! Read-only board access for decision strategies.

use crate::core::{Board, PlayerId, Position, PIECES, SEATS};

/// Board view framed on one seat.
///
/// Offset `0` is always the framing seat itself; offset `k` is the seat `k`
/// places after it in turn order.
#[derive(Clone, Copy, Debug)]
pub struct BoardQuery<'a> {
    board: &'a Board,
    origin: PlayerId,
}

impl<'a> BoardQuery<'a> {
    #[must_use]
    pub fn new(board: &'a Board, origin: PlayerId) -> Self {
        Self { board, origin }
    }

    /// The seat offset `0` refers to.
    #[must_use]
    pub fn origin(&self) -> PlayerId {
        self.origin
    }

    /// Positions of the four pieces of the seat `offset` places after the
    /// origin.
    ///
    /// Panics if `offset` is not a valid seat offset.
    #[must_use]
    pub fn pieces(&self, offset: u8) -> [Position; PIECES] {
        assert!((offset as usize) < SEATS, "Seat offset must be in 0..4");
        self.board.seat(self.origin.offset(offset))
    }

    /// Positions of the origin's own pieces.
    #[must_use]
    pub fn own(&self) -> [Position; PIECES] {
        self.pieces(0)
    }
}
