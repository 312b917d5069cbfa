//! Piece positions for all four seats.

use serde::{Deserialize, Serialize};

use super::piece::{PieceId, Position, Roll, PIECES};
use super::player::{PlayerId, PlayerMap};

/// Four pieces per seat, each at a seat-relative [`Position`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pieces: PlayerMap<[Position; PIECES]>,
}

impl Board {
    /// A board with every piece at home.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pieces: PlayerMap::with_value([Position::HOME; PIECES]),
        }
    }

    /// Build a board from raw per-seat positions.
    ///
    /// ```
    /// use flying_chess::core::{Board, PieceId, PlayerId, Position};
    ///
    /// let board = Board::from_raw([
    ///     [10, -1, 56, 20],
    ///     [-1, -1, -1, -1],
    ///     [-1, -1, -1, -1],
    ///     [-1, -1, -1, -1],
    /// ]);
    /// assert_eq!(board.get(PlayerId::new(0), PieceId::new(3)), Position::new(20));
    /// ```
    #[must_use]
    pub fn from_raw(raw: [[i8; PIECES]; 4]) -> Self {
        Self {
            pieces: PlayerMap::from_array(raw.map(|seat| seat.map(Position::new))),
        }
    }

    /// Position of one piece.
    #[must_use]
    pub fn get(&self, player: PlayerId, piece: PieceId) -> Position {
        self.pieces[player][piece.index()]
    }

    /// Move one piece to `position`.
    pub fn set(&mut self, player: PlayerId, piece: PieceId, position: Position) {
        self.pieces[player][piece.index()] = position;
    }

    /// All four positions of one seat.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> [Position; PIECES] {
        self.pieces[player]
    }

    /// Iterate over `(seat, piece, position)` for every piece on the table.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, PieceId, Position)> + '_ {
        self.pieces.iter().flat_map(|(player, positions)| {
            PieceId::all().map(move |piece| (player, piece, positions[piece.index()]))
        })
    }

    /// Pieces of `player` that may move with `roll`.
    ///
    /// A piece is movable when it has not finished and is either already
    /// released, or at home with a roll of six.
    #[must_use]
    pub fn movable(&self, player: PlayerId, roll: Roll) -> Vec<PieceId> {
        PieceId::all()
            .filter(|&piece| {
                let pos = self.get(player, piece);
                !pos.is_finished() && (!pos.is_home() || roll.is_six())
            })
            .collect()
    }

    /// True when all four of the seat's pieces have finished.
    #[must_use]
    pub fn all_finished(&self, player: PlayerId) -> bool {
        self.pieces[player].iter().all(|p| p.is_finished())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_new_board_all_home() {
        let board = Board::new();
        assert!(board.iter().all(|(_, _, pos)| pos.is_home()));
        assert_eq!(board.iter().count(), 16);
    }

    #[test]
    fn test_movable_home_needs_six() {
        let board = Board::new();
        assert!(board.movable(seat(0), Roll::new(5)).is_empty());
        assert_eq!(board.movable(seat(0), Roll::SIX).len(), 4);
    }

    #[test]
    fn test_movable_skips_finished() {
        let board = Board::from_raw([
            [10, -1, 56, 20],
            [-1; 4],
            [-1; 4],
            [-1; 4],
        ]);
        let ids: Vec<_> = board.movable(seat(0), Roll::new(4)).iter().map(|p| p.index()).collect();
        assert_eq!(ids, vec![0, 3]);

        let ids: Vec<_> = board.movable(seat(0), Roll::SIX).iter().map(|p| p.index()).collect();
        assert_eq!(ids, vec![0, 1, 3]);
    }

    #[test]
    fn test_all_finished() {
        let mut board = Board::from_raw([[56, 56, 56, 55], [-1; 4], [-1; 4], [-1; 4]]);
        assert!(!board.all_finished(seat(0)));
        board.set(seat(0), PieceId::new(3), Position::FINISHED);
        assert!(board.all_finished(seat(0)));
        assert!(!board.all_finished(seat(1)));
    }
}
