//! AI decision strategies.
//!
//! A strategy is a synchronous function of the roll and the board as seen
//! from the acting seat. It returns the piece to move; if nothing can move it
//! returns piece 0, which the engine treats as a placeholder.
//!
//! - [`RandomStrategy`]: release on a six, otherwise uniform choice
//! - [`HeuristicStrategy`]: fixed priority rules

mod heuristic;
mod query;
mod random;

pub use heuristic::HeuristicStrategy;
pub use query::BoardQuery;
pub use random::RandomStrategy;

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PieceId, Position, Roll, PIECES};

/// Move selection for one seat.
pub trait Strategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Pick the piece to move with `roll`. `query` is framed on the acting
    /// seat: `query.own()` are its pieces.
    fn choose(&self, roll: Roll, query: &BoardQuery<'_>) -> PieceId;
}

/// Configurable strategy selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    Random,
    #[default]
    Heuristic,
}

impl StrategyKind {
    /// Build the strategy. `rng` is only consumed by randomized strategies.
    #[must_use]
    pub fn build(self, rng: GameRng) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(rng)),
            StrategyKind::Heuristic => Box::new(HeuristicStrategy),
        }
    }
}

pub(crate) fn first_home_piece(own: &[Position; PIECES]) -> Option<PieceId> {
    PieceId::all().find(|p| own[p.index()].is_home())
}

/// Pieces that are released and not yet finished.
pub(crate) fn on_board_pieces(own: &[Position; PIECES]) -> Vec<PieceId> {
    PieceId::all()
        .filter(|p| {
            let pos = own[p.index()];
            !pos.is_home() && !pos.is_finished()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, PlayerId};

    #[test]
    fn test_build_kinds() {
        let random = StrategyKind::Random.build(GameRng::new(1));
        let heuristic = StrategyKind::Heuristic.build(GameRng::new(1));

        assert_eq!(random.name(), RandomStrategy::NAME);
        assert_eq!(heuristic.name(), HeuristicStrategy::NAME);
        assert_eq!(StrategyKind::default(), StrategyKind::Heuristic);
    }

    #[test]
    fn test_strategies_agree_on_release() {
        let board = Board::from_raw([[-1; 4], [-1; 4], [30, -1, 12, 56], [-1; 4]]);
        let query = BoardQuery::new(&board, PlayerId::new(2));

        for kind in [StrategyKind::Random, StrategyKind::Heuristic] {
            let strategy = kind.build(GameRng::new(5));
            assert_eq!(strategy.choose(Roll::SIX, &query), PieceId::new(1));
        }
    }

    #[test]
    fn test_on_board_pieces() {
        let own = [-1, 0, 56, 51].map(Position::new);
        let ids: Vec<_> = on_board_pieces(&own).iter().map(|p| p.index()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(first_home_piece(&own), Some(PieceId::new(0)));
    }
}
