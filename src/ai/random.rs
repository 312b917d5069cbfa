//! Random strategy: release on a six, otherwise any piece on the board.

use std::sync::{Mutex, PoisonError};

use crate::core::{GameRng, PieceId, Roll};

use super::query::BoardQuery;
use super::{first_home_piece, on_board_pieces, Strategy};

/// Strategy that releases a home piece whenever it can and otherwise picks
/// uniformly among the pieces already on the board.
///
/// The RNG sits behind a `Mutex` because [`Strategy::choose`] takes `&self`.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: Mutex<GameRng>,
}

impl RandomStrategy {
    pub const NAME: &'static str = "random";

    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn choose(&self, roll: Roll, query: &BoardQuery<'_>) -> PieceId {
        let own = query.own();
        if roll.is_six() {
            if let Some(piece) = first_home_piece(&own) {
                return piece;
            }
        }

        let ok = on_board_pieces(&own);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.choose(&ok).copied().unwrap_or_default()
    }
}
