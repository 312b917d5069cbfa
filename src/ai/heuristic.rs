//! Priority-rule strategy.

use crate::core::{PieceId, Position, Roll};
use crate::rules::movement::{is_jump_tile, FLY_ENTRY, JUMP};

use super::query::BoardQuery;
use super::{first_home_piece, on_board_pieces, Strategy};

/// Highest landing tile worth aiming at for a jump; beyond it the jump ends
/// in the home stretch.
const LAST_USEFUL_JUMP: i8 = 46;

/// Deterministic strategy applying fixed priorities, first match wins:
///
/// 1. Release a home piece on a six.
/// 2. Finish a piece exactly.
/// 3. Land on a tile that starts a flight (18, or 14 which jumps to 18).
/// 4. Land on any other jump tile up to 46.
/// 5. Any move that does not overshoot the end.
/// 6. The first piece on the board, or piece 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    pub const NAME: &'static str = "heuristic";
}

impl Strategy for HeuristicStrategy {
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
        let lands = |piece: &PieceId| own[piece.index()].plus(roll);
        let flight_entry = FLY_ENTRY.value();

        let rules: [&dyn Fn(i8) -> bool; 4] = [
            &|to: i8| to == Position::FINISHED.value(),
            &|to: i8| to == flight_entry || to == flight_entry - JUMP,
            &|to: i8| to <= LAST_USEFUL_JUMP && is_jump_tile(to),
            &|to: i8| to < Position::FINISHED.value(),
        ];

        rules
            .iter()
            .find_map(|rule| ok.iter().find(|piece| rule(lands(piece))).copied())
            .or_else(|| ok.first().copied())
            .unwrap_or_default()
    }
}
