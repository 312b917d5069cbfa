//! Property tests for the synchronous movement rules.

use flying_chess::core::{Board, PieceId, PlayerId, PlayerMap, Position, Roll, PIECES};
use flying_chess::rules::{apply_movement, plan_move, remap};
use proptest::prelude::*;

fn seat() -> impl Strategy<Value = PlayerId> {
    (0u8..4).prop_map(PlayerId::new)
}

fn roll() -> impl Strategy<Value = Roll> {
    (1u8..=6).prop_map(Roll::new)
}

fn board() -> impl Strategy<Value = Board> {
    proptest::array::uniform4(proptest::array::uniform4(-1i8..=56)).prop_map(Board::from_raw)
}

proptest! {
    /// Remapped positions stay on the shared track.
    #[test]
    fn prop_remap_stays_on_track(observer in seat(), current in seat(), raw in -1i8..=56) {
        if let Some(mapped) = remap(observer, Position::new(raw), current) {
            prop_assert!((1..=50).contains(&mapped.value()));
            prop_assert!((1..=50).contains(&raw));
        }
    }

    /// Remapping into one's own frame is the identity on the track.
    #[test]
    fn prop_remap_own_frame(player in seat(), raw in 1i8..=50) {
        prop_assert_eq!(remap(player, Position::new(raw), player), Some(Position::new(raw)));
    }

    /// Every plan ends inside the board and only flies from the track.
    #[test]
    fn prop_plan_ends_in_range(prev in 0i8..56, roll in roll()) {
        let movement = plan_move(Position::new(prev), roll);

        prop_assert!(!movement.steps.is_empty());
        prop_assert!(movement.steps.len() <= 4);
        let end = movement.destination().value();
        prop_assert!((1..=56).contains(&end));
        if movement.flew {
            prop_assert!(prev < 18);
        }
    }

    /// Moves never evict the mover's own pieces or an ally's.
    #[test]
    fn prop_no_friendly_eviction(
        mut board in board(),
        mover in seat(),
        piece in 0u8..PIECES as u8,
        roll in roll(),
        teams in any::<bool>(),
    ) {
        let piece = PieceId::new(piece);
        let from = board.get(mover, piece);
        prop_assume!(!from.is_finished());
        prop_assume!(!from.is_home() || roll.is_six());

        let groups = if teams {
            PlayerMap::from_array([0, 1, 0, 1])
        } else {
            PlayerMap::from_array([0, 1, 2, 3])
        };
        let own_before = board.seat(mover);
        let movement = plan_move(from, roll);

        let evicted = apply_movement(&mut board, &groups, mover, piece, &movement);

        for eviction in &evicted {
            prop_assert_ne!(eviction.player, mover);
            prop_assert_ne!(groups[eviction.player], groups[mover]);
            prop_assert!(board.get(eviction.player, eviction.piece).is_home());
        }
        for other in PieceId::all().filter(|&p| p != piece) {
            prop_assert_eq!(board.get(mover, other), own_before[other.index()]);
        }
        prop_assert_eq!(board.get(mover, piece), movement.destination());

        // No enemy piece shares the mover's final tile.
        let landed = movement.destination();
        for other in PlayerId::all().filter(|&p| groups[p] != groups[mover]) {
            for target in PieceId::all() {
                let at = remap(other, board.get(other, target), mover);
                prop_assert_ne!(at, Some(landed), "{} {} left on {}", other, target, landed);
            }
        }
    }
}
