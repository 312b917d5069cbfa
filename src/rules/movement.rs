//! Movement rules: where a piece goes and what it knocks home.
//!
//! Everything here is synchronous and side-effect free apart from the board
//! passed in. The turn engine drives these functions one stop at a time so
//! observers can follow the sub-moves.

use smallvec::smallvec;
use tracing::debug;

use crate::core::{Board, Eviction, EvictionCause, PieceId, PlayerId, PlayerMap, Position, Roll, Steps};

use super::remap::remap;

/// Landing here triggers the flight across the board.
pub const FLY_ENTRY: Position = Position::new(18);

/// Where a flight lands.
pub const FLY_EXIT: Position = Position::new(30);

/// The opposite seat's tile that a flight passes over.
pub const TRAP: Position = Position::new(53);

/// Forward jump granted by a jump tile.
pub const JUMP: i8 = 4;

/// Tiles with `position % 4 == 2` grant a jump.
#[must_use]
pub const fn is_jump_tile(position: i8) -> bool {
    position % 4 == 2
}

/// The planned path of one piece for one roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    /// Stops in order; the last one is the destination.
    pub steps: Steps,
    /// The path used the flight shortcut.
    pub flew: bool,
}

impl Movement {
    fn single(position: Position) -> Self {
        Self {
            steps: smallvec![position],
            flew: false,
        }
    }

    /// Final stop.
    #[must_use]
    pub fn destination(&self) -> Position {
        self.steps[self.steps.len() - 1]
    }
}

/// Plan the path of a piece at `prev` moving `roll` tiles.
///
/// Only call this for a movable piece: a finished piece, or a home piece
/// without a six, is a contract violation and panics.
///
/// ```
/// use flying_chess::core::{Position, Roll};
/// use flying_chess::rules::plan_move;
///
/// // Overshoot reflects off the end.
/// let m = plan_move(Position::new(52), Roll::new(5));
/// assert_eq!(m.steps.as_slice(), &[Position::new(56), Position::new(55)]);
///
/// // Tile 18 flies to 30, which is a jump tile.
/// let m = plan_move(Position::new(15), Roll::new(3));
/// assert_eq!(m.steps.as_slice(), &[Position::new(18), Position::new(30), Position::new(34)]);
/// assert!(m.flew);
/// ```
#[must_use]
pub fn plan_move(prev: Position, roll: Roll) -> Movement {
    assert!(!prev.is_finished(), "Finished pieces cannot move");

    if prev.is_home() {
        assert!(roll.is_six(), "Home pieces need a six to leave");
        return Movement::single(Position::START);
    }

    let sum = prev.plus(roll);
    let end = Position::FINISHED.value();

    if sum == end {
        return Movement::single(Position::FINISHED);
    }
    if sum > end {
        return Movement {
            steps: smallvec![Position::FINISHED, Position::new(end - (sum - end))],
            flew: false,
        };
    }
    if sum >= Position::STRETCH.value() {
        return Movement::single(Position::new(sum));
    }

    let mut np = sum;
    let mut flew = false;
    let mut steps: Steps = smallvec![Position::new(np)];

    if np == FLY_ENTRY.value() {
        flew = true;
        np = FLY_EXIT.value();
        steps.push(FLY_EXIT);
    }
    if is_jump_tile(np) {
        np += JUMP;
        steps.push(Position::new(np));
    }
    if np == FLY_ENTRY.value() {
        flew = true;
        steps.push(FLY_EXIT);
    }

    Movement { steps, flew }
}

/// Send home every opposite-seat piece sitting on the trap tile, unless the
/// opposite seat is an ally.
pub fn spring_trap(board: &mut Board, groups: &PlayerMap<u8>, mover: PlayerId) -> Vec<Eviction> {
    let victim = mover.opposite();
    let mut evicted = Vec::new();
    if groups[victim] == groups[mover] {
        return evicted;
    }

    for piece in PieceId::all() {
        if board.get(victim, piece) == TRAP {
            board.set(victim, piece, Position::HOME);
            debug!(%mover, %victim, %piece, "trap eviction");
            evicted.push(Eviction {
                player: victim,
                piece,
                from: TRAP,
                cause: EvictionCause::Trap,
            });
        }
    }

    evicted
}

/// Move `piece` of `mover` to `stop` and evict every non-allied piece on the
/// same absolute tile.
pub fn apply_step(
    board: &mut Board,
    groups: &PlayerMap<u8>,
    mover: PlayerId,
    piece: PieceId,
    stop: Position,
) -> Vec<Eviction> {
    board.set(mover, piece, stop);

    let mut evicted = Vec::new();
    for other in PlayerId::all().filter(|&p| p != mover) {
        if groups[other] == groups[mover] {
            continue;
        }
        for target in PieceId::all() {
            let from = board.get(other, target);
            if remap(other, from, mover) == Some(stop) {
                board.set(other, target, Position::HOME);
                debug!(%mover, victim = %other, piece = %target, %from, "collision eviction");
                evicted.push(Eviction {
                    player: other,
                    piece: target,
                    from,
                    cause: EvictionCause::Collision,
                });
            }
        }
    }

    evicted
}

/// Apply a whole movement at once: the trap (if the path flew), then every
/// stop in order.
///
/// The turn engine performs the same sequence with a suspension between
/// stops; this is the synchronous form for simulations.
pub fn apply_movement(
    board: &mut Board,
    groups: &PlayerMap<u8>,
    mover: PlayerId,
    piece: PieceId,
    movement: &Movement,
) -> Vec<Eviction> {
    let mut evicted = if movement.flew {
        spring_trap(board, groups, mover)
    } else {
        Vec::new()
    };
    for &stop in &movement.steps {
        evicted.extend(apply_step(board, groups, mover, piece, stop));
    }
    evicted
}
