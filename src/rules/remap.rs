//! Coordinate mapping between seat frames.
//!
//! Every seat counts positions from its own starting tile, thirteen tiles
//! apart around a fifty-tile loop. Mapping a piece into the acting seat's
//! frame gives a single shared coordinate for collision checks.

use crate::core::{PlayerId, Position};

/// Tiles between two neighbouring seats' starting tiles.
pub const SEAT_SPACING: i8 = 13;

/// Highest tile reachable on the shared track in a seat's frame.
pub const TRACK_END: i8 = 50;

/// Map `observer`'s piece at `raw` into `current`'s frame.
///
/// Returns `None` when no collision is possible: the piece is at home, on
/// its starting tile, in its home stretch past the track, finished, or
/// somewhere the acting seat's track never reaches. Every `Some` result lies
/// in `1..=50`.
///
/// ```
/// use flying_chess::core::{PlayerId, Position};
/// use flying_chess::rules::remap;
///
/// let p = |n| PlayerId::new(n);
///
/// // Seat 1's tile 5 is seat 0's tile 18.
/// assert_eq!(remap(p(1), Position::new(5), p(0)), Some(Position::new(18)));
/// // Seat 3's tile 14 wraps around to seat 0's tile 1.
/// assert_eq!(remap(p(3), Position::new(14), p(0)), Some(Position::new(1)));
/// assert_eq!(remap(p(2), Position::HOME, p(0)), None);
/// ```
#[must_use]
pub fn remap(observer: PlayerId, raw: Position, current: PlayerId) -> Option<Position> {
    let ps = raw.value();
    if ps <= 0 || ps > TRACK_END {
        return None;
    }
    let dis = observer.distance_from(current) as i8;
    if ps + SEAT_SPACING * dis <= TRACK_END {
        Some(Position::new(ps + SEAT_SPACING * dis))
    } else if ps > SEAT_SPACING * (4 - dis) {
        Some(Position::new(ps - SEAT_SPACING * (4 - dis)))
    } else {
        None
    }
}
