//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier for the four fixed seats of a session.
//! Seat arithmetic (next seat, opposite seat, seat distance) always wraps
//! modulo [`SEATS`].
//!
//! ## PlayerMap
//!
//! Fixed four-entry per-seat storage backed by an array for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table.
pub const SEATS: usize = 4;

/// Seat identifier, `0..=3`.
///
/// Seats are fixed for the lifetime of a session and define turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Create a new seat ID.
    ///
    /// Panics if `id` is not a valid seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SEATS, "Seat must be in 0..4");
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw seat number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// The seat that acts after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        self.offset(1)
    }

    /// The diametrically opposite seat.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self(self.0 ^ 2)
    }

    /// The seat `k` places after this one, wrapping around the table.
    #[must_use]
    pub const fn offset(self, k: u8) -> Self {
        Self((self.0 + k % SEATS as u8) % SEATS as u8)
    }

    /// How many seats after `other` this seat sits.
    ///
    /// ```
    /// use flying_chess::core::PlayerId;
    ///
    /// let a = PlayerId::new(1);
    /// let b = PlayerId::new(3);
    /// assert_eq!(a.distance_from(b), 2);
    /// assert_eq!(b.distance_from(a), 2);
    /// assert_eq!(PlayerId::new(0).distance_from(PlayerId::new(1)), 3);
    /// ```
    #[must_use]
    pub const fn distance_from(self, other: PlayerId) -> u8 {
        (self.0 + SEATS as u8 - other.0) % SEATS as u8
    }

    /// Iterate over all four seats in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEATS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use flying_chess::core::{PlayerId, PlayerMap};
///
/// let mut groups: PlayerMap<u8> = PlayerMap::new(|p| p.raw() % 2);
///
/// assert_eq!(groups[PlayerId::new(2)], 0);
///
/// groups[PlayerId::new(1)] = 7;
/// assert_eq!(groups[PlayerId::new(1)], 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEATS],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(PlayerId(i as u8))),
        }
    }

    /// Create a new PlayerMap from an array indexed by seat.
    pub const fn from_array(data: [T; SEATS]) -> Self {
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Transform every entry, consuming the map.
    pub fn map<U>(self, mut f: impl FnMut(PlayerId, T) -> U) -> PlayerMap<U> {
        let mut seat = 0;
        PlayerMap {
            data: self.data.map(|value| {
                let player = PlayerId(seat);
                seat += 1;
                f(player, value)
            }),
        }
    }

    /// Unwrap into the underlying seat-indexed array.
    pub fn into_array(self) -> [T; SEATS] {
        self.data
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
