//! Deterministic random number generation for dice and AI choices.
//!
//! Every replica of a session builds its `GameRng` from the same text seed,
//! so all replicas roll the same dice in the same order. Text seeds go
//! through FNV-1a, which does not change between platforms or compiler
//! versions. AI seats draw from per-seat substreams so their choices never
//! perturb the dice.
//!
//! ```
//! use flying_chess::core::GameRng;
//!
//! let mut a = GameRng::from_seed_str("table-7");
//! let mut b = GameRng::from_seed_str("table-7");
//!
//! for _ in 0..20 {
//!     assert_eq!(a.roll_die(), b.roll_die());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::piece::Roll;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Hash text into a 64-bit seed with FNV-1a.
#[must_use]
pub fn seed_from_str(text: &str) -> u64 {
    text.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Dice and tie-break source for one replica.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the session's text seed.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(seed_from_str(seed))
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Substream keyed by `context` (e.g. `"ai-2"`). Same seed and context,
    /// same stream.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mixed = context.bytes().fold(self.seed ^ FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
        Self::new(mixed)
    }

    /// Roll one six-sided die.
    pub fn roll_die(&mut self) -> Roll {
        Roll::new(self.inner.gen_range(1..=6))
    }

    /// Uniform pick, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Checkpoint: seed plus ChaCha word position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serialized position in the dice stream. Constant size however many dice
/// have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
