//! Session configuration.
//!
//! A session is configured once at startup and shared, unchanged, by every
//! replica:
//! - `seed`: text seed determining the full roll sequence
//! - `groups`: alliance tag per seat
//! - `win_rule`: when the game is over
//! - `step_delay`: pacing between the sub-moves of one piece movement
//! - `max_turns`: optional safety limit on the number of rolls

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};

/// When a session terminates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Play until every seat has finished; the first finisher wins.
    #[default]
    FinishOrder,
    /// Stop as soon as every seat of one alliance has finished; that
    /// alliance wins.
    FirstAlliance,
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Text seed shared by all replicas.
    pub seed: String,

    /// Alliance tag per seat. Seats with equal tags never capture each other.
    pub groups: PlayerMap<u8>,

    /// Termination rule.
    pub win_rule: WinRule,

    /// Suspension between the steps of one movement (animation pacing).
    /// Zero only yields to the scheduler.
    pub step_delay: Duration,

    /// Maximum number of rolls before the engine gives up. `None` for
    /// unlimited.
    pub max_turns: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: "flying-chess".to_string(),
            groups: PlayerMap::from_array([0, 1, 2, 3]),
            win_rule: WinRule::FinishOrder,
            step_delay: Duration::ZERO,
            max_turns: None,
        }
    }
}

impl SessionConfig {
    /// Create a free-for-all config with the given seed.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Set the text seed.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the alliance tag of every seat.
    #[must_use]
    pub fn with_groups(mut self, groups: [u8; 4]) -> Self {
        self.groups = PlayerMap::from_array(groups);
        self
    }

    /// Two alliances of opposite seats: {0, 2} and {1, 3}.
    #[must_use]
    pub fn with_opposite_teams(self) -> Self {
        self.with_groups([0, 1, 0, 1])
    }

    /// Set the termination rule.
    #[must_use]
    pub fn with_win_rule(mut self, rule: WinRule) -> Self {
        self.win_rule = rule;
        self
    }

    /// Set the pacing delay between movement steps.
    #[must_use]
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Limit the number of rolls.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u64) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Alliance tag of a seat.
    #[must_use]
    pub fn group(&self, player: PlayerId) -> u8 {
        self.groups[player]
    }

    /// True when two seats belong to the same alliance.
    #[must_use]
    pub fn allied(&self, a: PlayerId, b: PlayerId) -> bool {
        self.group(a) == self.group(b)
    }

    /// Seats sharing `player`'s alliance, including `player`.
    pub fn alliance_of(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        let group = self.group(player);
        PlayerId::all().filter(move |&p| self.group(p) == group)
    }
}
