//! The turn engine: one replica's authoritative state machine.
//!
//! Each call to [`TurnEngine::play_turn`] runs one iteration:
//!
//! ```text
//! AwaitingFinishCheck -> RollingDice -> NoLegalMove | AwaitingChoice
//!     -> ApplyingMove -> CheckWin -> AdvanceOrRepeat
//! ```
//!
//! ending in `AllFinished` once the win rule is satisfied. The engine
//! suspends only while notifying listeners, while waiting for a choice, and
//! between the steps of a movement.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    GameRng, GameState, MoveRecord, PlayerId, SessionConfig, TurnPhase, WinRule, SEATS,
};
use crate::error::{EngineError, Result};
use crate::protocol::{ChoiceQueue, SeatView, TurnEvent, TurnListener, TurnNotifier};

use super::movement::{apply_step, plan_move, spring_trap};

/// Result of a completed session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Seats in the order they finished.
    pub order: Vec<PlayerId>,
    /// Winning seats: the first finisher, or the first completed alliance.
    pub winners: Vec<PlayerId>,
    /// Total number of rolls.
    pub turns: u64,
}

impl GameOutcome {
    /// The first seat to finish.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.order.first().copied()
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }
}

/// Check `state` against the configured win rule.
#[must_use]
pub fn outcome(config: &SessionConfig, state: &GameState) -> Option<GameOutcome> {
    let winners = match config.win_rule {
        WinRule::FinishOrder => {
            if state.order.len() < SEATS {
                return None;
            }
            vec![state.order[0]]
        }
        WinRule::FirstAlliance => {
            let leader = state
                .order
                .iter()
                .copied()
                .find(|&p| config.alliance_of(p).all(|ally| state.is_finished(ally)))?;
            state
                .order
                .iter()
                .copied()
                .filter(|&p| config.allied(p, leader))
                .collect()
        }
    };

    Some(GameOutcome {
        order: state.order.clone(),
        winners,
        turns: state.turn_number,
    })
}

/// One replica's turn engine.
///
/// Owns the replica's [`GameState`] exclusively. Listeners see it only
/// through notifications; choices arrive only through the [`ChoiceQueue`].
#[derive(Debug)]
pub struct TurnEngine {
    config: SessionConfig,
    state: GameState,
    notifier: TurnNotifier,
    queue: ChoiceQueue,
}

impl TurnEngine {
    /// Fresh engine seeded from the config.
    #[must_use]
    pub fn new(config: SessionConfig, queue: ChoiceQueue) -> Self {
        let state = GameState::new(GameRng::from_seed_str(&config.seed));
        Self::with_state(config, state, queue)
    }

    /// Engine resuming from an existing state.
    #[must_use]
    pub fn with_state(config: SessionConfig, state: GameState, queue: ChoiceQueue) -> Self {
        Self {
            config,
            state,
            notifier: TurnNotifier::new(),
            queue,
        }
    }

    /// Bind a listener to this replica's notifications.
    pub fn subscribe(&mut self, listener: Arc<dyn TurnListener>) {
        self.notifier.subscribe(listener);
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Turn view for one seat, computed from the current state.
    #[must_use]
    pub fn seat_view(&self, seat: PlayerId) -> SeatView {
        SeatView::project(&self.state, seat)
    }

    /// The outcome, if the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        outcome(&self.config, &self.state)
    }

    /// Run turns until the win rule is satisfied.
    pub async fn play(&mut self) -> Result<GameOutcome> {
        loop {
            if let Some(outcome) = self.play_turn().await? {
                return Ok(outcome);
            }
        }
    }

    /// Run one iteration of the state machine.
    ///
    /// Returns the outcome once the game is over; `None` means call again.
    pub async fn play_turn(&mut self) -> Result<Option<GameOutcome>> {
        self.state.phase = TurnPhase::AwaitingFinishCheck;
        if let Some(outcome) = self.outcome() {
            self.state.phase = TurnPhase::AllFinished;
            info!(order = ?outcome.order, winners = ?outcome.winners, turns = outcome.turns, "game over");
            return Ok(Some(outcome));
        }

        let player = self.state.current;
        if self.state.is_finished(player) {
            self.state.current = player.next();
            return Ok(None);
        }

        if let Some(limit) = self.config.max_turns {
            if self.state.turn_number >= limit {
                return Err(EngineError::TurnLimitReached {
                    turns: self.state.turn_number,
                });
            }
        }

        self.state.phase = TurnPhase::RollingDice;
        let roll = self.state.rng.roll_die();
        self.state.roll = roll;
        self.state.turn_number += 1;
        let turn = self.state.turn_number;
        debug!(%player, %roll, turn, "rolled");

        let movable = self.state.board.movable(player, roll);
        if movable.is_empty() {
            self.state.phase = TurnPhase::NoLegalMove;
            self.notify(TurnEvent::start(player)).await;
            let placeholder = self.next_choice(player).await?;
            debug!(%player, %placeholder, "no legal move, choice ignored");
            self.state.record_move(MoveRecord::skipped(turn, player, roll));
            self.notify(TurnEvent::end(player)).await;
            self.state.current = player.next();
            return Ok(None);
        }

        self.state.phase = TurnPhase::AwaitingChoice;
        let piece = loop {
            self.notify(TurnEvent::start(player)).await;
            let choice = self.next_choice(player).await?;
            if movable.contains(&choice) {
                break choice;
            }
            debug!(%player, %choice, "illegal choice rejected");
        };

        self.state.phase = TurnPhase::ApplyingMove;
        let movement = plan_move(self.state.board.get(player, piece), roll);
        debug!(%player, %piece, steps = ?movement.steps, "moving");

        let mut evictions = if movement.flew {
            spring_trap(&mut self.state.board, &self.config.groups, player)
        } else {
            Vec::new()
        };
        for (i, &stop) in movement.steps.iter().enumerate() {
            if i > 0 {
                self.pace().await;
            }
            evictions.extend(apply_step(
                &mut self.state.board,
                &self.config.groups,
                player,
                piece,
                stop,
            ));
        }

        self.state.phase = TurnPhase::CheckWin;
        let finished = self.state.board.all_finished(player) && self.state.mark_finished(player);
        if finished {
            info!(%player, place = self.state.order.len(), "seat finished");
        }

        self.state.record_move(MoveRecord {
            turn,
            player,
            roll,
            piece: Some(piece),
            steps: movement.steps,
            evictions,
            flew: movement.flew,
            finished,
        });
        self.notify(TurnEvent::end(player)).await;

        self.state.phase = TurnPhase::AdvanceOrRepeat;
        if !roll.is_six() || finished {
            self.state.current = player.next();
        }
        Ok(None)
    }

    async fn notify(&self, event: TurnEvent) {
        self.notifier.emit(event, &self.state).await;
    }

    async fn next_choice(&mut self, player: PlayerId) -> Result<crate::core::PieceId> {
        self.queue
            .pop()
            .await
            .ok_or(EngineError::ChoiceChannelClosed { player })
    }

    /// Suspension between two stops of one movement.
    async fn pace(&self) {
        if self.config.step_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.config.step_delay).await;
        }
    }
}
