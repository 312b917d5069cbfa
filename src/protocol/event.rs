//! Turn notifications.
//!
//! The engine announces the start and end of every turn. Delivery is an
//! awaited multicast: [`TurnNotifier::emit`] returns only after every
//! subscribed listener has finished handling the event, so a negotiator can
//! make its decision before the engine goes on to wait for it.
//!
//! A turn is one or more Starts followed by a single End. Start repeats
//! within a turn each time the engine rejects an illegal choice, which
//! prompts the acting seat again.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Start or end of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEventKind {
    Start,
    End,
}

/// A turn notification addressed to the whole table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnEvent {
    pub kind: TurnEventKind,
    /// The acting seat.
    pub player: PlayerId,
}

impl TurnEvent {
    #[must_use]
    pub const fn start(player: PlayerId) -> Self {
        Self {
            kind: TurnEventKind::Start,
            player,
        }
    }

    #[must_use]
    pub const fn end(player: PlayerId) -> Self {
        Self {
            kind: TurnEventKind::End,
            player,
        }
    }

    #[must_use]
    pub fn is_start(&self) -> bool {
        self.kind == TurnEventKind::Start
    }
}

/// Something that reacts to turn notifications.
///
/// `state` is the emitting replica's state at the moment of the event. It is
/// only borrowed for the duration of the call; clone what must outlive it.
#[async_trait]
pub trait TurnListener: Send + Sync {
    async fn on_event(&self, event: TurnEvent, state: &GameState);
}

/// Ordered set of listeners bound to one engine.
#[derive(Clone, Default)]
pub struct TurnNotifier {
    listeners: Vec<Arc<dyn TurnListener>>,
}

impl TurnNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a listener. Listeners are notified in subscription order.
    pub fn subscribe(&mut self, listener: Arc<dyn TurnListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener, one after another, and wait for
    /// all of them.
    pub async fn emit(&self, event: TurnEvent, state: &GameState) {
        for listener in &self.listeners {
            listener.on_event(event, state).await;
        }
    }
}

impl std::fmt::Debug for TurnNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener that keeps every event it sees, for renderers and tests.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<TurnEvent>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events received so far.
    #[must_use]
    pub fn events(&self) -> Vec<TurnEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TurnListener for EventLog {
    async fn on_event(&self, event: TurnEvent, _state: &GameState) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
