//! Move negotiation between the turn engine and its clients.
//!
//! The engine side:
//! - [`TurnNotifier`] delivers Start/End events to [`TurnListener`]s and
//!   awaits them
//! - [`ChoiceQueue`] yields the choices the engine consumes
//!
//! The client side:
//! - [`Negotiator`] decides a piece for a started turn
//!   ([`AiNegotiator`], [`HumanNegotiator`])
//! - [`Client`] binds a negotiator to a seat and submits its choices through
//!   a [`ChoiceRelay`], which copies them into every replica's queue
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use flying_chess::ai::HeuristicStrategy;
//! use flying_chess::core::PlayerId;
//! use flying_chess::protocol::{choice_queue, AiNegotiator, ChoiceRelay, Client};
//!
//! let (tx, _queue) = choice_queue();
//! let negotiator = Arc::new(AiNegotiator::new(Box::new(HeuristicStrategy)));
//! let client = Client::new(PlayerId::new(0), negotiator, ChoiceRelay::single(tx));
//! assert_eq!(client.seat(), PlayerId::new(0));
//! ```

mod channel;
mod client;
mod event;
mod negotiator;

pub use channel::{choice_queue, ChoiceQueue, ChoiceRelay, ChoiceSender};
pub use client::{Client, SeatView};
pub use event::{EventLog, TurnEvent, TurnEventKind, TurnListener, TurnNotifier};
pub use negotiator::{
    forced_choice, AiNegotiator, HumanInput, HumanNegotiator, Negotiator, TurnContext,
};
