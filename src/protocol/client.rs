//! A seat's presence at one replica: negotiator plus choice submission.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameState, PlayerId, Roll};

use super::channel::ChoiceRelay;
use super::event::{TurnEvent, TurnListener};
use super::negotiator::{Negotiator, TurnContext};

/// What a seat's renderer needs to know about the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    /// Acting seat.
    pub current: PlayerId,
    /// The viewing seat is the acting seat.
    pub my_turn: bool,
    /// Latest roll.
    pub roll: Roll,
}

impl SeatView {
    /// Project `state` onto `seat`.
    #[must_use]
    pub fn project(state: &GameState, seat: PlayerId) -> Self {
        Self {
            current: state.current,
            my_turn: state.current == seat,
            roll: state.roll,
        }
    }
}

/// Listener that answers Start events for its own seat.
///
/// On every event it refreshes its [`SeatView`]. When a turn starts for its
/// seat it asks the negotiator for a piece and submits the answer through
/// the relay.
pub struct Client {
    seat: PlayerId,
    negotiator: Arc<dyn Negotiator>,
    relay: ChoiceRelay,
    view: Mutex<Option<SeatView>>,
}

impl Client {
    #[must_use]
    pub fn new(seat: PlayerId, negotiator: Arc<dyn Negotiator>, relay: ChoiceRelay) -> Self {
        Self {
            seat,
            negotiator,
            relay,
            view: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    /// View as of the last event received. `None` before the first event.
    #[must_use]
    pub fn view(&self) -> Option<SeatView> {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("seat", &self.seat)
            .field("view", &self.view())
            .finish()
    }
}

#[async_trait]
impl TurnListener for Client {
    async fn on_event(&self, event: TurnEvent, state: &GameState) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(SeatView::project(state, self.seat));

        if !event.is_start() || event.player != self.seat {
            return;
        }

        let turn = TurnContext::new(self.seat, state);
        let choice = self.negotiator.decide(&turn).await;
        debug!(seat = %self.seat, %choice, "submitting choice");
        self.relay.submit(choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicStrategy;
    use crate::core::{Board, PieceId};
    use crate::protocol::channel::choice_queue;
    use crate::protocol::negotiator::AiNegotiator;

    fn client(seat: u8) -> (Client, crate::protocol::ChoiceQueue) {
        let (tx, queue) = choice_queue();
        let negotiator = Arc::new(AiNegotiator::new(Box::new(HeuristicStrategy)));
        (Client::new(PlayerId::new(seat), negotiator, ChoiceRelay::single(tx)), queue)
    }

    #[test]
    fn test_project() {
        let mut state = GameState::from_seed("view");
        state.current = PlayerId::new(3);
        state.roll = Roll::new(4);

        let mine = SeatView::project(&state, PlayerId::new(3));
        let theirs = SeatView::project(&state, PlayerId::new(0));

        assert!(mine.my_turn);
        assert!(!theirs.my_turn);
        assert_eq!(theirs.current, PlayerId::new(3));
        assert_eq!(theirs.roll, Roll::new(4));
    }

    #[tokio::test]
    async fn test_answers_only_own_start() {
        let (client, mut queue) = client(1);
        assert_eq!(client.view(), None);

        let mut state = GameState::from_seed("client");
        state.board = Board::from_raw([[-1; 4], [10, -1, 56, 20], [-1; 4], [-1; 4]]);
        state.roll = Roll::new(4);

        state.current = PlayerId::new(0);
        client.on_event(TurnEvent::start(PlayerId::new(0)), &state).await;
        assert!(!client.view().unwrap().my_turn);

        state.current = PlayerId::new(1);
        client.on_event(TurnEvent::end(PlayerId::new(1)), &state).await;
        client.on_event(TurnEvent::start(PlayerId::new(1)), &state).await;
        assert!(client.view().unwrap().my_turn);

        assert_eq!(queue.pop().await, Some(PieceId::new(0)));
        drop(client);
        assert_eq!(queue.pop().await, None, "exactly one choice submitted");
    }
}
