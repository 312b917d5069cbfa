//! Move-choice delivery.
//!
//! Each replica owns one [`ChoiceQueue`]. A [`ChoiceRelay`] holds a sender
//! for every replica's queue and copies each submitted choice into all of
//! them, so every replica consumes the same choices in the same order.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::warn;

use crate::core::PieceId;

/// Create a connected sender/queue pair.
#[must_use]
pub fn choice_queue() -> (ChoiceSender, ChoiceQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChoiceSender { tx }, ChoiceQueue { rx })
}

/// Producer side of one replica's input queue.
#[derive(Clone, Debug)]
pub struct ChoiceSender {
    tx: mpsc::UnboundedSender<PieceId>,
}

impl ChoiceSender {
    /// Push a choice. Returns false if the queue has been dropped.
    pub fn push(&self, choice: PieceId) -> bool {
        self.tx.send(choice).is_ok()
    }
}

/// Consumer side of one replica's input queue.
#[derive(Debug)]
pub struct ChoiceQueue {
    rx: mpsc::UnboundedReceiver<PieceId>,
}

impl ChoiceQueue {
    /// Wait for the next choice. `None` once every sender is gone and the
    /// queue is drained.
    pub async fn pop(&mut self) -> Option<PieceId> {
        self.rx.recv().await
    }
}

/// Fan-out of submitted choices to every replica, in submission order.
#[derive(Clone, Debug)]
pub struct ChoiceRelay {
    targets: Arc<Mutex<Vec<ChoiceSender>>>,
}

impl ChoiceRelay {
    #[must_use]
    pub fn new(targets: Vec<ChoiceSender>) -> Self {
        Self {
            targets: Arc::new(Mutex::new(targets)),
        }
    }

    /// Relay to a single queue.
    #[must_use]
    pub fn single(target: ChoiceSender) -> Self {
        Self::new(vec![target])
    }

    /// Deliver `choice` to every replica.
    ///
    /// The lock is held for the whole fan-out so two submissions can never
    /// interleave across queues.
    pub fn submit(&self, choice: PieceId) {
        let targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        for (replica, target) in targets.iter().enumerate() {
            if !target.push(choice) {
                warn!(replica, %choice, "replica queue closed, choice dropped");
            }
        }
    }

    /// Number of replicas fed by this relay.
    #[must_use]
    pub fn replicas(&self) -> usize {
        self.targets.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
