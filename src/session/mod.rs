//! Local four-replica sessions.
//!
//! A session runs one [`TurnEngine`] per seat, as if every seat's machine
//! held its own copy of the game. Each seat's [`Client`] listens to its own
//! replica and submits choices through a shared [`ChoiceRelay`], so all
//! replicas consume the same choices in the same order. Together with the
//! shared seed this keeps the replicas in lockstep; [`SessionHandle::join`]
//! checks that they actually ended in the same state.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, info_span, warn, Instrument};

use crate::ai::StrategyKind;
use crate::core::{GameRng, GameSnapshot, PlayerId, PlayerMap, SessionConfig, SEATS};
use crate::error::{EngineError, Result};
use crate::protocol::{choice_queue, AiNegotiator, ChoiceRelay, Client, Negotiator, TurnListener};
use crate::rules::{GameOutcome, TurnEngine};

/// A session that has been wired up but not started.
#[derive(Debug)]
pub struct LocalSession {
    config: SessionConfig,
    engines: Vec<TurnEngine>,
    clients: PlayerMap<Arc<Client>>,
}

impl LocalSession {
    /// Wire four replicas, one negotiator per seat.
    #[must_use]
    pub fn new(config: SessionConfig, negotiators: [Arc<dyn Negotiator>; SEATS]) -> Self {
        let mut senders = Vec::with_capacity(SEATS);
        let mut engines = Vec::with_capacity(SEATS);
        for _ in 0..SEATS {
            let (tx, queue) = choice_queue();
            senders.push(tx);
            engines.push(TurnEngine::new(config.clone(), queue));
        }
        let relay = ChoiceRelay::new(senders);

        let clients = PlayerMap::from_array(negotiators)
            .map(|seat, negotiator| Arc::new(Client::new(seat, negotiator, relay.clone())));

        for (seat, client) in clients.iter() {
            engines[seat.index()].subscribe(client.clone());
        }

        Self {
            config,
            engines,
            clients,
        }
    }

    /// Session where every seat is played by an AI strategy.
    ///
    /// Randomized strategies draw from a stream derived from the session
    /// seed, so the whole game is reproducible.
    #[must_use]
    pub fn ai(config: SessionConfig, kinds: [StrategyKind; SEATS]) -> Self {
        let base = GameRng::from_seed_str(&config.seed);
        let negotiators = PlayerMap::new(|seat| {
            let rng = base.for_context(&format!("ai-{}", seat.index()));
            Arc::new(AiNegotiator::new(kinds[seat.index()].build(rng))) as Arc<dyn Negotiator>
        });
        Self::new(config, negotiators.into_array())
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The client bound to `seat` on its own replica.
    #[must_use]
    pub fn client(&self, seat: PlayerId) -> Arc<Client> {
        self.clients[seat].clone()
    }

    /// Attach an extra listener (renderer, logger) to one replica.
    pub fn subscribe(&mut self, replica: PlayerId, listener: Arc<dyn TurnListener>) {
        self.engines[replica.index()].subscribe(listener);
    }

    /// Spawn every replica onto the current runtime.
    #[must_use]
    pub fn start(self) -> SessionHandle {
        info!(seed = %self.config.seed, rule = ?self.config.win_rule, "session starting");
        let mut tasks = JoinSet::new();
        for (replica, mut engine) in self.engines.into_iter().enumerate() {
            let span = info_span!("replica", replica);
            tasks.spawn(
                async move {
                    let result = engine
                        .play()
                        .await
                        .map(|outcome| (outcome, engine.state().snapshot()));
                    (replica, result)
                }
                .instrument(span),
            );
        }
        SessionHandle { tasks }
    }

    /// Start the session and wait for it to finish.
    pub async fn run(self) -> Result<GameOutcome> {
        self.start().join().await
    }
}

type ReplicaResult = Result<(GameOutcome, GameSnapshot)>;

/// Running session.
///
/// Dropping the handle aborts every replica still running.
#[derive(Debug)]
pub struct SessionHandle {
    tasks: JoinSet<(usize, ReplicaResult)>,
}

impl SessionHandle {
    /// Wait for every replica and check that they agree.
    ///
    /// Replicas are collected in completion order. The first failure aborts
    /// the rest and is returned; a stalled replica can never hide a failed
    /// one.
    pub async fn join(mut self) -> Result<GameOutcome> {
        let mut finished = Vec::with_capacity(self.tasks.len());
        while let Some(joined) = self.tasks.join_next().await {
            let (replica, result) = match joined {
                Ok(done) => done,
                Err(err) => {
                    self.tasks.abort_all();
                    warn!(%err, "replica task failed, aborting session");
                    return Err(EngineError::ReplicaFailed(err.to_string()));
                }
            };
            match result {
                Ok(done) => finished.push((replica, done)),
                Err(err) => {
                    self.tasks.abort_all();
                    warn!(replica, %err, "replica failed, aborting session");
                    return Err(err);
                }
            }
        }
        finished.sort_by_key(|(replica, _)| *replica);

        let Some((_, (outcome, snapshot))) = finished.first() else {
            return Err(EngineError::ReplicaFailed("session has no replicas".into()));
        };
        let expected = snapshot.fingerprint()?;
        for (replica, (other, snapshot)) in finished.iter().skip(1) {
            if other != outcome {
                return Err(EngineError::ReplicaDivergence {
                    detail: format!("replica {replica} outcome {other:?} != {outcome:?}"),
                });
            }
            if snapshot.fingerprint()? != expected {
                return Err(EngineError::ReplicaDivergence {
                    detail: format!("replica {replica} final state differs"),
                });
            }
        }

        info!(order = ?outcome.order, winners = ?outcome.winners, turns = outcome.turns, "session finished");
        Ok(outcome.clone())
    }

    /// Abort every replica.
    pub fn abort(&mut self) {
        self.tasks.abort_all();
    }
}
