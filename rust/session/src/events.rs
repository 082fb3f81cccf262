use crate::session::SessionId;
use inkflow_engine::effects::Intensity;
use inkflow_engine::engine::{Notice, Outcome};
use inkflow_engine::game::GameState;
use inkflow_engine::player::Seat;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

// Per-subscriber queue depth. A subscriber this far behind is pruned.
const EVENT_CHANNEL_BUFFER: usize = 256;

pub type EventSender = mpsc::Sender<GameEvent>;
pub type EventReceiver = mpsc::Receiver<GameEvent>;

/// Receiving end handed to a presentation layer. Dropping it leaves the bus.
pub struct EventSubscription {
    bus: EventBus,
    session_id: SessionId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.session_id, self.subscriber_id);
    }
}

#[derive(Debug, Clone)]
struct Subscriber {
    id: usize,
    sender: EventSender,
}

type Registry = HashMap<SessionId, Vec<Subscriber>>;

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    sessions: RwLock<Registry>,
    next_id: AtomicUsize,
}

impl EventBusInner {
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, session_id: SessionId) -> EventSubscription {
        let (subscriber_id, receiver) = self.register(&session_id);
        EventSubscription {
            bus: self.clone(),
            session_id,
            subscriber_id,
            receiver,
        }
    }

    fn register(&self, session_id: &SessionId) -> (usize, EventReceiver) {
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .write()
            .entry(session_id.clone())
            .or_default()
            .push(Subscriber { id, sender });

        tracing::info!(session_id = %session_id, subscriber_id = id, "subscriber registered");
        (id, receiver)
    }

    /// Delivers `event` to every subscriber of `session_id` without waiting.
    /// Subscribers that are closed or full are pruned.
    pub fn broadcast(&self, session_id: &SessionId, event: GameEvent) {
        let targets = match self.inner.read().get(session_id) {
            Some(list) => list.clone(),
            None => {
                tracing::trace!(session_id = %session_id, event_type = event.kind(), "event has no audience");
                return;
            }
        };
        tracing::debug!(
            session_id = %session_id,
            event_type = event.kind(),
            subscribers = targets.len(),
            "publishing game event"
        );

        let lagging: Vec<usize> = targets
            .iter()
            .filter_map(|sub| match sub.sender.try_send(event.clone()) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        subscriber_id = sub.id,
                        error = %e,
                        "dropping subscriber"
                    );
                    Some(sub.id)
                }
            })
            .collect();

        if !lagging.is_empty() {
            self.prune(session_id, &lagging);
        }
    }

    pub fn unsubscribe(&self, session_id: &SessionId, subscriber_id: usize) {
        self.prune(session_id, &[subscriber_id]);
    }

    pub fn drop_session(&self, session_id: &SessionId) {
        self.inner.write().remove(session_id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.read().values().map(Vec::len).sum()
    }

    fn prune(&self, session_id: &SessionId, ids: &[usize]) {
        let mut sessions = self.inner.write();
        let emptied = match sessions.get_mut(session_id) {
            Some(list) => {
                list.retain(|sub| !ids.contains(&sub.id));
                list.is_empty()
            }
            None => false,
        };
        if emptied {
            sessions.remove(session_id);
        }
    }
}

/// Everything a presentation layer needs to redraw after a change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        session_id: SessionId,
        game: u32,
        snapshot: GameState,
        notice: Notice,
    },
    StateChanged {
        session_id: SessionId,
        seat: Seat,
        outcome: Outcome,
        snapshot: GameState,
        notice: Notice,
        intensity: Intensity,
        reshuffled: bool,
    },
    /// The human's intent was refused; the snapshot is unchanged.
    ActionRejected {
        session_id: SessionId,
        reason: String,
        notice: Notice,
    },
    GameOver {
        session_id: SessionId,
        winner: Seat,
        snapshot: GameState,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::StateChanged { .. } => "state_changed",
            GameEvent::ActionRejected { .. } => "action_rejected",
            GameEvent::GameOver { .. } => "game_over",
        }
    }

    pub fn session_id(&self) -> &SessionId {
        match self {
            GameEvent::GameStarted { session_id, .. }
            | GameEvent::StateChanged { session_id, .. }
            | GameEvent::ActionRejected { session_id, .. }
            | GameEvent::GameOver { session_id, .. } => session_id,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
