use crate::events::{EventBus, EventSubscription, GameEvent};
use crate::settings::SessionSettings;
use inkflow_ai::{create_ai, AIOpponent};
use inkflow_engine::cards::CardId;
use inkflow_engine::engine::{Engine, Notice, Transition};
use inkflow_engine::errors::GameError;
use inkflow_engine::game::GameState;
use inkflow_engine::player::{PlayerAction, Seat};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub type SessionId = String;

/// One human against one CPU opponent.
///
/// The human's intents run synchronously against the engine. Whenever a
/// transition leaves the turn with the CPU, a single CPU turn is scheduled
/// on the tokio runtime after the configured delay. Starting a new game
/// cancels that pending turn; a turn that wakes up anyway finds a newer
/// epoch and discards itself.
///
/// Cloning is cheap and every clone drives the same game.
#[derive(Clone)]
pub struct GameSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    id: SessionId,
    settings: SessionSettings,
    engine: Mutex<Engine>,
    ai: Box<dyn AIOpponent>,
    bus: EventBus,
    runtime: Handle,
    /// Bumped by every new game; a CPU turn only applies to the epoch it was
    /// scheduled in
    epoch: AtomicU64,
    pending_cpu: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.inner.id)
            .field("ai", &self.inner.ai.name())
            .field("epoch", &self.epoch())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session and deals its first game. Must be called from
    /// within a tokio runtime.
    pub fn new(settings: SessionSettings, bus: EventBus) -> Result<Self, SessionError> {
        settings.validate()?;
        let ai = create_ai(&settings.ai)
            .ok_or_else(|| SessionError::UnknownAi(settings.ai.clone()))?;
        Self::with_ai(settings, bus, ai)
    }

    /// Like [`GameSession::new`] with a caller-supplied opponent.
    pub fn with_ai(
        settings: SessionSettings,
        bus: EventBus,
        ai: Box<dyn AIOpponent>,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let engine = Engine::new(settings.seed, settings.rules)?;
        let id = Uuid::new_v4().to_string();

        tracing::info!(
            session_id = %id,
            ai = ai.name(),
            cpu_delay_ms = settings.cpu_delay_ms,
            exhaustion = settings.rules.exhaustion.as_str(),
            "creating new game session"
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                id,
                settings,
                engine: Mutex::new(engine),
                ai,
                bus,
                runtime,
                epoch: AtomicU64::new(0),
                pending_cpu: Mutex::new(None),
            }),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.inner.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.inner.settings
    }

    pub fn ai_name(&self) -> &str {
        self.inner.ai.name()
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.inner.bus.subscribe(self.inner.id.clone())
    }

    pub fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// A copy of the current game.
    pub fn snapshot(&self) -> Result<GameState, SessionError> {
        Ok(self.inner.lock_engine()?.state().clone())
    }

    pub fn has_pending_cpu_turn(&self) -> bool {
        self.inner
            .pending_cpu
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Throws the current game away, cancelling any pending CPU turn, and
    /// deals a new one. The player always opens.
    pub fn start_new_game(&self) -> Result<GameState, SessionError> {
        let mut engine = self.inner.lock_engine()?;
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if self.inner.cancel_pending_cpu()? {
            tracing::debug!(
                session_id = %self.inner.id,
                epoch,
                "pending cpu turn cancelled by new game"
            );
        }
        let state = engine.start_new_game()?.clone();
        let game = engine.games_started();

        tracing::info!(session_id = %self.inner.id, game, epoch, "new game started");

        self.inner.bus.broadcast(
            &self.inner.id,
            GameEvent::GameStarted {
                session_id: self.inner.id.clone(),
                game,
                snapshot: state.clone(),
                notice: Notice::for_turn(state.turn()),
            },
        );
        Ok(state)
    }

    /// The human plays `card_id`.
    pub fn play_card(&self, card_id: CardId) -> Result<Transition, SessionError> {
        self.inner.human_action(PlayerAction::Play(card_id))
    }

    /// The human draws.
    pub fn draw_card(&self) -> Result<Transition, SessionError> {
        self.inner.human_action(PlayerAction::Draw)
    }

    #[cfg(test)]
    pub(crate) fn run_cpu_turn(&self, epoch: u64) -> Result<bool, SessionError> {
        SessionInner::run_cpu_turn(&self.inner, epoch)
    }
}

impl SessionInner {
    fn lock_engine(&self) -> Result<MutexGuard<'_, Engine>, SessionError> {
        self.engine.lock().map_err(|_| SessionError::StoragePoisoned)
    }

    /// Aborts the pending CPU task. Returns whether one was still running.
    fn cancel_pending_cpu(&self) -> Result<bool, SessionError> {
        let mut slot = self
            .pending_cpu
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        Ok(match slot.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        })
    }

    // Events are broadcast with the engine guard held, so subscribers see
    // them in the order the engine applied them.
    fn human_action(self: &Arc<Self>, action: PlayerAction) -> Result<Transition, SessionError> {
        let mut engine = self.lock_engine()?;
        let epoch = self.epoch.load(Ordering::SeqCst);

        match engine.apply_action(Seat::Player, action) {
            Ok(transition) => {
                self.publish(Seat::Player, &transition);
                self.schedule_cpu_if_needed(&transition.state, epoch)?;
                Ok(transition)
            }
            Err(e) => {
                tracing::debug!(
                    session_id = %self.id,
                    action = ?action,
                    error = %e,
                    "player action rejected"
                );
                if e.is_invalid_move() {
                    self.bus.broadcast(
                        &self.id,
                        GameEvent::ActionRejected {
                            session_id: self.id.clone(),
                            reason: e.to_string(),
                            notice: Notice::invalid_move(),
                        },
                    );
                }
                Err(e.into())
            }
        }
    }

    fn publish(&self, seat: Seat, transition: &Transition) {
        self.bus.broadcast(
            &self.id,
            GameEvent::StateChanged {
                session_id: self.id.clone(),
                seat,
                outcome: transition.outcome.clone(),
                snapshot: transition.state.clone(),
                notice: transition.notice(),
                intensity: transition.intensity(),
                reshuffled: transition.reshuffled,
            },
        );

        if let Some(winner) = transition.state.winner() {
            tracing::info!(session_id = %self.id, winner = %winner, "game over");
            self.bus.broadcast(
                &self.id,
                GameEvent::GameOver {
                    session_id: self.id.clone(),
                    winner,
                    snapshot: transition.state.clone(),
                },
            );
        }
    }

    fn schedule_cpu_if_needed(
        self: &Arc<Self>,
        state: &GameState,
        epoch: u64,
    ) -> Result<(), SessionError> {
        if state.is_over() || state.turn() != Seat::Cpu {
            return Ok(());
        }

        let delay = self.settings.cpu_delay();
        let weak: Weak<SessionInner> = Arc::downgrade(self);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(e) = SessionInner::run_cpu_turn(&inner, epoch) {
                tracing::error!(session_id = %inner.id, error = %e, "cpu turn failed");
            }
        });

        tracing::debug!(
            session_id = %self.id,
            epoch,
            delay_ms = self.settings.cpu_delay_ms,
            "cpu turn scheduled"
        );

        let mut slot = self
            .pending_cpu
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        // the previous handle, if any, belongs to the task now running
        *slot = Some(handle);
        Ok(())
    }

    /// Plays one CPU turn if `epoch` is still current. Returns whether an
    /// action was applied.
    fn run_cpu_turn(self: &Arc<Self>, epoch: u64) -> Result<bool, SessionError> {
        let mut engine = self.lock_engine()?;
        let current = self.epoch.load(Ordering::SeqCst);
        if current != epoch {
            tracing::debug!(
                session_id = %self.id,
                scheduled_epoch = epoch,
                current_epoch = current,
                "stale cpu turn discarded"
            );
            return Ok(false);
        }
        let state = engine.state();
        if state.is_over() || state.turn() != Seat::Cpu {
            return Ok(false);
        }

        let action = self.ai.get_action(state, Seat::Cpu);
        let transition = match engine.apply_action(Seat::Cpu, action) {
            Ok(t) => t,
            Err(e) => {
                // fall back to the one action that is always accepted
                tracing::warn!(
                    session_id = %self.id,
                    ai = self.ai.name(),
                    action = ?action,
                    error = %e,
                    "cpu opponent chose an illegal action, drawing instead"
                );
                engine.apply_action(Seat::Cpu, PlayerAction::Draw)?
            }
        };

        tracing::debug!(
            session_id = %self.id,
            outcome = ?transition.outcome,
            "cpu turn applied"
        );
        self.publish(Seat::Cpu, &transition);
        self.schedule_cpu_if_needed(&transition.state, epoch)?;
        Ok(true)
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.pending_cpu.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
        self.bus.drop_session(&self.id);
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Unknown AI: {0}")]
    UnknownAi(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Session storage poisoned")]
    StoragePoisoned,
    #[error("No tokio runtime to schedule cpu turns on")]
    NoRuntime,
}

impl SessionError {
    /// True when the human's intent was refused and the game is unchanged.
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, SessionError::Game(e) if e.is_invalid_move())
    }
}
