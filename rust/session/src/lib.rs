//! Session controller for One Card.
//!
//! A [`GameSession`] sits between a presentation layer and the engine: it
//! forwards the human's intents, runs the CPU on a cancelable timer and
//! pushes a [`GameEvent`] with the new snapshot after every change.

pub mod events;
pub mod logging;
pub mod session;
pub mod settings;

pub use events::{EventBus, EventSubscription, GameEvent};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use session::{GameSession, SessionError, SessionId};
pub use settings::SessionSettings;
