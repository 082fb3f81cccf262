//! # inkflow-ai: CPU opponents for One Card
//!
//! Provides the CPU side of a game. Every opponent answers the same
//! question: given the current snapshot and the seat it plays, which
//! [`PlayerAction`] comes next.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for CPU decision-making
//! - [`baseline`] - The greedy special-card-first policy
//! - [`create_ai`] - Factory function for creating opponents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use inkflow_ai::{create_ai, AIOpponent};
//! use inkflow_engine::engine::Engine;
//! use inkflow_engine::player::Seat;
//! use inkflow_engine::rules::RuleSet;
//!
//! let ai = create_ai("baseline").expect("baseline is registered");
//!
//! let mut engine = Engine::new(Some(42), RuleSet::default()).unwrap();
//! engine.draw_card(Seat::Player).unwrap();
//!
//! let action = ai.get_action(engine.state(), Seat::Cpu);
//! engine.apply_action(Seat::Cpu, action).unwrap();
//! ```
//!
//! ## AI Types
//!
//! Currently supported AI types:
//! - `"baseline"` - Plays the first legal special card, else the first legal card, else draws

use inkflow_engine::game::GameState;
use inkflow_engine::player::{PlayerAction, Seat};

pub mod baseline;

/// Names accepted by [`create_ai`].
pub const AVAILABLE_AIS: &[&str] = &["baseline"];

/// Trait defining the interface for CPU opponents.
///
/// Implementations must be deterministic for a given snapshot and must
/// only return actions the engine would accept for `seat`: a legal card
/// from that seat's hand, or a draw.
///
/// # Example Implementation
///
/// ```rust
/// use inkflow_ai::AIOpponent;
/// use inkflow_engine::game::GameState;
/// use inkflow_engine::player::{PlayerAction, Seat};
///
/// struct AlwaysDraw;
///
/// impl AIOpponent for AlwaysDraw {
///     fn get_action(&self, _state: &GameState, _seat: Seat) -> PlayerAction {
///         PlayerAction::Draw
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysDraw"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Determine the next action for `seat` in `state`.
    ///
    /// Called only while `seat` holds the turn of an unfinished game.
    fn get_action(&self, state: &GameState, seat: Seat) -> PlayerAction;

    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Factory function to create CPU opponents by type string.
///
/// Returns `None` for names not listed in [`AVAILABLE_AIS`].
///
/// # Example
///
/// ```rust
/// use inkflow_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("grandmaster").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        _ => None,
    }
}
