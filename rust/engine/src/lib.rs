//! # inkflow-engine: One Card Rules Engine
//!
//! A deterministic engine for the two-seat (player vs. CPU) "One Card"
//! game of Ink Flow. Seats take turns discarding a card that matches the
//! discard top by suit or rank; the first to empty their hand wins.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, CardId, Card) and deck construction
//! - [`deck`] - Seeded shuffling, the draw pile and the discard pile
//! - [`rules`] - Move legality and the table's [`rules::RuleSet`]
//! - [`effects`] - Special-rank effects (jump, reverse, attack, change shape)
//! - [`game`] - The authoritative [`game::GameState`] snapshot
//! - [`engine`] - Action application and the stateful [`engine::Engine`]
//! - [`player`] - Seats and player intents
//! - [`errors`] - Error types for rejected actions
//!
//! ## Quick Start
//!
//! ```rust
//! use inkflow_engine::engine::Engine;
//! use inkflow_engine::player::{PlayerAction, Seat};
//! use inkflow_engine::rules::{legal_moves, RuleSet};
//!
//! let mut engine = Engine::new(Some(42), RuleSet::default()).unwrap();
//! let state = engine.state().clone();
//!
//! let action = match legal_moves(state.player_hand(), state.top_card()).next() {
//!     Some(card) => PlayerAction::Play(card.id),
//!     None => PlayerAction::Draw,
//! };
//! let transition = engine.apply_action(Seat::Player, action).unwrap();
//! println!("{}", transition.notice().text);
//! assert_eq!(transition.state.card_count(), 52);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Shuffles come from a seeded ChaCha20 stream, so a seed replays a game:
//!
//! ```rust
//! use inkflow_engine::deck::build_deck_with_seed;
//!
//! assert_eq!(build_deck_with_seed(42), build_deck_with_seed(42));
//! ```
//!
//! ## Rejected Actions
//!
//! Actions out of turn, after the game ended, or with a card that does not
//! match come back as a [`errors::GameError`]; the state is left as it was.
//!
//! ```rust
//! use inkflow_engine::engine::draw_card;
//! use inkflow_engine::errors::GameError;
//! use inkflow_engine::game::GameState;
//! use inkflow_engine::player::Seat;
//! use inkflow_engine::rules::RuleSet;
//!
//! let rules = RuleSet::default();
//! let state = GameState::new_with_seed(1, &rules).unwrap();
//! let err = draw_card(&state, &rules, Seat::Cpu).unwrap_err();
//! assert!(matches!(err, GameError::NotYourTurn { .. }));
//! assert!(err.is_invalid_move());
//! ```

pub mod cards;
pub mod deck;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod game;
pub mod player;
pub mod rules;
