//! Greedy CPU policy.
//!
//! No lookahead and no randomness: the same hand and top card always give
//! the same answer, which keeps simulations reproducible.

use crate::AIOpponent;
use inkflow_engine::cards::Card;
use inkflow_engine::game::GameState;
use inkflow_engine::player::{PlayerAction, Seat};
use inkflow_engine::rules::legal_moves;

/// Picks the CPU's move from `hand` against `top`.
///
/// Legal cards are stable-sorted so special ranks (King, Jack, Queen,
/// Seven) come before the rest, and the first one is played. Hand order
/// decides among specials and among plain cards. With no legal card the
/// answer is [`PlayerAction::Draw`].
///
/// # Example
///
/// ```rust
/// use inkflow_ai::baseline::choose_cpu_action;
/// use inkflow_engine::cards::{Card, CardId, Rank, Suit};
/// use inkflow_engine::player::PlayerAction;
///
/// let top = Card::new(CardId::new(0), Suit::Phoenix, Rank::Four);
/// let three = Card::new(CardId::new(1), Suit::Phoenix, Rank::Three);
/// let king = Card::new(CardId::new(2), Suit::Phoenix, Rank::King);
///
/// assert_eq!(choose_cpu_action(&[three, king], &top), PlayerAction::Play(king.id));
/// assert_eq!(choose_cpu_action(&[], &top), PlayerAction::Draw);
/// ```
pub fn choose_cpu_action(hand: &[Card], top: &Card) -> PlayerAction {
    let mut candidates: Vec<&Card> = legal_moves(hand, top).collect();
    // sort_by_key is stable; false sorts first
    candidates.sort_by_key(|c| !c.rank.is_special());
    match candidates.first() {
        Some(card) => PlayerAction::Play(card.id),
        None => PlayerAction::Draw,
    }
}

/// The default CPU opponent, a thin [`AIOpponent`] wrapper over
/// [`choose_cpu_action`].
///
/// # Example
///
/// ```rust
/// use inkflow_ai::baseline::BaselineAI;
/// use inkflow_ai::AIOpponent;
/// use inkflow_engine::game::GameState;
/// use inkflow_engine::player::{PlayerAction, Seat};
/// use inkflow_engine::rules::RuleSet;
///
/// let ai = BaselineAI::new();
/// let state = GameState::new_with_seed(42, &RuleSet::default()).unwrap();
/// match ai.get_action(&state, Seat::Player) {
///     PlayerAction::Play(id) => assert!(state.find_in_hand(Seat::Player, id).is_some()),
///     PlayerAction::Draw => {}
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl AIOpponent for BaselineAI {
    fn get_action(&self, state: &GameState, seat: Seat) -> PlayerAction {
        choose_cpu_action(state.hand(seat), state.top_card())
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}
