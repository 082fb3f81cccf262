use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, DECK_SIZE};
use crate::errors::GameError;

/// Cards dealt to each seat at the start of a game.
pub const HAND_SIZE: usize = 7;

/// Cards the opponent takes when a King is played.
pub const ATTACK_DRAW: usize = 2;

/// Decides whether `card` may be placed on `top`.
///
/// A Seven is wild and always legal. Any other card must share the suit
/// or the rank of the current discard top.
///
/// # Examples
///
/// ```
/// use inkflow_engine::cards::{Card, CardId, Rank, Suit};
/// use inkflow_engine::rules::is_valid_move;
///
/// let top = Card::new(CardId::new(0), Suit::Dragon, Rank::Three);
/// let same_suit = Card::new(CardId::new(1), Suit::Dragon, Rank::Nine);
/// let same_rank = Card::new(CardId::new(2), Suit::Tiger, Rank::Three);
/// let wild = Card::new(CardId::new(3), Suit::Turtle, Rank::Seven);
/// let neither = Card::new(CardId::new(4), Suit::Phoenix, Rank::King);
///
/// assert!(is_valid_move(&same_suit, &top));
/// assert!(is_valid_move(&same_rank, &top));
/// assert!(is_valid_move(&wild, &top));
/// assert!(!is_valid_move(&neither, &top));
/// ```
pub fn is_valid_move(card: &Card, top: &Card) -> bool {
    card.rank == Rank::Seven || card.suit == top.suit || card.rank == top.rank
}

/// Cards of `hand` that may be played on `top`, in hand order.
pub fn legal_moves<'a>(hand: &'a [Card], top: &'a Card) -> impl Iterator<Item = &'a Card> + 'a {
    hand.iter().filter(move |c| is_valid_move(c, top))
}

/// What happens when a seat must draw and the deck is empty.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// A voluntary draw from an empty deck loses the game for the drawer.
    #[default]
    Forfeit,
    /// Cards under the discard top are shuffled back into the deck first.
    /// Forfeit still applies when there is nothing to recycle.
    ReshuffleDiscard,
}

impl ExhaustionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ExhaustionPolicy::Forfeit => "forfeit",
            ExhaustionPolicy::ReshuffleDiscard => "reshuffle_discard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "forfeit" => Some(ExhaustionPolicy::Forfeit),
            "reshuffle" | "reshuffle_discard" => Some(ExhaustionPolicy::ReshuffleDiscard),
            _ => None,
        }
    }
}

/// Table rules a game is played under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Cards dealt to each seat
    pub hand_size: usize,
    /// Cards the opponent draws after a King
    pub attack_draw: usize,
    /// Behavior of a draw against an empty deck
    pub exhaustion: ExhaustionPolicy,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            hand_size: HAND_SIZE,
            attack_draw: ATTACK_DRAW,
            exhaustion: ExhaustionPolicy::default(),
        }
    }
}

impl RuleSet {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.hand_size == 0 {
            return Err(GameError::InvalidRules("hand_size must be >= 1".into()));
        }
        if self.attack_draw == 0 {
            return Err(GameError::InvalidRules("attack_draw must be >= 1".into()));
        }
        // both hands plus the flipped top card
        let needed = self.cards_needed_to_deal();
        if needed > DECK_SIZE {
            return Err(GameError::InvalidRules(format!(
                "hand_size {} needs {} cards to deal, deck has {}",
                self.hand_size, needed, DECK_SIZE
            )));
        }
        Ok(())
    }

    pub fn cards_needed_to_deal(&self) -> usize {
        self.hand_size.saturating_mul(2).saturating_add(1)
    }
}
