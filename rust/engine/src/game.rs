use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, DECK_SIZE};
use crate::deck::{build_deck_with_seed, DiscardPile, DrawPile};
use crate::errors::GameError;
use crate::player::Seat;
use crate::rules::RuleSet;

/// Where a game stands, derived from `turn` and `winner`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GamePhase {
    PlayerTurn,
    CpuTurn,
    GameOver { winner: Seat },
}

/// Authoritative snapshot of one game.
///
/// Every card of the deck sits in exactly one of the draw pile, the
/// discard pile or a hand. Values are never edited in place by callers:
/// the engine clones a snapshot, applies one action to the clone and hands
/// the result back, so a rejected action leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the deck was shuffled with; also drives discard reshuffles
    seed: u64,
    deck: DrawPile,
    discard: DiscardPile,
    player_hand: Vec<Card>,
    cpu_hand: Vec<Card>,
    /// The only seat allowed to act next
    turn: Seat,
    winner: Option<Seat>,
    /// Number of times the discard pile was recycled into the deck
    reshuffles: u32,
}

impl GameState {
    /// Shuffles a fresh deck with `seed` and deals it.
    pub fn new_with_seed(seed: u64, rules: &RuleSet) -> Result<Self, GameError> {
        let mut state = Self::deal(build_deck_with_seed(seed), rules)?;
        state.seed = seed;
        Ok(state)
    }

    /// Deals `cards` in order: a hand to the player, a hand to the CPU,
    /// then one card face up as the discard top. The rest is the deck.
    /// The player always moves first.
    pub fn deal(cards: Vec<Card>, rules: &RuleSet) -> Result<Self, GameError> {
        rules.validate()?;
        let needed = rules.cards_needed_to_deal();
        if cards.len() < needed {
            return Err(GameError::NotEnoughCards {
                needed,
                available: cards.len(),
            });
        }
        let mut pile = DrawPile::new(cards);
        let player_hand = pile.draw_up_to(rules.hand_size);
        let cpu_hand = pile.draw_up_to(rules.hand_size);
        let top = pile.draw().ok_or(GameError::NotEnoughCards {
            needed,
            available: needed - 1,
        })?;
        Ok(Self {
            seed: 0,
            deck: pile,
            discard: DiscardPile::new(top),
            player_hand,
            cpu_hand,
            turn: Seat::Player,
            winner: None,
            reshuffles: 0,
        })
    }

    /// Assembles a mid-game position. `discard` is bottom to top and must
    /// not be empty; all zones together must hold the 52 distinct cards.
    pub fn from_parts(
        deck: Vec<Card>,
        discard: Vec<Card>,
        player_hand: Vec<Card>,
        cpu_hand: Vec<Card>,
        turn: Seat,
    ) -> Result<Self, GameError> {
        let mut discard_iter = discard.into_iter();
        let first = discard_iter
            .next()
            .ok_or_else(|| GameError::InvalidState("discard pile is empty".into()))?;
        let mut pile = DiscardPile::new(first);
        for card in discard_iter {
            pile.push(card);
        }
        let state = Self {
            seed: 0,
            deck: DrawPile::new(deck),
            discard: pile,
            player_hand,
            cpu_hand,
            turn,
            winner: None,
            reshuffles: 0,
        };
        state.check_conservation()?;
        Ok(state)
    }

    /// Replaces the seed used for discard reshuffles.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn deck(&self) -> &DrawPile {
        &self.deck
    }
    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard
    }
    /// The card the next play must match.
    pub fn top_card(&self) -> &Card {
        self.discard.top()
    }
    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }
    pub fn cpu_hand(&self) -> &[Card] {
        &self.cpu_hand
    }
    pub fn hand(&self, seat: Seat) -> &[Card] {
        match seat {
            Seat::Player => &self.player_hand,
            Seat::Cpu => &self.cpu_hand,
        }
    }
    pub fn turn(&self) -> Seat {
        self.turn
    }
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn phase(&self) -> GamePhase {
        match (self.winner, self.turn) {
            (Some(winner), _) => GamePhase::GameOver { winner },
            (None, Seat::Player) => GamePhase::PlayerTurn,
            (None, Seat::Cpu) => GamePhase::CpuTurn,
        }
    }

    /// Cards across all four zones. Always 52 for a dealt game.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.player_hand.len() + self.cpu_hand.len()
    }

    pub fn find_in_hand(&self, seat: Seat, id: CardId) -> Option<&Card> {
        self.hand(seat).iter().find(|c| c.id == id)
    }

    /// Verifies that the zones hold 52 distinct cards.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let count = self.card_count();
        if count != DECK_SIZE {
            return Err(GameError::InvalidState(format!(
                "{} cards in play, expected {}",
                count, DECK_SIZE
            )));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        let all = self
            .deck
            .iter()
            .chain(self.discard.iter())
            .chain(self.player_hand.iter())
            .chain(self.cpu_hand.iter());
        for card in all {
            if !seen.insert((card.suit, card.rank)) {
                return Err(GameError::InvalidState(format!("{} appears twice", card)));
            }
        }
        Ok(())
    }

    pub(crate) fn hand_mut(&mut self, seat: Seat) -> &mut Vec<Card> {
        match seat {
            Seat::Player => &mut self.player_hand,
            Seat::Cpu => &mut self.cpu_hand,
        }
    }
    pub(crate) fn deck_mut(&mut self) -> &mut DrawPile {
        &mut self.deck
    }
    pub(crate) fn discard_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }
    pub(crate) fn set_turn(&mut self, seat: Seat) {
        self.turn = seat;
    }
    pub(crate) fn set_winner(&mut self, seat: Seat) {
        self.winner = Some(seat);
    }
    pub(crate) fn bump_reshuffles(&mut self) -> u32 {
        self.reshuffles += 1;
        self.reshuffles
    }
}
