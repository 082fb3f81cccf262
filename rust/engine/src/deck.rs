use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};

/// Builds a full deck and returns it in uniformly random order.
///
/// `SliceRandom::shuffle` is an in-place backward Fisher–Yates pass, so
/// every one of the 52! orderings is equally likely for a uniform `rng`.
pub fn build_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = full_deck();
    cards.shuffle(rng);
    cards
}

/// Same as [`build_deck`] with a ChaCha20 stream; equal seeds give equal decks.
pub fn build_deck_with_seed(seed: u64) -> Vec<Card> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    build_deck(&mut rng)
}

/// Undealt cards. The front is the next card drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawPile {
    cards: VecDeque<Card>,
}

impl DrawPile {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Draws up to `n` cards; fewer come back when the pile runs out.
    pub fn draw_up_to(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Appends cards to the back of the pile.
    pub fn refill(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// Played cards. The active top card lives apart from the cards under it,
/// so the pile can never be empty once a game has been dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardPile {
    top: Card,
    below: Vec<Card>,
}

impl DiscardPile {
    pub fn new(top: Card) -> Self {
        Self {
            top,
            below: Vec::new(),
        }
    }

    /// The card the next play must match.
    pub fn top(&self) -> &Card {
        &self.top
    }

    pub fn push(&mut self, card: Card) {
        let previous = std::mem::replace(&mut self.top, card);
        self.below.push(previous);
    }

    /// Removes every card under the top, oldest first. The top stays.
    pub fn take_below(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.below)
    }

    pub fn len(&self) -> usize {
        self.below.len() + 1
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.below.iter().chain(std::iter::once(&self.top))
    }
}
