use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a full deck: one per (suit, rank) pair.
pub const DECK_SIZE: usize = 52;

/// One of the four suits of the deck.
/// Suits only classify cards; the match rule compares them for equality.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Dragon (blue)
    Dragon,
    /// Phoenix (red)
    Phoenix,
    /// Tiger (silver)
    Tiger,
    /// Turtle (black)
    Turtle,
}

impl Suit {
    pub fn name(self) -> &'static str {
        match self {
            Suit::Dragon => "Dragon",
            Suit::Phoenix => "Phoenix",
            Suit::Tiger => "Tiger",
            Suit::Turtle => "Turtle",
        }
    }

    /// Pictographic symbol used by terminal and web renderers.
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Dragon => "🐉",
            Suit::Phoenix => "🪶",
            Suit::Tiger => "🐯",
            Suit::Turtle => "🐢",
        }
    }

    /// Ink color for rendering. Never consulted by the rules.
    pub fn color_hex(self) -> &'static str {
        match self {
            Suit::Dragon => "#0ea5e9",
            Suit::Phoenix => "#ef4444",
            Suit::Tiger => "#57534e",
            Suit::Turtle => "#000000",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Face value of a card, Ace through King.
///
/// Seven, Jack, Queen and King are special ranks that trigger an effect
/// when played (see [`crate::effects`]); the rest are plain.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7, wild ("change shape")
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack, "jump"
    Jack,
    /// Queen, "reverse"
    Queen,
    /// King, "attack"
    King,
}

impl Rank {
    pub fn is_special(self) -> bool {
        matches!(self, Rank::Seven | Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        let label = label.trim();
        all_ranks()
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identity of a card within one deck.
///
/// Assigned from a counter while the deck is built, so ids run 0..52 and
/// are never reused inside a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u8);

impl CardId {
    pub fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single card. Hands, the draw pile and the discard pile all hold these.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity used to locate the card in a hand
    pub id: CardId,
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card
    pub rank: Rank,
}

impl Card {
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rank, self.suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Dragon, Suit::Phoenix, Suit::Tiger, Suit::Turtle]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// Builds the 52 cards in fixed suit-then-rank order, numbering ids as it goes.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    let mut next_id: u8 = 0;
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(CardId(next_id), s, r));
            next_id += 1;
        }
    }
    v
}
