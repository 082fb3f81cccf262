use crate::cards::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two parties at the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// The human player, who always opens the game
    Player,
    /// The computer opponent
    Cpu,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::Player => Seat::Cpu,
            Seat::Cpu => Seat::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::Player => "player",
            Seat::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intent submitted on a seat's turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "card", rename_all = "lowercase")]
pub enum PlayerAction {
    /// Play the card with this id from the acting hand
    Play(CardId),
    /// Take the next card from the deck and pass the turn
    Draw,
}
