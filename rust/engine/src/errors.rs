use thiserror::Error;

use crate::cards::{Card, CardId};
use crate::player::Seat;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotYourTurn { expected: Seat, actual: Seat },
    #[error("Game already over, {winner} won")]
    GameAlreadyOver { winner: Seat },
    #[error("Card {0} is not in the acting hand")]
    CardNotInHand(CardId),
    #[error("Invalid move: {card} does not match {top}")]
    IllegalMove { card: Card, top: Card },
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
    #[error("Not enough cards to deal: need {needed}, have {available}")]
    NotEnoughCards { needed: usize, available: usize },
    #[error("Inconsistent game state: {0}")]
    InvalidState(String),
}

impl GameError {
    /// True for rejections of a player intent. These leave the game state
    /// untouched and the same party may try again.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            GameError::NotYourTurn { .. }
                | GameError::GameAlreadyOver { .. }
                | GameError::CardNotInHand(_)
                | GameError::IllegalMove { .. }
        )
    }
}
