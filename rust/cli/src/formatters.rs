//! Card, hand and outcome formatters for terminal display.
//!
//! Suits render as pictographs where the terminal can show them and fall
//! back to two-letter abbreviations elsewhere.
//!
//! - **Unicode mode**: 🐉 🪶 🐯 🐢
//! - **ASCII mode**: Dr Ph Ti Tu
//!
//! ## Example
//!
//! ```rust
//! use inkflow_engine::cards::{Card, CardId, Rank, Suit};
//! use inkflow_cli::formatters::format_card;
//!
//! let king = Card::new(CardId::new(0), Suit::Tiger, Rank::King);
//! assert!(format_card(&king) == "K🐯" || format_card(&king) == "KTi");
//! ```

use inkflow_engine::cards::{Card, Suit};
use inkflow_engine::engine::Outcome;
use inkflow_engine::game::GameState;
use inkflow_engine::player::Seat;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> &'static str {
    if supports_unicode() {
        suit.symbol()
    } else {
        match suit {
            Suit::Dragon => "Dr",
            Suit::Phoenix => "Ph",
            Suit::Tiger => "Ti",
            Suit::Turtle => "Tu",
        }
    }
}

/// Rank label followed by the suit, e.g. `7🐉` or `7Dr`.
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(card.suit))
}

/// Numbered hand listing as typed at the prompt: `[1] 7🐉  [2] K🐯`.
pub fn format_hand(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, c)| format!("[{}] {}", i + 1, format_card(c)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Cards separated by spaces, without numbers.
pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn actor(seat: Seat) -> &'static str {
    match seat {
        Seat::Player => "You",
        Seat::Cpu => "CPU",
    }
}

/// One line describing what an accepted action did.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Played {
            seat,
            card,
            forced_drawn,
            ..
        } => {
            let base = format!("{} played {}", actor(*seat), format_card(card));
            if *forced_drawn > 0 {
                format!(
                    "{} ({} drew {})",
                    base,
                    actor(seat.opponent()),
                    forced_drawn
                )
            } else {
                base
            }
        }
        // the CPU's drawn card stays hidden
        Outcome::Drew {
            seat: Seat::Player,
            card,
        } => format!("You drew {}", format_card(card)),
        Outcome::Drew { seat: Seat::Cpu, .. } => "CPU drew a card".to_string(),
        Outcome::Forfeited { seat } => format!("{} cannot draw from an empty deck", actor(*seat)),
    }
}

/// The table as the human sees it: opponent card count, top card, deck
/// size and the numbered hand.
pub fn format_table(state: &GameState) -> String {
    format!(
        "CPU: {} cards | Deck: {} | Top: {}\nYour hand: {}",
        state.cpu_hand().len(),
        state.deck().len(),
        format_card(state.top_card()),
        format_hand(state.player_hand())
    )
}
