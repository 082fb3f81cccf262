//! Input parsing for the interactive `play` command.

use inkflow_engine::cards::Card;
use inkflow_engine::player::PlayerAction;

/// Result type for parsing user input into player actions.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid player action parsed from input
    Action(PlayerAction),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line typed at the move prompt against the current hand.
///
/// Accepts (case-insensitive):
/// - `N`, `p N` or `play N` → play the N-th card of the hand (1-based)
/// - `d` or `draw` → draw
/// - `q` or `quit` → quit
///
/// Only the shape of the input is checked here; whether the card may be
/// played on the current top is the engine's call.
///
/// # Example
///
/// ```rust
/// # use inkflow_cli::validation::{parse_player_input, ParseResult};
/// use inkflow_engine::cards::{Card, CardId, Rank, Suit};
/// use inkflow_engine::player::PlayerAction;
///
/// let hand = [Card::new(CardId::new(9), Suit::Dragon, Rank::Seven)];
/// assert_eq!(
///     parse_player_input("1", &hand),
///     ParseResult::Action(PlayerAction::Play(CardId::new(9)))
/// );
/// assert_eq!(parse_player_input("draw", &hand), ParseResult::Action(PlayerAction::Draw));
/// assert_eq!(parse_player_input("q", &hand), ParseResult::Quit);
/// assert!(matches!(parse_player_input("2", &hand), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_input(input: &str, hand: &[Card]) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match parts.as_slice() {
        ["q"] | ["quit"] => ParseResult::Quit,
        ["d"] | ["draw"] => ParseResult::Action(PlayerAction::Draw),
        ["p"] | ["play"] => {
            ParseResult::Invalid("Play requires a card number (e.g., 'play 2')".to_string())
        }
        ["p", n] | ["play", n] | [n] if n.chars().all(|c| c.is_ascii_digit()) => {
            pick_card(n, hand)
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized input '{}'. Enter a card number, 'play N', 'draw' or 'quit'",
            input
        )),
    }
}

fn pick_card(n: &str, hand: &[Card]) -> ParseResult {
    let index = match n.parse::<usize>() {
        Ok(i) => i,
        Err(_) => return ParseResult::Invalid(format!("Invalid card number '{}'", n)),
    };
    match index.checked_sub(1).and_then(|i| hand.get(i)) {
        Some(card) => ParseResult::Action(PlayerAction::Play(card.id)),
        None => ParseResult::Invalid(format!(
            "Card number {} is out of range (1-{})",
            index,
            hand.len()
        )),
    }
}

/// Parse a yes/no answer. `None` for anything else.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Validate the `sim` game count.
pub fn validate_games(games: u32) -> Result<(), String> {
    if games == 0 {
        return Err("games must be >= 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkflow_engine::cards::{CardId, Rank, Suit};

    fn hand() -> Vec<Card> {
        vec![
            Card::new(CardId::new(4), Suit::Dragon, Rank::Five),
            Card::new(CardId::new(30), Suit::Tiger, Rank::King),
            Card::new(CardId::new(51), Suit::Turtle, Rank::Ace),
        ]
    }

    #[test]
    fn test_parse_play_forms() {
        let h = hand();
        let expected = ParseResult::Action(PlayerAction::Play(CardId::new(30)));
        assert_eq!(parse_player_input("2", &h), expected);
        assert_eq!(parse_player_input("p 2", &h), expected);
        assert_eq!(parse_player_input("PLAY 2", &h), expected);
        assert_eq!(parse_player_input("  play   2 ", &h), expected);
    }

    #[test]
    fn test_parse_draw_and_quit() {
        let h = hand();
        assert_eq!(parse_player_input("d", &h), ParseResult::Action(PlayerAction::Draw));
        assert_eq!(parse_player_input("Draw", &h), ParseResult::Action(PlayerAction::Draw));
        assert_eq!(parse_player_input("quit", &h), ParseResult::Quit);
        assert_eq!(parse_player_input("Q", &h), ParseResult::Quit);
    }

    #[test]
    fn test_parse_out_of_range() {
        let h = hand();
        for input in ["0", "4", "play 99"] {
            match parse_player_input(input, &h) {
                ParseResult::Invalid(msg) => assert!(msg.contains("out of range"), "{msg}"),
                other => panic!("expected Invalid for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_garbage() {
        let h = hand();
        assert!(matches!(parse_player_input("", &h), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_input("play", &h), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_input("play two", &h), ParseResult::Invalid(_)));
        assert!(matches!(parse_player_input("-1", &h), ParseResult::Invalid(_)));
        match parse_player_input("fold", &h) {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_huge_number() {
        let h = hand();
        assert!(matches!(
            parse_player_input("99999999999999999999999", &h),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("d"), None);
    }

    #[test]
    fn test_validate_games() {
        assert!(validate_games(0).is_err());
        assert!(validate_games(1).is_ok());
    }
}
