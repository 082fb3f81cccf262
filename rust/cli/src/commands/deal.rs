//! Deal command handler.
//!
//! Deals one game and prints both hands, the flipped top card and what is
//! left in the deck. The deal is the one `play --seed` starts with.

use crate::error::CliError;
use crate::formatters::{format_card, format_hand};
use inkflow_engine::engine::Engine;
use inkflow_engine::rules::RuleSet;
use std::io::Write;

/// Handle the deal command.
pub fn handle_deal_command(
    seed: Option<u64>,
    rules: RuleSet,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let engine = Engine::new(Some(seed), rules)?;
    let state = engine.state();

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Player: {}", format_hand(state.player_hand()))?;
    writeln!(out, "CPU: {}", format_hand(state.cpu_hand()))?;
    writeln!(out, "Top: {}", format_card(state.top_card()))?;
    writeln!(out, "Deck: {} cards", state.deck().len())?;
    Ok(())
}
