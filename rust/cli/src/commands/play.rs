//! # Play Command
//!
//! Interactive One Card against the CPU.
//!
//! Each player turn shows the table and reads one line from stdin:
//!
//! - `N`, `p N` or `play N` plays the N-th card of the hand
//! - `d` or `draw` draws a card
//! - `q` or `quit` leaves the session
//!
//! Rejected moves are reported and the same prompt comes back. The CPU
//! answers after a pause of `cpu_delay_ms` and keeps acting while its
//! effects (jump, reverse) hand it the turn again. When a game ends the
//! player may start another one in the same session.

use crate::error::CliError;
use crate::formatters::{format_outcome, format_table};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_input, parse_yes_no};
use inkflow_ai::{AIOpponent, create_ai};
use inkflow_engine::engine::{Engine, Notice, Transition};
use inkflow_engine::player::{PlayerAction, Seat};
use inkflow_engine::rules::RuleSet;
use std::io::{BufRead, Write};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub ai: String,
    pub rules: RuleSet,
    pub cpu_delay_ms: u64,
}

/// Handle the play command: interactive games until the player quits.
///
/// # Returns
///
/// * `Ok(())` when the player quits, declines another game, or stdin closes
/// * `Err(CliError)` for an unknown AI, invalid rules or I/O failures
///
/// # Examples
///
/// ```ignore
/// use inkflow_cli::commands::{handle_play_command, PlayOptions};
/// use inkflow_engine::rules::RuleSet;
/// use std::io::{stdin, stdout, stderr};
///
/// let opts = PlayOptions { seed: None, ai: "baseline".into(), rules: RuleSet::default(), cpu_delay_ms: 1500 };
/// handle_play_command(&opts, &mut stdin().lock(), &mut stdout(), &mut stderr()).unwrap();
/// ```
pub fn handle_play_command(
    opts: &PlayOptions,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let Some(ai) = create_ai(&opts.ai) else {
        let msg = format!("unknown AI '{}'", opts.ai);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };
    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut engine = Engine::new(Some(seed), opts.rules)?;
    let delay = Duration::from_millis(opts.cpu_delay_ms);

    writeln!(
        out,
        "play: seed={} ai={} exhaustion={}",
        seed,
        ai.name(),
        opts.rules.exhaustion.as_str()
    )?;
    writeln!(out, "Game {}", engine.games_started())?;
    writeln!(out, "{}", Notice::for_turn(engine.state().turn()).text)?;

    loop {
        if engine.state().is_over() {
            writeln!(out, "Game over")?;
            if !ask_play_again(stdin, out)? {
                break;
            }
            engine.start_new_game()?;
            writeln!(out, "Game {}", engine.games_started())?;
            continue;
        }

        match engine.state().turn() {
            Seat::Cpu => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                let transition = cpu_step(&mut engine, ai.as_ref())?;
                report(out, &transition)?;
            }
            Seat::Player => {
                writeln!(out, "{}", format_table(engine.state()))?;
                ui::prompt(out, "> ")?;
                let Some(line) = read_stdin_line(stdin) else {
                    writeln!(out)?;
                    break;
                };
                match parse_player_input(&line, engine.state().player_hand()) {
                    ParseResult::Quit => break,
                    ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
                    ParseResult::Action(action) => {
                        match engine.apply_action(Seat::Player, action) {
                            Ok(transition) => report(out, &transition)?,
                            Err(e) if e.is_invalid_move() => {
                                ui::write_error(err, &e.to_string())?;
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
            }
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}

/// One CPU action. An action the engine refuses becomes a draw.
fn cpu_step(engine: &mut Engine, ai: &dyn AIOpponent) -> Result<Transition, CliError> {
    let action = ai.get_action(engine.state(), Seat::Cpu);
    match engine.apply_action(Seat::Cpu, action) {
        Ok(t) => Ok(t),
        Err(e) if e.is_invalid_move() && action != PlayerAction::Draw => {
            tracing::warn!(ai = ai.name(), error = %e, "cpu chose an illegal action, drawing instead");
            Ok(engine.apply_action(Seat::Cpu, PlayerAction::Draw)?)
        }
        Err(e) => Err(e.into()),
    }
}

fn report(out: &mut dyn Write, transition: &Transition) -> Result<(), CliError> {
    writeln!(out, "{}", format_outcome(&transition.outcome))?;
    if transition.reshuffled {
        writeln!(out, "Discard pile reshuffled into the deck")?;
    }
    writeln!(out, "{}", transition.notice().text)?;
    Ok(())
}

/// Keeps asking until the answer is yes or no. EOF counts as no.
fn ask_play_again(stdin: &mut dyn BufRead, out: &mut dyn Write) -> Result<bool, CliError> {
    loop {
        ui::prompt(out, "Play again? [y/n] ")?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(false);
        };
        if let Some(answer) = parse_yes_no(&line) {
            return Ok(answer);
        }
    }
}
