//! Simulation command handler.
//!
//! Plays whole games with a CPU opponent on both seats and prints
//! aggregate results. Game `i` is dealt from `seed + i`, so a seed pins
//! the full run.
//!
//! # Examples
//!
//! ```no_run
//! use inkflow_cli::commands::{handle_sim_command, SimOptions};
//! use inkflow_engine::rules::RuleSet;
//! use std::io;
//!
//! let opts = SimOptions {
//!     games: 1000,
//!     seed: Some(42),
//!     ai: "baseline".to_string(),
//!     rules: RuleSet::default(),
//!     max_actions: 10_000,
//!     output: Some("data/sim.jsonl".to_string()),
//! };
//! handle_sim_command(&opts, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use crate::validation::validate_games;
use inkflow_ai::{AIOpponent, create_ai};
use inkflow_engine::engine::{Engine, Outcome};
use inkflow_engine::player::{PlayerAction, Seat};
use inkflow_engine::rules::RuleSet;
use serde::Serialize;
use std::io::Write;

pub const DEFAULT_MAX_ACTIONS: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub games: u32,
    pub seed: Option<u64>,
    pub ai: String,
    pub rules: RuleSet,
    /// Games still running after this many accepted actions count as unfinished
    pub max_actions: u32,
    /// JSONL file receiving one record per game
    pub output: Option<String>,
}

/// One line of the `--output` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game: u32,
    pub seed: u64,
    pub winner: Option<Seat>,
    pub forfeit: bool,
    pub actions: u32,
    pub reshuffles: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Tally {
    player_wins: u32,
    cpu_wins: u32,
    forfeits: u32,
    unfinished: u32,
    finished_actions: u64,
    reshuffles: u64,
}

impl Tally {
    fn add(&mut self, record: &GameRecord) {
        match record.winner {
            Some(Seat::Player) => self.player_wins += 1,
            Some(Seat::Cpu) => self.cpu_wins += 1,
            None => self.unfinished += 1,
        }
        if record.winner.is_some() {
            self.finished_actions += u64::from(record.actions);
        }
        if record.forfeit {
            self.forfeits += 1;
        }
        self.reshuffles += u64::from(record.reshuffles);
    }

    fn average_actions(&self) -> f64 {
        let finished = self.player_wins + self.cpu_wins;
        if finished == 0 {
            0.0
        } else {
            self.finished_actions as f64 / f64::from(finished)
        }
    }
}

/// Handle the sim command.
///
/// # Errors
///
/// `CliError::InvalidInput` for a zero game count or an unknown AI name,
/// `CliError::Io` when the output file cannot be written.
pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let Err(msg) = validate_games(opts.games) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let Some(ai) = create_ai(&opts.ai) else {
        let msg = format!("unknown AI '{}'", opts.ai);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };

    let base_seed = opts.seed.unwrap_or_else(rand::random);
    writeln!(
        out,
        "sim: games={} seed={} ai={} exhaustion={}",
        opts.games,
        base_seed,
        opts.ai,
        opts.rules.exhaustion.as_str()
    )?;

    let mut writer = match &opts.output {
        Some(path) => {
            let path = std::path::Path::new(path);
            ensure_parent_dir(path).map_err(CliError::InvalidInput)?;
            Some(std::io::BufWriter::new(std::fs::File::create(path)?))
        }
        None => None,
    };

    let mut tally = Tally::default();
    for game in 1..=opts.games {
        let seed = base_seed.wrapping_add(u64::from(game - 1));
        let record = simulate_game(
            game,
            seed,
            &opts.rules,
            opts.max_actions,
            [ai.as_ref(), ai.as_ref()],
        )?;
        tracing::debug!(
            game,
            seed,
            winner = ?record.winner,
            actions = record.actions,
            "simulated game"
        );
        if let Some(w) = writer.as_mut() {
            let line = serde_json::to_string(&record).map_err(std::io::Error::other)?;
            writeln!(w, "{}", line)?;
        }
        tally.add(&record);
    }
    if let Some(mut w) = writer {
        w.flush()?;
    }

    writeln!(out, "Player wins: {}", tally.player_wins)?;
    writeln!(out, "CPU wins: {}", tally.cpu_wins)?;
    writeln!(out, "Forfeits (empty deck): {}", tally.forfeits)?;
    writeln!(out, "Unfinished: {}", tally.unfinished)?;
    writeln!(
        out,
        "Average actions per finished game: {:.1}",
        tally.average_actions()
    )?;
    writeln!(out, "Reshuffles: {}", tally.reshuffles)?;
    if let Some(path) = &opts.output {
        writeln!(out, "Wrote {} records to {}", opts.games, path)?;
    }
    Ok(())
}

/// Plays one game to completion or to the action cap. `ais[0]` sits in
/// the player seat, `ais[1]` in the CPU seat.
fn simulate_game(
    game: u32,
    seed: u64,
    rules: &RuleSet,
    max_actions: u32,
    ais: [&dyn AIOpponent; 2],
) -> Result<GameRecord, CliError> {
    let mut engine = Engine::new(Some(seed), *rules)?;
    let mut actions = 0u32;
    let mut forfeit = false;

    while !engine.state().is_over() && actions < max_actions {
        let seat = engine.state().turn();
        let ai = match seat {
            Seat::Player => ais[0],
            Seat::Cpu => ais[1],
        };
        let action = ai.get_action(engine.state(), seat);
        let transition = match engine.apply_action(seat, action) {
            Ok(t) => t,
            Err(e) if e.is_invalid_move() && action != PlayerAction::Draw => {
                tracing::warn!(seat = %seat, ai = ai.name(), error = %e, "ai chose an illegal action, drawing instead");
                engine.apply_action(seat, PlayerAction::Draw)?
            }
            Err(e) => return Err(e.into()),
        };
        if matches!(transition.outcome, Outcome::Forfeited { .. }) {
            forfeit = true;
        }
        actions += 1;
    }

    Ok(GameRecord {
        game,
        seed,
        winner: engine.state().winner(),
        forfeit,
        actions,
        reshuffles: engine.state().reshuffles(),
    })
}
