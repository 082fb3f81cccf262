//! Command-line definitions for the `inkflow` binary.

use clap::{Parser, Subcommand};
use inkflow_engine::rules::ExhaustionPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "inkflow",
    version,
    about = "Ink Flow: One Card against a CPU opponent"
)]
pub struct InkflowCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively against the CPU
    Play {
        #[arg(long)]
        seed: Option<u64>,
        /// Pause before each CPU action, in milliseconds
        #[arg(long)]
        cpu_delay_ms: Option<u64>,
        /// What a draw from an empty deck does: forfeit or reshuffle_discard
        #[arg(long, value_parser = parse_exhaustion_arg)]
        exhaustion: Option<ExhaustionPolicy>,
        #[arg(long)]
        ai: Option<String>,
    },
    /// Play CPU against CPU and print aggregate results
    Sim {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop a game after this many actions and count it as unfinished
        #[arg(long, default_value_t = crate::commands::sim::DEFAULT_MAX_ACTIONS)]
        max_actions: u32,
        #[arg(long, value_parser = parse_exhaustion_arg)]
        exhaustion: Option<ExhaustionPolicy>,
        #[arg(long)]
        ai: Option<String>,
        /// Write one JSON record per game to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Deal one game and show both hands
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Play { .. } => "play",
            Commands::Sim { .. } => "sim",
            Commands::Deal { .. } => "deal",
            Commands::Cfg => "cfg",
        }
    }
}

fn parse_exhaustion_arg(s: &str) -> Result<ExhaustionPolicy, String> {
    crate::config::parse_exhaustion(s).map_err(|e| e.to_string())
}
