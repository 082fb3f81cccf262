//! # Ink Flow CLI Library
//!
//! Command-line front end for the Ink Flow One Card engine: play against
//! the CPU in the terminal, simulate CPU-vs-CPU games, inspect a deal, or
//! show the resolved configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and executes the subcommand. [`run_with_input`]
//! does the same with an explicit input stream, which is how the
//! interactive `play` command is driven from tests.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["inkflow", "play", "--seed", "42"];
//! let code = inkflow_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play One Card against the CPU
//! - `sim`: Play CPU-vs-CPU games and report aggregate results
//! - `deal`: Deal a single game for inspection
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
pub mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, InkflowCli};
use commands::{
    PlayOptions, SimOptions, handle_cfg_command, handle_deal_command, handle_play_command,
    handle_sim_command,
};
use inkflow_engine::rules::ExhaustionPolicy;

pub use config::{Config, ConfigError};
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "cfg"];

/// Main entry point for the CLI application.
///
/// Reads interactive input from the process's stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["inkflow", "deal", "--seed", "42"];
/// let code = inkflow_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for the `play` prompts.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// let args = ["inkflow", "play", "--seed", "1", "--cpu-delay-ms", "0"];
/// let mut input = Cursor::new("q\n");
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = inkflow_cli::run_with_input(args, &mut input, &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Goodbye."));
/// ```
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match InkflowCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };
    tracing::debug!(command = cli.cmd.name(), "dispatching command");

    let result = dispatch(cli.cmd, stdin, out, err);
    finish(result, err)
}

fn dispatch(
    cmd: Commands,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { seed } => {
            let cfg = config::load()?;
            handle_deal_command(seed.or(cfg.seed), cfg.rules(), out)
        }
        Commands::Play {
            seed,
            cpu_delay_ms,
            exhaustion,
            ai,
        } => {
            let cfg = with_overrides(seed, exhaustion, ai, cpu_delay_ms)?;
            let opts = PlayOptions {
                seed: cfg.seed,
                rules: cfg.rules(),
                ai: cfg.ai,
                cpu_delay_ms: cfg.cpu_delay_ms,
            };
            handle_play_command(&opts, stdin, out, err)
        }
        Commands::Sim {
            games,
            seed,
            max_actions,
            exhaustion,
            ai,
            output,
        } => {
            let cfg = with_overrides(seed, exhaustion, ai, None)?;
            let opts = SimOptions {
                games,
                seed: cfg.seed,
                rules: cfg.rules(),
                ai: cfg.ai,
                max_actions,
                output,
            };
            handle_sim_command(&opts, out, err)
        }
    }
}

/// Loads the layered configuration and applies command-line flags on top.
fn with_overrides(
    seed: Option<u64>,
    exhaustion: Option<ExhaustionPolicy>,
    ai: Option<String>,
    cpu_delay_ms: Option<u64>,
) -> Result<Config, CliError> {
    let mut cfg = config::load()?;
    if let Some(seed) = seed {
        cfg.seed = Some(seed);
    }
    if let Some(policy) = exhaustion {
        cfg.exhaustion = policy;
    }
    if let Some(ai) = ai {
        cfg.ai = ai;
    }
    if let Some(delay) = cpu_delay_ms {
        cfg.cpu_delay_ms = delay;
    }
    config::validate(&cfg)?;
    Ok(cfg)
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = write_usage(&e, err);
    exit_code::ERROR
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "Ink Flow One Card CLI")?;
    writeln!(err, "Usage: inkflow <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: inkflow --help")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut input = Cursor::new(String::new());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_with_input(args.iter().copied(), &mut input, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, out, err) = run_args(&["inkflow", "--help"]);
        assert_eq!(code, 0);
        for c in COMMANDS {
            assert!(out.contains(c), "help should list {c}");
        }
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["inkflow", "shuffle"]);
        assert_eq!(code, 2);
        assert!(err.contains("Commands:"));
        assert!(err.contains("  sim"));
    }

    #[test]
    fn finish_maps_errors_to_exit_codes() {
        let mut err = Vec::new();
        assert_eq!(finish(Ok(()), &mut err), 0);
        assert_eq!(
            finish(Err(CliError::InvalidInput("x".into())), &mut err),
            2
        );
        assert_eq!(
            finish(Err(CliError::Interrupted("ctrl-c".into())), &mut err),
            130
        );
        assert_eq!(String::from_utf8(err).unwrap(), "Error: Invalid input: x\n");
    }

    #[test]
    #[serial_test::serial]
    fn flags_override_configuration() {
        let cfg = with_overrides(
            Some(5),
            Some(ExhaustionPolicy::ReshuffleDiscard),
            None,
            Some(0),
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(5));
        assert_eq!(
            cfg.exhaustion,
            ExhaustionPolicy::ReshuffleDiscard
        );
        assert_eq!(cfg.cpu_delay_ms, 0);
    }

    #[test]
    #[serial_test::serial]
    fn out_of_range_delay_flag_is_rejected() {
        let result = with_overrides(None, None, None, Some(config::MAX_CPU_DELAY_MS + 1));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
