//! # Ramino CLI Library
//!
//! Command-line interface for the ramino rummy engine. Exposes subcommands
//! for playing against the bot, simulating bot-vs-bot games, and inspecting
//! configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["ramino", "sim", "--games", "1", "--seed", "42"];
//! let code = ramino_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive rummy against the bot, with save/resume
//! - `sim`: Run bot-vs-bot simulations and write JSONL round records
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod session;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{Commands, RaminoCli};
use commands::{handle_cfg_command, handle_play_command, handle_sim_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = RaminoCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Ramino CLI").is_err()
                        || writeln!(err, "Usage: ramino <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: ramino --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Cfg => match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Play {
                name,
                seed,
                save,
                fresh,
            } => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_play_command(name, seed, save, fresh, out, err, &mut stdin_lock) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Sim { games, seed, log } => {
                match handle_sim_command(games, seed, log, out, err) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfg_command_dispatch() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(vec!["ramino", "cfg"], &mut out, &mut err);
        assert_eq!(code, 0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("player_name"));
    }

    #[test]
    fn test_unknown_command_exits_2() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(vec!["ramino", "shuffle"], &mut out, &mut err);
        assert_eq!(code, 2);

        let error_output = String::from_utf8(err).unwrap();
        assert!(error_output.contains("Usage: ramino"));
    }

    #[test]
    fn test_help_exits_0() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(vec!["ramino", "--help"], &mut out, &mut err);
        assert_eq!(code, 0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("play"));
        assert!(output.contains("sim"));
        assert!(output.contains("cfg"));
    }

    #[test]
    fn test_sim_dispatch_runs_a_game() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(
            vec!["ramino", "sim", "--games", "1", "--seed", "42"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, 0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("simulated 1 games"));
    }

    #[test]
    fn test_sim_zero_games_exits_2() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = run(vec!["ramino", "sim", "--games", "0"], &mut out, &mut err);
        assert_eq!(code, 2);
    }
}
