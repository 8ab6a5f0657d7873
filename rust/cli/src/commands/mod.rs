//! Command handler modules for the ramino CLI.
//!
//! Each subcommand lives in its own module with the same shape: a public
//! `handle_COMMAND_command` function taking injected output streams (and
//! stdin where interactive) and returning `Result<(), CliError>`.

pub mod cfg;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
