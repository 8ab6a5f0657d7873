//! Process exit codes returned by [`crate::run`].

/// Command completed normally.
pub const SUCCESS: i32 = 0;

/// Argument parse failures and command errors.
pub const ERROR: i32 = 2;

/// 128 + SIGINT, the shell convention for a Ctrl+C abort.
pub const INTERRUPTED: i32 = 130;
