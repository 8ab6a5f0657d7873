//! Clap argument definitions for the ramino binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ramino", version, about = "Two-player rummy against a bot")]
pub struct RaminoCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play an interactive game against the bot
    Play {
        /// Display name for the human seat
        #[arg(long)]
        name: Option<String>,
        /// RNG seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
        /// Path to the session save file
        #[arg(long)]
        save: Option<String>,
        /// Ignore any existing save and start over
        #[arg(long)]
        fresh: bool,
    },
    /// Simulate bot-vs-bot games and optionally log round records
    Sim {
        /// Number of games to simulate
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// RNG seed for the first game; later games add their index
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL file to append round records to
        #[arg(long)]
        log: Option<String>,
    },
    /// Display current configuration settings and their sources
    Cfg,
}
