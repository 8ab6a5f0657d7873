//! # ramino-ai: Bot Opponent for Ramino
//!
//! Heuristic opponents behind a common strategy trait. A bot only reads the
//! public game state and returns intended actions; it never mutates state
//! itself. The session facade feeds every decision back through the same
//! engine operations a human uses, so a bot has no privileged path.
//!
//! ## Core Components
//!
//! - [`BotStrategy`] - Trait for draw/play/discard decision-making
//! - [`greedy`] - The default meld-greedy opponent
//! - [`create_bot`] - Factory function for bots by name
//!
//! ## Quick Start
//!
//! ```rust
//! use ramino_ai::{create_bot, DrawChoice};
//! use ramino_engine::engine::Engine;
//!
//! let bot = create_bot("greedy");
//! let mut engine = Engine::new(Some(42), "Alice", "Rummy Rex");
//! engine.start_round();
//!
//! match bot.choose_draw(engine.state()) {
//!     DrawChoice::Deck => assert!(engine.draw_from_deck()),
//!     DrawChoice::Discard { from_index } => {
//!         assert!(engine.draw_from_discard(from_index));
//!     }
//! }
//! ```

use rand::seq::IndexedRandom;
use rand::Rng;

use ramino_engine::cards::CardId;
use ramino_engine::meld::MeldId;
use ramino_engine::state::GameState;

pub mod greedy;

/// Display names the facade picks from when creating the bot's seat.
pub const BOT_NAMES: [&str; 6] = [
    "Rummy Rex",
    "Card Shark",
    "Meld Master",
    "Lucky Draw",
    "Wild Card",
    "Ace Hunter",
];

/// Pick a bot display name. Deterministic under a seeded generator.
pub fn pick_bot_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    BOT_NAMES.choose(rng).copied().unwrap_or(BOT_NAMES[0])
}

/// Where to draw from at the start of a turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DrawChoice {
    Deck,
    /// Take the discard card at `from_index` and everything above it.
    Discard { from_index: usize },
}

/// One intended table contribution during the play phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MeldMove {
    Add { card: CardId, meld: MeldId },
    ReplaceJoker { card: CardId, meld: MeldId },
}

/// Decision surface for an opponent. All methods are read-only over the
/// state and must be deterministic for the same state, so simulated games
/// replay exactly from a seed. Every method decides for whichever seat is
/// currently to act.
pub trait BotStrategy: Send + Sync {
    /// Decide where to draw from at the start of the turn.
    fn choose_draw(&self, state: &GameState) -> DrawChoice;

    /// Disjoint card groups to lay down as new melds, best first.
    fn choose_melds(&self, state: &GameState) -> Vec<Vec<CardId>>;

    /// Additions and joker replacements against melds already on the table.
    fn choose_meld_moves(&self, state: &GameState) -> Vec<MeldMove>;

    /// Melds to close this turn.
    fn choose_closes(&self, state: &GameState) -> Vec<MeldId>;

    /// The card to throw away, or `None` with an empty hand.
    fn choose_discard(&self, state: &GameState) -> Option<CardId>;

    /// Identifier for logs and eval output.
    fn name(&self) -> &str;
}

/// Factory for bots by type string.
///
/// # Panics
///
/// Panics on an unknown bot type. Currently only "greedy" is supported.
pub fn create_bot(bot_type: &str) -> Box<dyn BotStrategy> {
    match bot_type {
        "greedy" => Box::new(greedy::GreedyBot::new()),
        _ => panic!("Unknown bot type: {}", bot_type),
    }
}
