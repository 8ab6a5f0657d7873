//! # ramino-engine: Rummy Rule Engine Core
//!
//! A deterministic two-player rummy engine (sets and runs, per-suit jokers,
//! penalty scoring). Provides the full turn state machine, meld validation,
//! round scoring, and JSONL round logging, with reproducible RNG so whole
//! games replay from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, CardId, Card) and deck construction
//! - [`deck`] - Deterministic shuffling, dealing, and canonical hand order
//! - [`meld`] - Set/run validation, joker substitution, and meld discovery
//! - [`engine`] - The turn state machine applying player intents
//! - [`state`] - Game state snapshot, turn history, structural validation
//! - [`scoring`] - Round scoring and the game-over condition
//! - [`logger`] - Round record serialization to JSONL
//! - [`errors`] - Structural error types for snapshot loading
//!
//! ## Quick Start
//!
//! ```rust
//! use ramino_engine::engine::Engine;
//!
//! let mut engine = Engine::new(Some(42), "Alice", "Rummy Rex");
//! engine.start_round();
//!
//! // The human seat acts first: draw, then play or discard.
//! assert!(engine.draw_from_deck());
//! let card = engine.state().current_hand()[0].id;
//! assert!(engine.discard(card) || !engine.can_discard(card));
//! ```
//!
//! ## Failure Semantics
//!
//! Rule violations never panic and never return `Err`: every transition is a
//! total function that reports rejection as `false` with the state left
//! untouched. Only structurally broken snapshots produce a
//! [`errors::GameError`].

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod meld;
pub mod scoring;
pub mod state;
