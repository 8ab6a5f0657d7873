use thiserror::Error;

use crate::cards::CardId;
use crate::meld::MeldId;

/// Structural failures only. Ordinary rule violations (wrong phase, wrong
/// owner, invalid card set) are never errors; transitions report those as a
/// plain `false` and leave the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("card census mismatch: expected {expected} cards, found {found}")]
    CardCensus { expected: usize, found: usize },
    #[error("card {0:?} appears in more than one location")]
    DuplicateCard(CardId),
    #[error("card {0:?} is not part of this deck")]
    UnknownCard(CardId),
    #[error("meld {0:?} does not satisfy its declared kind")]
    InvalidMeld(MeldId),
    #[error("drawn-from-discard record present outside a play window")]
    StaleDrawRecord,
}
