//! Game state data model: the single source of truth handed back by every
//! engine transition, fully serializable for the persistence seam.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Suit, DECK_SIZE};
use crate::errors::GameError;
use crate::meld::{Meld, MeldId, MeldKind};

/// Which side of the table a card, meld, or turn belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    RoundEnd,
    GameOver,
}

/// Sub-state within one player's turn. The engine only ever occupies `Draw`
/// and `Play`; `Discard` is part of the serialized vocabulary and accepted
/// on input for compatibility with older snapshots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    Draw,
    Play,
    Discard,
}

/// One participant: display name, current hand, cumulative score. Scores
/// move only at round end and may go negative.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Card>,
    pub score: i32,
}

impl PlayerState {
    pub fn new(name: &str) -> PlayerState {
        PlayerState {
            name: name.to_string(),
            hand: Vec::new(),
            score: 0,
        }
    }

    pub fn holds(&self, id: CardId) -> bool {
        self.hand.iter().any(|c| c.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }
}

/// Append-only audit log entry. A closed set of variants so handling stays
/// exhaustive at compile time; entries are never mutated or reordered.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnAction {
    DrawDeck { seat: Seat },
    DrawDiscard { seat: Seat, count: usize },
    PlayMeld { seat: Seat, kind: MeldKind, count: usize },
    AddToMeld { seat: Seat, rank: u8, suit: Suit },
    ReplaceJoker { seat: Seat, meld: MeldId },
    CloseMeld { seat: Seat, meld: MeldId },
    OpenMeld { seat: Seat, meld: MeldId },
    Discard { seat: Seat, card: Card },
    GoOut { seat: Seat },
}

/// The whole game in one snapshot. Every card in existence sits in exactly
/// one of: a hand, the draw pile, the discard pile, or one meld.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub turn_phase: TurnPhase,
    pub current: Seat,
    pub player: PlayerState,
    pub opponent: PlayerState,
    /// Draw pile, front of the vec is dealt first.
    pub deck: Vec<Card>,
    /// Discard pile, most recent at the end.
    pub discard_pile: Vec<Card>,
    pub melds: Vec<Meld>,
    pub round_number: u32,
    /// Cards taken from the discard pile this turn; the first one is the
    /// card that may not be thrown straight back. Cleared on turn handoff.
    pub drawn_from_discard: Option<Vec<Card>>,
    pub turn_history: Vec<TurnAction>,
}

impl GameState {
    pub fn new(player_name: &str, bot_name: &str) -> GameState {
        GameState {
            phase: GamePhase::Playing,
            turn_phase: TurnPhase::Draw,
            current: Seat::Player,
            player: PlayerState::new(player_name),
            opponent: PlayerState::new(bot_name),
            deck: Vec::new(),
            discard_pile: Vec::new(),
            melds: Vec::new(),
            round_number: 1,
            drawn_from_discard: None,
            turn_history: Vec::new(),
        }
    }

    pub fn seat(&self, seat: Seat) -> &PlayerState {
        match seat {
            Seat::Player => &self.player,
            Seat::Opponent => &self.opponent,
        }
    }

    pub fn seat_mut(&mut self, seat: Seat) -> &mut PlayerState {
        match seat {
            Seat::Player => &mut self.player,
            Seat::Opponent => &mut self.opponent,
        }
    }

    pub fn current_hand(&self) -> &[Card] {
        &self.seat(self.current).hand
    }

    pub fn meld(&self, id: MeldId) -> Option<&Meld> {
        self.melds.iter().find(|m| m.id == id)
    }

    pub fn meld_mut(&mut self, id: MeldId) -> Option<&mut Meld> {
        self.melds.iter_mut().find(|m| m.id == id)
    }

    /// The id of the one card the current player may not discard this turn.
    pub fn restricted_discard(&self) -> Option<CardId> {
        self.drawn_from_discard
            .as_ref()
            .and_then(|cards| cards.first())
            .map(|c| c.id)
    }

    /// Structural validation for loaded snapshots: every deck card exactly
    /// once across hands, piles, and melds; every meld valid for its kind;
    /// draw bookkeeping only inside a play window. Rule-level state (whose
    /// turn, scores) is trusted as written.
    pub fn validate(&self) -> Result<(), GameError> {
        let mut seen = [false; DECK_SIZE];
        let everywhere = self
            .player
            .hand
            .iter()
            .chain(self.opponent.hand.iter())
            .chain(self.deck.iter())
            .chain(self.discard_pile.iter())
            .chain(self.melds.iter().flat_map(|m| m.cards.iter()));
        let mut found = 0usize;
        for card in everywhere {
            let idx = card.id.0 as usize;
            if idx >= DECK_SIZE {
                return Err(GameError::UnknownCard(card.id));
            }
            if seen[idx] {
                return Err(GameError::DuplicateCard(card.id));
            }
            seen[idx] = true;
            found += 1;
        }
        if found != DECK_SIZE {
            return Err(GameError::CardCensus {
                expected: DECK_SIZE,
                found,
            });
        }
        for meld in &self.melds {
            if !meld.is_valid() {
                return Err(GameError::InvalidMeld(meld.id));
            }
        }
        if self.drawn_from_discard.is_some() && self.turn_phase == TurnPhase::Draw {
            return Err(GameError::StaleDrawRecord);
        }
        Ok(())
    }
}
