//! Meld validation: pure predicates over card groups plus the exhaustive
//! meld search used by the bot. A set is 3-4 cards of one rank with distinct
//! suits; a run is 3+ consecutive ranks of one suit. Jokers stand in for the
//! missing slots in either shape, but every meld needs at least one real
//! card.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::state::Seat;

/// Meld identity, allocated by the engine's session-scoped counter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeldId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldKind {
    Set,
    Run,
}

/// A played, face-up group of cards. Runs are kept slot-ordered: position
/// `i` holds the card of rank `first + i`, with jokers sitting in the gap
/// slots, so joker replacement resolves an exact slot instead of re-deriving
/// gaps from rank arithmetic.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Meld {
    pub id: MeldId,
    pub cards: Vec<Card>,
    pub kind: MeldKind,
    pub closed: bool,
    pub owner: Seat,
}

impl Meld {
    /// Build a meld from already-validated cards. Runs are normalized into
    /// slot order; sets keep their given order.
    pub fn new(id: MeldId, cards: Vec<Card>, kind: MeldKind, owner: Seat) -> Meld {
        let cards = match kind {
            MeldKind::Run => normalize_run(&cards).unwrap_or(cards),
            MeldKind::Set => cards,
        };
        Meld {
            id,
            cards,
            kind,
            closed: false,
            owner,
        }
    }

    /// Whether the current card sequence satisfies the declared kind.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            MeldKind::Set => is_valid_set(&self.cards),
            MeldKind::Run => is_valid_run(&self.cards),
        }
    }

    /// Append a card and re-normalize if this is a run. Caller has already
    /// checked `can_add_to_meld`.
    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
        if self.kind == MeldKind::Run {
            if let Some(slots) = normalize_run(&self.cards) {
                self.cards = slots;
            }
        }
    }

    /// Swap the card at `slot` for `card`, returning the displaced joker.
    pub fn replace_slot(&mut self, slot: usize, card: Card) -> Card {
        std::mem::replace(&mut self.cards[slot], card)
    }
}

fn non_jokers(cards: &[Card]) -> Vec<&Card> {
    cards.iter().filter(|c| !c.joker).collect()
}

/// 3-4 cards, at least one non-joker, all non-jokers one rank, suits pairwise
/// distinct.
pub fn is_valid_set(cards: &[Card]) -> bool {
    if cards.len() < 3 || cards.len() > 4 {
        return false;
    }
    let real = non_jokers(cards);
    if real.is_empty() {
        return false;
    }
    let rank = real[0].rank;
    if !real.iter().all(|c| c.rank == rank) {
        return false;
    }
    let mut suits: Vec<_> = real.iter().map(|c| c.suit).collect();
    suits.sort();
    suits.dedup();
    suits.len() == real.len()
}

/// 3+ cards, at least one non-joker, all non-jokers one suit, and the rank
/// span of the non-jokers exactly fills the card count with jokers plugging
/// the gaps. Jokers never extend a run past its non-joker endpoints.
pub fn is_valid_run(cards: &[Card]) -> bool {
    if cards.len() < 3 {
        return false;
    }
    let real = non_jokers(cards);
    if real.is_empty() {
        return false;
    }
    let suit = real[0].suit;
    if !real.iter().all(|c| c.suit == suit) {
        return false;
    }
    let mut ranks: Vec<u8> = real.iter().map(|c| c.rank).collect();
    ranks.sort_unstable();
    let span = (ranks[ranks.len() - 1] - ranks[0] + 1) as usize;
    if span != cards.len() {
        return false;
    }
    ranks.windows(2).all(|w| w[0] != w[1])
}

/// Classify a card group. Set wins when both shapes could apply; the shapes
/// only coincide degenerately, so checking set first settles it.
pub fn identify_meld(cards: &[Card]) -> Option<MeldKind> {
    if is_valid_set(cards) {
        Some(MeldKind::Set)
    } else if is_valid_run(cards) {
        Some(MeldKind::Run)
    } else {
        None
    }
}

/// Rearrange a valid run into slot order: position `i` carries rank
/// `min + i`, jokers at the gap positions. Returns `None` if the cards do
/// not form a valid run.
pub fn normalize_run(cards: &[Card]) -> Option<Vec<Card>> {
    if !is_valid_run(cards) {
        return None;
    }
    let real = non_jokers(cards);
    let min = real.iter().map(|c| c.rank).min()?;
    let max = real.iter().map(|c| c.rank).max()?;
    let mut jokers: Vec<Card> = cards.iter().filter(|c| c.joker).copied().collect();
    let mut slots = Vec::with_capacity(cards.len());
    for rank in min..=max {
        match real.iter().find(|c| c.rank == rank) {
            Some(&&card) => slots.push(card),
            None => slots.push(jokers.pop()?),
        }
    }
    Some(slots)
}

/// Whether appending `card` keeps the meld valid for its declared kind.
/// Revalidated wholesale rather than incrementally; closed melds refuse.
pub fn can_add_to_meld(card: &Card, meld: &Meld) -> bool {
    if meld.closed {
        return false;
    }
    let mut candidate = meld.cards.clone();
    candidate.push(*card);
    match meld.kind {
        MeldKind::Set => is_valid_set(&candidate),
        MeldKind::Run => is_valid_run(&candidate),
    }
}

/// Whether `card` may take over a joker's slot in the meld, and which slot.
/// For a set the card must match the established rank and bring a new suit;
/// for a run it must match the established suit and a joker-held rank.
pub fn can_replace_joker(card: &Card, meld: &Meld) -> Option<usize> {
    if meld.closed || card.joker {
        return None;
    }
    let real = non_jokers(&meld.cards);
    let first_real = real.first()?;
    match meld.kind {
        MeldKind::Set => {
            if card.rank != first_real.rank {
                return None;
            }
            if real.iter().any(|c| c.suit == card.suit) {
                return None;
            }
            meld.cards.iter().position(|c| c.joker)
        }
        MeldKind::Run => {
            if card.suit != first_real.suit {
                return None;
            }
            // slot order: first slot is always a non-joker endpoint
            let base = meld.cards.first()?.rank;
            if card.rank < base {
                return None;
            }
            let slot = (card.rank - base) as usize;
            match meld.cards.get(slot) {
                Some(c) if c.joker => Some(slot),
                _ => None,
            }
        }
    }
}

/// Every subset of the hand (sizes 3..=min(13, n)) that forms a valid meld.
/// Exponential in hand size; fine while hands are capped at 13 cards, so no
/// memoization here.
pub fn find_possible_melds(hand: &[Card]) -> Vec<Vec<Card>> {
    let mut found = Vec::new();
    let max = hand.len().min(13);
    for size in 3..=max {
        combinations(hand, size, 0, &mut Vec::new(), &mut found);
    }
    found
}

fn combinations(
    hand: &[Card],
    size: usize,
    start: usize,
    current: &mut Vec<Card>,
    out: &mut Vec<Vec<Card>>,
) {
    if current.len() == size {
        if identify_meld(current).is_some() {
            out.push(current.clone());
        }
        return;
    }
    let needed = size - current.len();
    for i in start..hand.len() {
        if hand.len() - i < needed {
            break;
        }
        current.push(hand[i]);
        combinations(hand, size, i + 1, current, out);
        current.pop();
    }
}
