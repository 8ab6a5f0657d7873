use serde::{Deserialize, Serialize};

/// One of the four suits in the ramino deck.
/// Each suit contributes thirteen numbered cards and one joker.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Swords suit (/)
    Swords,
    /// Spades suit (^)
    Spades,
    /// Cups suit (U)
    Cups,
    /// Hearts suit (<3)
    Hearts,
}

impl Suit {
    /// Canonical ordering index used for hand sorting and id derivation.
    pub fn index(self) -> u8 {
        match self {
            Suit::Swords => 0,
            Suit::Spades => 1,
            Suit::Cups => 2,
            Suit::Hearts => 3,
        }
    }

    /// Single-letter tag used in card notation ("7P", "*S").
    pub fn letter(self) -> char {
        match self {
            Suit::Swords => 'S',
            Suit::Spades => 'P',
            Suit::Cups => 'C',
            Suit::Hearts => 'H',
        }
    }
}

/// Lowest rank in the deck (ace).
pub const MIN_RANK: u8 = 1;
/// Highest rank in the deck (king).
pub const MAX_RANK: u8 = 13;
/// Total cards in play: 13 ranks x 4 suits plus one joker per suit.
pub const DECK_SIZE: usize = 56;

pub fn all_suits() -> [Suit; 4] {
    [Suit::Swords, Suit::Spades, Suit::Cups, Suit::Hearts]
}

/// Stable card identity. Ids 0..51 are the numbered cards in suit-major
/// order, 52..55 are the four jokers. All membership checks go through ids;
/// suit and rank are payload, never identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

/// A single card. Immutable once created; `rank` is 0 for jokers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: u8,
    pub joker: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Card {
        debug_assert!((MIN_RANK..=MAX_RANK).contains(&rank));
        Card {
            id: CardId(suit.index() * 13 + (rank - 1)),
            suit,
            rank,
            joker: false,
        }
    }

    pub fn joker(suit: Suit) -> Card {
        Card {
            id: CardId(52 + suit.index()),
            suit,
            rank: 0,
            joker: true,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.joker {
            write!(f, "*{}", self.suit.letter())
        } else {
            write!(f, "{}{}", rank_display(self.rank), self.suit.letter())
        }
    }
}

/// Display string for a rank (A, 2..10, J, Q, K).
pub fn rank_display(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        _ => "K",
    }
}

/// Build the full 56-card deck: numbered cards in suit-major order, then one
/// joker per suit.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &s in &all_suits() {
        for r in MIN_RANK..=MAX_RANK {
            v.push(Card::new(s, r));
        }
    }
    for &s in &all_suits() {
        v.push(Card::joker(s));
    }
    v
}
