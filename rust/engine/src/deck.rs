use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card, CardId};

/// Fisher-Yates shuffle with a supplied randomness source, so outcomes are
/// reproducible under a seeded generator.
pub fn shuffle_cards<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// Owns the session's shuffle randomness. The draw pile itself lives in
/// `GameState`; the deck only produces shuffled card sequences.
#[derive(Debug)]
pub struct Deck {
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A freshly shuffled 56-card pile.
    pub fn shuffled(&mut self) -> Vec<Card> {
        let mut cards = full_deck();
        shuffle_cards(&mut cards, &mut self.rng);
        cards
    }

    /// Shuffle an existing pile in place (mid-round discard reshuffle).
    pub fn reshuffle(&mut self, cards: &mut [Card]) {
        shuffle_cards(cards, &mut self.rng);
    }
}

/// Split the first `n` cards off a pile as a hand. If `n` exceeds the pile
/// size the hand comes back empty and the pile untouched; callers only deal
/// amounts that fit a fresh deck.
pub fn deal(pile: Vec<Card>, n: usize) -> (Vec<Card>, Vec<Card>) {
    if n > pile.len() {
        return (Vec::new(), pile);
    }
    let mut hand = pile;
    let rest = hand.split_off(n);
    (hand, rest)
}

/// Canonical hand order: non-jokers by (suit, rank) ascending, jokers last by
/// suit. Purely for stable display and deterministic comparisons; legality
/// never depends on it.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort_by_key(|c| (c.joker, c.suit.index(), c.rank));
}

/// Drop the given ids from a hand.
pub fn remove_cards(hand: &mut Vec<Card>, ids: &[CardId]) {
    hand.retain(|c| !ids.contains(&c.id));
}
