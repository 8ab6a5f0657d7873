//! The default opponent: a deterministic, meld-greedy heuristic.
//!
//! Draws from the discard pile when doing so provably helps (more
//! discoverable melds, or the top card completes a near-meld), lays down the
//! largest non-overlapping melds it can find, contributes leftover cards to
//! open melds first-fit, never closes melds, and throws away the card that
//! is most expensive to hold and least likely to meld.

use crate::{BotStrategy, DrawChoice, MeldMove};
use ramino_engine::cards::{Card, CardId};
use ramino_engine::meld::{can_add_to_meld, can_replace_joker, find_possible_melds};
use ramino_engine::scoring::card_value;
use ramino_engine::state::GameState;

/// Taking a discard slice that would push the hand past this size is never
/// considered; meld discovery is exponential in hand size.
const MAX_SEARCH_HAND: usize = 13;

/// Penalty applied per discoverable meld a card participates in, so melded
/// cards are kept over bare high cards.
const MELD_PENALTY: i32 = 20;

#[derive(Debug, Clone, Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }
}

impl BotStrategy for GreedyBot {
    fn choose_draw(&self, state: &GameState) -> DrawChoice {
        let hand = state.current_hand();
        let pile = &state.discard_pile;
        if pile.is_empty() {
            return DrawChoice::Deck;
        }

        let current_melds = find_possible_melds(hand).len();

        // Scan bottom-up: the first slice that strictly increases the number
        // of discoverable melds is worth taking, extra baggage and all.
        for from_index in 0..pile.len() {
            let slice = &pile[from_index..];
            if hand.len() + slice.len() > MAX_SEARCH_HAND {
                continue;
            }
            let mut potential = hand.to_vec();
            potential.extend_from_slice(slice);
            if find_possible_melds(&potential).len() > current_melds {
                return DrawChoice::Discard { from_index };
            }
        }

        // The top card alone may still complete a near-meld.
        if let Some(top) = pile.last() {
            if would_complete_near_meld(hand, top) {
                return DrawChoice::Discard {
                    from_index: pile.len() - 1,
                };
            }
        }

        DrawChoice::Deck
    }

    fn choose_melds(&self, state: &GameState) -> Vec<Vec<CardId>> {
        let hand = state.current_hand();
        let mut possible = find_possible_melds(hand);
        // Larger melds first to maximize cards committed to the table;
        // stable sort keeps discovery order among equals.
        possible.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut chosen: Vec<Vec<CardId>> = Vec::new();
        let mut used: Vec<CardId> = Vec::new();
        for meld in possible {
            if meld.iter().any(|c| used.contains(&c.id)) {
                continue;
            }
            used.extend(meld.iter().map(|c| c.id));
            chosen.push(meld.iter().map(|c| c.id).collect());
        }
        chosen
    }

    fn choose_meld_moves(&self, state: &GameState) -> Vec<MeldMove> {
        let hand = state.current_hand();
        let mut moves = Vec::new();
        for card in hand {
            // First-fit in table order, at most one destination per card.
            for meld in &state.melds {
                if can_add_to_meld(card, meld) {
                    moves.push(MeldMove::Add {
                        card: card.id,
                        meld: meld.id,
                    });
                    break;
                }
                if !card.joker && can_replace_joker(card, meld).is_some() {
                    moves.push(MeldMove::ReplaceJoker {
                        card: card.id,
                        meld: meld.id,
                    });
                    break;
                }
            }
        }
        moves
    }

    fn choose_closes(&self, _state: &GameState) -> Vec<ramino_engine::meld::MeldId> {
        // Conservative placeholder: keeping melds open keeps our own
        // add/replace options alive.
        Vec::new()
    }

    fn choose_discard(&self, state: &GameState) -> Option<CardId> {
        let hand = state.current_hand();
        let restricted = state.restricted_discard();
        let possible = find_possible_melds(hand);

        let mut best: Option<(CardId, i32)> = None;
        for card in hand {
            if Some(card.id) == restricted {
                continue;
            }
            let mut score = card_value(card);
            for meld in &possible {
                if meld.iter().any(|c| c.id == card.id) {
                    score -= MELD_PENALTY;
                }
            }
            score -= near_meld_score(hand, card);
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((card.id, score)),
            }
        }
        best.map(|(id, _)| id)
            .or_else(|| hand.first().map(|c| c.id))
    }

    fn name(&self) -> &str {
        "GreedyBot"
    }
}

/// Whether `candidate` would turn two held cards into a complete meld.
fn would_complete_near_meld(hand: &[Card], candidate: &Card) -> bool {
    // Set shape: two held non-jokers of the same rank with fresh suits.
    let same_rank: Vec<&Card> = hand
        .iter()
        .filter(|c| !c.joker && c.rank == candidate.rank)
        .collect();
    if same_rank.len() >= 2 {
        let mut suits: Vec<_> = same_rank.iter().map(|c| c.suit).collect();
        suits.push(candidate.suit);
        suits.sort();
        suits.dedup();
        if suits.len() == same_rank.len() + 1 {
            return true;
        }
    }

    // Run shape: an adjacent same-suit card plus a third within reach.
    let same_suit: Vec<&Card> = hand
        .iter()
        .filter(|c| !c.joker && c.suit == candidate.suit)
        .collect();
    for card in &same_suit {
        if card.rank.abs_diff(candidate.rank) != 1 {
            continue;
        }
        let has_third = same_suit.iter().any(|c| {
            c.id != card.id
                && (c.rank.abs_diff(candidate.rank) == 1 || c.rank.abs_diff(card.rank) == 1)
                && c.rank.abs_diff(card.rank) <= 2
                && c.rank.abs_diff(candidate.rank) <= 2
        });
        if has_third {
            return true;
        }
    }
    false
}

/// How close a card is to melding with the rest of the hand. Higher means
/// more valuable to keep.
fn near_meld_score(hand: &[Card], card: &Card) -> i32 {
    if card.joker {
        return 15;
    }
    let mut score = 0;
    for other in hand {
        if other.id == card.id || other.joker {
            continue;
        }
        if other.rank == card.rank {
            score += 5;
        }
        if other.suit == card.suit {
            match other.rank.abs_diff(card.rank) {
                1 => score += 8,
                2 => score += 3,
                _ => {}
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramino_engine::cards::Suit;
    use ramino_engine::meld::{Meld, MeldId, MeldKind};
    use ramino_engine::state::{GameState, Seat};

    fn state_with_hand(hand: Vec<Card>) -> GameState {
        let mut state = GameState::new("Alice", "Rummy Rex");
        state.player.hand = hand;
        state
    }

    #[test]
    fn draws_from_discard_when_it_completes_a_set() {
        let mut state = state_with_hand(vec![
            Card::new(Suit::Swords, 7),
            Card::new(Suit::Spades, 7),
            Card::new(Suit::Hearts, 12),
        ]);
        state.discard_pile = vec![Card::new(Suit::Hearts, 7)];

        let bot = GreedyBot::new();
        assert_eq!(bot.choose_draw(&state), DrawChoice::Discard { from_index: 0 });
    }

    #[test]
    fn draws_from_deck_without_a_reason() {
        let mut state = state_with_hand(vec![
            Card::new(Suit::Swords, 2),
            Card::new(Suit::Cups, 9),
            Card::new(Suit::Hearts, 12),
        ]);
        state.discard_pile = vec![Card::new(Suit::Spades, 5)];

        let bot = GreedyBot::new();
        assert_eq!(bot.choose_draw(&state), DrawChoice::Deck);
    }

    #[test]
    fn skips_slices_that_would_blow_up_the_hand() {
        // A meld-completing card buried under a tall pile is out of reach
        // once the slice would exceed the search cap.
        let mut hand = vec![Card::new(Suit::Swords, 7), Card::new(Suit::Spades, 7)];
        hand.extend((2..=11).map(|r| Card::new(Suit::Cups, r)));
        let mut state = state_with_hand(hand);
        state.discard_pile = vec![
            Card::new(Suit::Hearts, 7),
            Card::new(Suit::Hearts, 2),
            Card::new(Suit::Swords, 13),
        ];

        let bot = GreedyBot::new();
        assert_eq!(bot.choose_draw(&state), DrawChoice::Deck);
    }

    #[test]
    fn plays_the_largest_meld_first() {
        let state = state_with_hand(vec![
            Card::new(Suit::Spades, 5),
            Card::new(Suit::Spades, 6),
            Card::new(Suit::Spades, 7),
            Card::new(Suit::Spades, 8),
            Card::new(Suit::Hearts, 2),
        ]);

        let bot = GreedyBot::new();
        let melds = bot.choose_melds(&state);
        assert_eq!(melds.len(), 1);
        assert_eq!(melds[0].len(), 4);
    }

    #[test]
    fn chosen_melds_never_overlap() {
        let state = state_with_hand(vec![
            Card::new(Suit::Swords, 4),
            Card::new(Suit::Spades, 4),
            Card::new(Suit::Hearts, 4),
            Card::new(Suit::Cups, 4),
            Card::new(Suit::Cups, 5),
            Card::new(Suit::Cups, 6),
        ]);

        let bot = GreedyBot::new();
        let melds = bot.choose_melds(&state);
        let mut seen = Vec::new();
        for meld in &melds {
            for id in meld {
                assert!(!seen.contains(id), "card {:?} used twice", id);
                seen.push(*id);
            }
        }
    }

    #[test]
    fn replaces_a_joker_it_can_free() {
        let mut state = state_with_hand(vec![Card::new(Suit::Spades, 6)]);
        state.melds.push(Meld::new(
            MeldId(1),
            vec![
                Card::new(Suit::Spades, 5),
                Card::joker(Suit::Cups),
                Card::new(Suit::Spades, 7),
            ],
            MeldKind::Run,
            Seat::Opponent,
        ));

        let bot = GreedyBot::new();
        let moves = bot.choose_meld_moves(&state);
        assert_eq!(
            moves,
            vec![MeldMove::ReplaceJoker {
                card: Card::new(Suit::Spades, 6).id,
                meld: MeldId(1),
            }]
        );
    }

    #[test]
    fn extends_an_open_run() {
        let mut state = state_with_hand(vec![Card::new(Suit::Spades, 8)]);
        state.melds.push(Meld::new(
            MeldId(1),
            vec![
                Card::new(Suit::Spades, 5),
                Card::new(Suit::Spades, 6),
                Card::new(Suit::Spades, 7),
            ],
            MeldKind::Run,
            Seat::Player,
        ));

        let bot = GreedyBot::new();
        let moves = bot.choose_meld_moves(&state);
        assert_eq!(
            moves,
            vec![MeldMove::Add {
                card: Card::new(Suit::Spades, 8).id,
                meld: MeldId(1),
            }]
        );
    }

    #[test]
    fn never_closes_melds() {
        let state = state_with_hand(vec![Card::new(Suit::Swords, 2)]);
        let bot = GreedyBot::new();
        assert!(bot.choose_closes(&state).is_empty());
    }

    #[test]
    fn discards_the_highest_useless_card() {
        let state = state_with_hand(vec![
            Card::new(Suit::Swords, 7),
            Card::new(Suit::Spades, 7),
            Card::new(Suit::Hearts, 7),
            Card::new(Suit::Hearts, 13),
            Card::new(Suit::Swords, 1),
        ]);

        let bot = GreedyBot::new();
        let pick = bot.choose_discard(&state);
        assert_eq!(pick, Some(Card::new(Suit::Hearts, 13).id));
    }

    #[test]
    fn respects_the_discard_restriction() {
        let mut state = state_with_hand(vec![
            Card::new(Suit::Hearts, 13),
            Card::new(Suit::Swords, 1),
        ]);
        state.drawn_from_discard = Some(vec![Card::new(Suit::Hearts, 13)]);

        let bot = GreedyBot::new();
        let pick = bot.choose_discard(&state);
        assert_eq!(pick, Some(Card::new(Suit::Swords, 1).id));
    }

    #[test]
    fn keeps_jokers_over_plain_cards() {
        let state = state_with_hand(vec![
            Card::joker(Suit::Swords),
            Card::new(Suit::Cups, 9),
            Card::new(Suit::Hearts, 3),
        ]);

        let bot = GreedyBot::new();
        // joker value 15 minus near score 15 leaves 0; the nine wins.
        let pick = bot.choose_discard(&state);
        assert_eq!(pick, Some(Card::new(Suit::Cups, 9).id));
    }
}
