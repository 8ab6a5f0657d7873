use std::collections::HashSet;

use ramino_engine::cards::{full_deck, Card, DECK_SIZE};
use ramino_engine::deck::{deal, remove_cards, sort_hand, Deck};

#[test]
fn full_deck_has_56_unique_cards() {
    let cards = full_deck();
    assert_eq!(cards.len(), DECK_SIZE);
    let ids: HashSet<_> = cards.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), DECK_SIZE, "every card id must be unique");
    assert_eq!(cards.iter().filter(|c| c.joker).count(), 4);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    assert_eq!(
        d1.shuffled(),
        d2.shuffled(),
        "same seed must yield identical order"
    );
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    assert_ne!(
        d1.shuffled(),
        d2.shuffled(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffled_pile_is_a_permutation_of_the_deck() {
    let mut deck = Deck::new_with_seed(777);
    let pile = deck.shuffled();
    let mut sorted = pile.clone();
    sorted.sort_by_key(|c| c.id);
    let mut reference = full_deck();
    reference.sort_by_key(|c| c.id);
    assert_eq!(sorted, reference);
}

#[test]
fn deal_splits_the_requested_count() {
    let pile = full_deck();
    let (hand, rest) = deal(pile, 10);
    assert_eq!(hand.len(), 10);
    assert_eq!(rest.len(), DECK_SIZE - 10);
}

#[test]
fn oversized_deal_returns_empty_hand() {
    let pile: Vec<Card> = full_deck().into_iter().take(5).collect();
    let (hand, rest) = deal(pile, 10);
    assert!(hand.is_empty());
    assert_eq!(rest.len(), 5, "pile must be untouched");
}

#[test]
fn sort_hand_is_idempotent() {
    let mut deck = Deck::new_with_seed(9);
    let mut hand: Vec<Card> = deck.shuffled().into_iter().take(13).collect();
    sort_hand(&mut hand);
    let once = hand.clone();
    sort_hand(&mut hand);
    assert_eq!(hand, once, "sorting twice must not change order");
}

#[test]
fn sort_hand_is_a_permutation_and_puts_jokers_last() {
    let mut deck = Deck::new_with_seed(4);
    let original: Vec<Card> = deck.shuffled();
    let mut hand = original.clone();
    sort_hand(&mut hand);

    let before: HashSet<_> = original.iter().map(|c| c.id).collect();
    let after: HashSet<_> = hand.iter().map(|c| c.id).collect();
    assert_eq!(before, after, "sorting must not add or drop cards");

    let first_joker = hand.iter().position(|c| c.joker).unwrap();
    assert!(
        hand[first_joker..].iter().all(|c| c.joker),
        "jokers must be grouped at the end"
    );
}

#[test]
fn remove_cards_drops_only_the_named_ids() {
    let mut hand = full_deck().into_iter().take(5).collect::<Vec<_>>();
    let victims = vec![hand[1].id, hand[3].id];
    remove_cards(&mut hand, &victims);
    assert_eq!(hand.len(), 3);
    assert!(hand.iter().all(|c| !victims.contains(&c.id)));
}
