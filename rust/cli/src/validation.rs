//! Input parsing and validation for interactive commands.
//!
//! Card tokens use the same notation the formatters print: rank then suit
//! letter ("7P", "10C", "AH"), "*S" for a joker. Melds are referenced by the
//! numeric id shown in the table display.

use ramino_engine::cards::{Card, CardId, Suit, MAX_RANK, MIN_RANK};
use ramino_engine::meld::MeldId;

/// A fully parsed player command for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIntent {
    DrawDeck,
    DrawDiscard { index: usize },
    PlayMeld { cards: Vec<CardId> },
    AddToMeld { card: CardId, meld: MeldId },
    ReplaceJoker { card: CardId, meld: MeldId },
    CloseMeld { meld: MeldId },
    OpenMeld { meld: MeldId },
    Discard { card: CardId },
    ShowHand,
    ShowTable,
    Help,
}

/// Result type for parsing user input into player intents.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Valid intent parsed from input
    Intent(PlayerIntent),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a card token into the card it names.
///
/// Accepts "AH", "7P", "10C", "JS", "QS", "KH" and "*S" style jokers,
/// case-insensitive.
pub fn parse_card_token(token: &str) -> Option<Card> {
    let token = token.trim().to_uppercase();
    if token.len() < 2 || !token.is_ascii() {
        return None;
    }
    let suit = match token.chars().last()? {
        'S' => Suit::Swords,
        'P' => Suit::Spades,
        'C' => Suit::Cups,
        'H' => Suit::Hearts,
        _ => return None,
    };
    let rank_part = &token[..token.len() - 1];
    if rank_part == "*" {
        return Some(Card::joker(suit));
    }
    let rank = match rank_part {
        "A" => 1,
        "J" => 11,
        "Q" => 12,
        "K" => 13,
        other => other.parse::<u8>().ok()?,
    };
    if !(MIN_RANK..=MAX_RANK).contains(&rank) {
        return None;
    }
    Some(Card::new(suit, rank))
}

fn parse_meld_ref(token: &str) -> Option<MeldId> {
    token.trim_start_matches('#').parse::<u32>().ok().map(MeldId)
}

/// Parse one line of user input into a [`ParseResult`].
///
/// Accepted commands (case-insensitive):
/// - "draw" - draw from the deck
/// - "take N" - take the discard pile from index N upward
/// - "meld 7P 8P 9P" - lay a new meld from hand
/// - "add 7P 3" - add a hand card to meld #3
/// - "swap 7P 3" - replace a joker in meld #3 with a hand card
/// - "close 3" / "open 3" - close or reopen an owned meld
/// - "discard 7P" (or "d 7P") - discard and end the turn
/// - "hand", "table", "help" - display commands
/// - "q" or "quit" - leave the game
pub fn parse_intent(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    if parts[0] == "q" || parts[0] == "quit" {
        return ParseResult::Quit;
    }

    match parts[0] {
        "draw" => ParseResult::Intent(PlayerIntent::DrawDeck),
        "take" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "take requires a pile index (e.g. 'take 0')".to_string(),
                );
            }
            match parts[1].parse::<usize>() {
                Ok(index) => ParseResult::Intent(PlayerIntent::DrawDiscard { index }),
                Err(_) => ParseResult::Invalid("Invalid pile index".to_string()),
            }
        }
        "meld" => {
            if parts.len() < 4 {
                return ParseResult::Invalid(
                    "meld requires at least three cards (e.g. 'meld 7P 8P 9P')".to_string(),
                );
            }
            let mut cards = Vec::with_capacity(parts.len() - 1);
            for token in &parts[1..] {
                match parse_card_token(token) {
                    Some(card) => cards.push(card.id),
                    None => {
                        return ParseResult::Invalid(format!("Unrecognized card '{}'", token));
                    }
                }
            }
            ParseResult::Intent(PlayerIntent::PlayMeld { cards })
        }
        "add" | "swap" => {
            if parts.len() < 3 {
                return ParseResult::Invalid(format!(
                    "{} requires a card and a meld id (e.g. '{} 7P 3')",
                    parts[0], parts[0]
                ));
            }
            let card = match parse_card_token(parts[1]) {
                Some(card) => card.id,
                None => {
                    return ParseResult::Invalid(format!("Unrecognized card '{}'", parts[1]));
                }
            };
            let meld = match parse_meld_ref(parts[2]) {
                Some(meld) => meld,
                None => return ParseResult::Invalid("Invalid meld id".to_string()),
            };
            if parts[0] == "add" {
                ParseResult::Intent(PlayerIntent::AddToMeld { card, meld })
            } else {
                ParseResult::Intent(PlayerIntent::ReplaceJoker { card, meld })
            }
        }
        "close" | "open" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(format!("{} requires a meld id", parts[0]));
            }
            match parse_meld_ref(parts[1]) {
                Some(meld) if parts[0] == "close" => {
                    ParseResult::Intent(PlayerIntent::CloseMeld { meld })
                }
                Some(meld) => ParseResult::Intent(PlayerIntent::OpenMeld { meld }),
                None => ParseResult::Invalid("Invalid meld id".to_string()),
            }
        }
        "discard" | "d" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "discard requires a card (e.g. 'discard 7P')".to_string(),
                );
            }
            match parse_card_token(parts[1]) {
                Some(card) => ParseResult::Intent(PlayerIntent::Discard { card: card.id }),
                None => ParseResult::Invalid(format!("Unrecognized card '{}'", parts[1])),
            }
        }
        "hand" => ParseResult::Intent(PlayerIntent::ShowHand),
        "table" => ParseResult::Intent(PlayerIntent::ShowTable),
        "help" => ParseResult::Intent(PlayerIntent::Help),
        _ => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: draw, take <n>, meld <cards>, add <card> <meld>, swap <card> <meld>, close <meld>, open <meld>, discard <card>, hand, table, help, q",
            parts[0]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_token_numbered() {
        assert_eq!(parse_card_token("7P"), Some(Card::new(Suit::Spades, 7)));
        assert_eq!(parse_card_token("10c"), Some(Card::new(Suit::Cups, 10)));
        assert_eq!(parse_card_token("ah"), Some(Card::new(Suit::Hearts, 1)));
        assert_eq!(parse_card_token("KS"), Some(Card::new(Suit::Swords, 13)));
    }

    #[test]
    fn test_parse_card_token_joker() {
        assert_eq!(parse_card_token("*S"), Some(Card::joker(Suit::Swords)));
        assert_eq!(parse_card_token("*h"), Some(Card::joker(Suit::Hearts)));
    }

    #[test]
    fn test_parse_card_token_rejects_garbage() {
        assert_eq!(parse_card_token("7X"), None);
        assert_eq!(parse_card_token("14P"), None);
        assert_eq!(parse_card_token("0H"), None);
        assert_eq!(parse_card_token(""), None);
        assert_eq!(parse_card_token("P"), None);
    }

    #[test]
    fn test_parse_draw() {
        assert_eq!(parse_intent("draw"), ParseResult::Intent(PlayerIntent::DrawDeck));
        assert_eq!(parse_intent("DRAW"), ParseResult::Intent(PlayerIntent::DrawDeck));
    }

    #[test]
    fn test_parse_take_with_index() {
        assert_eq!(
            parse_intent("take 2"),
            ParseResult::Intent(PlayerIntent::DrawDiscard { index: 2 })
        );
    }

    #[test]
    fn test_parse_take_without_index() {
        match parse_intent("take") {
            ParseResult::Invalid(msg) => assert!(msg.contains("pile index")),
            _ => panic!("Expected Invalid result"),
        }
    }

    #[test]
    fn test_parse_meld() {
        let expected = PlayerIntent::PlayMeld {
            cards: vec![
                Card::new(Suit::Spades, 7).id,
                Card::new(Suit::Spades, 8).id,
                Card::new(Suit::Spades, 9).id,
            ],
        };
        assert_eq!(parse_intent("meld 7P 8P 9P"), ParseResult::Intent(expected));
    }

    #[test]
    fn test_parse_meld_too_few_cards() {
        match parse_intent("meld 7P 8P") {
            ParseResult::Invalid(msg) => assert!(msg.contains("three cards")),
            _ => panic!("Expected Invalid result"),
        }
    }

    #[test]
    fn test_parse_add_and_swap() {
        assert_eq!(
            parse_intent("add 7P 3"),
            ParseResult::Intent(PlayerIntent::AddToMeld {
                card: Card::new(Suit::Spades, 7).id,
                meld: MeldId(3),
            })
        );
        assert_eq!(
            parse_intent("swap 6C #2"),
            ParseResult::Intent(PlayerIntent::ReplaceJoker {
                card: Card::new(Suit::Cups, 6).id,
                meld: MeldId(2),
            })
        );
    }

    #[test]
    fn test_parse_close_open() {
        assert_eq!(
            parse_intent("close 1"),
            ParseResult::Intent(PlayerIntent::CloseMeld { meld: MeldId(1) })
        );
        assert_eq!(
            parse_intent("open 1"),
            ParseResult::Intent(PlayerIntent::OpenMeld { meld: MeldId(1) })
        );
    }

    #[test]
    fn test_parse_discard_shorthand() {
        assert_eq!(
            parse_intent("d kh"),
            ParseResult::Intent(PlayerIntent::Discard {
                card: Card::new(Suit::Hearts, 13).id,
            })
        );
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_intent("q"), ParseResult::Quit);
        assert_eq!(parse_intent("quit"), ParseResult::Quit);
        assert_eq!(parse_intent("Q"), ParseResult::Quit);
    }

    #[test]
    fn test_parse_invalid_command() {
        match parse_intent("shuffle") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized command")),
            _ => panic!("Expected Invalid result"),
        }
    }
}
