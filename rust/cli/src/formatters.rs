//! Card, meld, and action formatters for terminal display.
//!
//! Pure functions turning engine types into the compact notation the
//! interactive commands print and parse: rank then suit letter ("7P",
//! "10C", "AH"), "*S" for the swords joker.

use ramino_engine::cards::Card;
use ramino_engine::meld::{Meld, MeldKind};
use ramino_engine::state::{GameState, Seat, TurnAction};

/// Format a single card ("7P", "AH", "*S").
pub fn format_card(card: &Card) -> String {
    card.to_string()
}

/// Format a hand as a space-separated card list.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    formatted.join(" ")
}

/// Format a meld for the table display: "#3 run [5P 6P 7P] (closed)".
pub fn format_meld(meld: &Meld) -> String {
    let kind = match meld.kind {
        MeldKind::Set => "set",
        MeldKind::Run => "run",
    };
    let closed = if meld.closed { " (closed)" } else { "" };
    format!("#{} {} [{}]{}", meld.id.0, kind, format_hand(&meld.cards), closed)
}

/// Format the score line for both seats.
pub fn format_scores(state: &GameState) -> String {
    format!(
        "{}: {}  {}: {}",
        state.player.name, state.player.score, state.opponent.name, state.opponent.score
    )
}

fn seat_name(state: &GameState, seat: Seat) -> &str {
    &state.seat(seat).name
}

/// Format a turn history entry as a human-readable line.
pub fn format_action(state: &GameState, action: &TurnAction) -> String {
    match action {
        TurnAction::DrawDeck { seat } => {
            format!("{} drew from the deck", seat_name(state, *seat))
        }
        TurnAction::DrawDiscard { seat, count } => format!(
            "{} took {} card{} from the discard pile",
            seat_name(state, *seat),
            count,
            if *count == 1 { "" } else { "s" }
        ),
        TurnAction::PlayMeld { seat, kind, count } => {
            let kind = match kind {
                MeldKind::Set => "set",
                MeldKind::Run => "run",
            };
            format!(
                "{} played a {}-card {}",
                seat_name(state, *seat),
                count,
                kind
            )
        }
        TurnAction::AddToMeld { seat, rank, suit } => {
            let card = format!(
                "{}{}",
                ramino_engine::cards::rank_display(*rank),
                suit.letter()
            );
            format!("{} added {} to a meld", seat_name(state, *seat), card)
        }
        TurnAction::ReplaceJoker { seat, meld } => {
            format!(
                "{} swapped a joker out of meld #{}",
                seat_name(state, *seat),
                meld.0
            )
        }
        TurnAction::CloseMeld { seat, meld } => {
            format!("{} closed meld #{}", seat_name(state, *seat), meld.0)
        }
        TurnAction::OpenMeld { seat, meld } => {
            format!("{} reopened meld #{}", seat_name(state, *seat), meld.0)
        }
        TurnAction::Discard { seat, card } => {
            format!("{} discarded {}", seat_name(state, *seat), format_card(card))
        }
        TurnAction::GoOut { seat } => format!("{} went out!", seat_name(state, *seat)),
    }
}
