use crate::cards::Card;
use crate::state::{GameState, Seat};

/// A game ends once a cumulative score strictly exceeds this.
pub const WIN_SCORE: i32 = 25;

/// Point transfer at round end.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RoundScore {
    pub winner_points: i32,
    pub loser_penalty: i32,
}

pub fn jokers_in_hand(hand: &[Card]) -> usize {
    hand.iter().filter(|c| c.joker).count()
}

/// Winner collects one point per joker left in the loser's hand, minimum one
/// for going out; the loser drops one point per held joker. Scores are never
/// clamped.
pub fn round_score(loser_hand: &[Card]) -> RoundScore {
    let jokers = jokers_in_hand(loser_hand) as i32;
    RoundScore {
        winner_points: jokers.max(1),
        loser_penalty: -jokers,
    }
}

/// The seat that has won the game, if any. Exactly 25 is not enough; the
/// score must strictly exceed the threshold.
pub fn winner_if_game_over(state: &GameState) -> Option<Seat> {
    if state.player.score > WIN_SCORE {
        Some(Seat::Player)
    } else if state.opponent.score > WIN_SCORE {
        Some(Seat::Opponent)
    } else {
        None
    }
}

/// Heuristic card cost for the bot: jokers are the most expensive to be
/// caught holding, numbered cards cost their rank.
pub fn card_value(card: &Card) -> i32 {
    if card.joker {
        15
    } else {
        card.rank as i32
    }
}

pub fn hand_value(hand: &[Card]) -> i32 {
    hand.iter().map(card_value).sum()
}
