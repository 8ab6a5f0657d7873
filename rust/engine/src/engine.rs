//! The turn state machine. Every transition is total: an intent that fails
//! its precondition returns `false` and leaves the state exactly as it was,
//! so callers re-prompt without special-case recovery. Only snapshot loading
//! can produce a [`GameError`].

use crate::cards::CardId;
use crate::deck::{deal, remove_cards, sort_hand, Deck};
use crate::errors::GameError;
use crate::meld::{
    can_add_to_meld, can_replace_joker, identify_meld, normalize_run, Meld, MeldId, MeldKind,
};
use crate::scoring::{round_score, winner_if_game_over};
use crate::state::{GamePhase, GameState, Seat, TurnAction, TurnPhase};

/// Cards dealt to each player at round start.
pub const CARDS_PER_HAND: usize = 10;

/// Owns the game state, the shuffle randomness, and the meld id counter.
/// The counter is scoped to this engine instance so concurrent sessions
/// never collide and tests reset it for free.
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    deck: Deck,
    next_meld_id: u32,
}

impl Engine {
    pub fn new(seed: Option<u64>, player_name: &str, bot_name: &str) -> Self {
        let seed = seed.unwrap_or(0x52A3_1170);
        Self {
            state: GameState::new(player_name, bot_name),
            deck: Deck::new_with_seed(seed),
            next_meld_id: 1,
        }
    }

    /// Rebuild an engine from a persisted snapshot. Refuses structurally
    /// broken states; the caller falls back to a fresh session on error.
    /// Run melds are re-normalized into slot order, since `validate` accepts
    /// them in any card order but joker replacement resolves by slot.
    pub fn from_snapshot(mut state: GameState, seed: u64) -> Result<Self, GameError> {
        state.validate()?;
        for meld in &mut state.melds {
            if meld.kind == MeldKind::Run {
                if let Some(slots) = normalize_run(&meld.cards) {
                    meld.cards = slots;
                }
            }
        }
        let next_meld_id = state.melds.iter().map(|m| m.id.0).max().unwrap_or(0) + 1;
        Ok(Self {
            state,
            deck: Deck::new_with_seed(seed),
            next_meld_id,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Shuffle, deal both hands, seed the discard pile with one card, and
    /// hand the first turn to the human seat. Melds and history reset;
    /// scores and round number carry over.
    pub fn start_round(&mut self) {
        let pile = self.deck.shuffled();
        let (player_hand, rest) = deal(pile, CARDS_PER_HAND);
        let (opponent_hand, mut rest) = deal(rest, CARDS_PER_HAND);
        let deck = rest.split_off(1);
        let s = &mut self.state;
        s.phase = GamePhase::Playing;
        s.turn_phase = TurnPhase::Draw;
        s.current = Seat::Player;
        s.player.hand = player_hand;
        s.opponent.hand = opponent_hand;
        sort_hand(&mut s.player.hand);
        sort_hand(&mut s.opponent.hand);
        s.discard_pile = rest;
        s.deck = deck;
        s.melds.clear();
        s.drawn_from_discard = None;
        s.turn_history.clear();
    }

    /// Advance to the next round once the current one has been scored.
    pub fn start_next_round(&mut self) -> bool {
        if self.state.phase != GamePhase::RoundEnd {
            return false;
        }
        self.state.round_number += 1;
        self.start_round();
        true
    }

    /// Move the front deck card into the acting player's hand. When the
    /// draw pile is empty, the discard pile minus its top card is reshuffled
    /// into a fresh pile first; with nothing left to reshuffle the intent is
    /// rejected rather than looping.
    pub fn draw_from_deck(&mut self) -> bool {
        if !self.in_turn_phase(TurnPhase::Draw) {
            return false;
        }
        if self.state.deck.is_empty() {
            if self.state.discard_pile.len() <= 1 {
                return false;
            }
            let top = self.state.discard_pile.split_off(self.state.discard_pile.len() - 1);
            let mut pile = std::mem::replace(&mut self.state.discard_pile, top);
            self.deck.reshuffle(&mut pile);
            self.state.deck = pile;
        }
        let card = self.state.deck.remove(0);
        let seat = self.state.current;
        let hand = &mut self.state.seat_mut(seat).hand;
        hand.push(card);
        sort_hand(hand);
        self.state.drawn_from_discard = None;
        self.state.turn_phase = TurnPhase::Play;
        self.state.turn_history.push(TurnAction::DrawDeck { seat });
        true
    }

    /// Take the discard card at `index` and everything placed on top of it
    /// since. The whole slice joins the hand; its first card is remembered
    /// as undiscadable for the rest of the turn.
    pub fn draw_from_discard(&mut self, index: usize) -> bool {
        if !self.in_turn_phase(TurnPhase::Draw) {
            return false;
        }
        if index >= self.state.discard_pile.len() {
            return false;
        }
        let taken = self.state.discard_pile.split_off(index);
        let seat = self.state.current;
        let count = taken.len();
        let hand = &mut self.state.seat_mut(seat).hand;
        hand.extend(taken.iter().copied());
        sort_hand(hand);
        self.state.drawn_from_discard = Some(taken);
        self.state.turn_phase = TurnPhase::Play;
        self.state
            .turn_history
            .push(TurnAction::DrawDiscard { seat, count });
        true
    }

    /// Lay a new meld from hand cards. All ids must be distinct and in the
    /// acting player's hand, and the group must classify as a set or run.
    pub fn play_meld(&mut self, cards: &[CardId]) -> bool {
        if !self.in_turn_phase(TurnPhase::Play) {
            return false;
        }
        let seat = self.state.current;
        let hand = &self.state.seat(seat).hand;
        let mut picked = Vec::with_capacity(cards.len());
        for (i, id) in cards.iter().enumerate() {
            // a repeated id would duplicate the physical card
            if cards[..i].contains(id) {
                return false;
            }
            match hand.iter().find(|c| c.id == *id) {
                Some(card) => picked.push(*card),
                None => return false,
            }
        }
        let kind = match identify_meld(&picked) {
            Some(kind) => kind,
            None => return false,
        };
        let id = MeldId(self.next_meld_id);
        self.next_meld_id += 1;
        let count = picked.len();
        let hand = &mut self.state.seat_mut(seat).hand;
        remove_cards(hand, cards);
        sort_hand(hand);
        self.state.melds.push(Meld::new(id, picked, kind, seat));
        self.state
            .turn_history
            .push(TurnAction::PlayMeld { seat, kind, count });
        true
    }

    /// Extend an open meld on the table with a hand card. Legal against a
    /// meld owned by either seat; melds are a shared resource once played.
    pub fn add_to_meld(&mut self, card: CardId, meld: MeldId) -> bool {
        if !self.in_turn_phase(TurnPhase::Play) {
            return false;
        }
        let seat = self.state.current;
        let picked = match self.state.seat(seat).card(card) {
            Some(c) => *c,
            None => return false,
        };
        match self.state.meld(meld) {
            Some(m) if can_add_to_meld(&picked, m) => {}
            _ => return false,
        }
        if let Some(m) = self.state.meld_mut(meld) {
            m.push_card(picked);
        }
        let hand = &mut self.state.seat_mut(seat).hand;
        remove_cards(hand, &[card]);
        self.state.turn_history.push(TurnAction::AddToMeld {
            seat,
            rank: picked.rank,
            suit: picked.suit,
        });
        true
    }

    /// Swap a hand card into the joker slot it legitimately fills; the
    /// displaced joker returns to the acting player's hand.
    pub fn replace_joker(&mut self, card: CardId, meld: MeldId) -> bool {
        if !self.in_turn_phase(TurnPhase::Play) {
            return false;
        }
        let seat = self.state.current;
        let picked = match self.state.seat(seat).card(card) {
            Some(c) => *c,
            None => return false,
        };
        let slot = match self.state.meld(meld) {
            Some(m) => match can_replace_joker(&picked, m) {
                Some(slot) => slot,
                None => return false,
            },
            None => return false,
        };
        let joker = match self.state.meld_mut(meld) {
            Some(m) => m.replace_slot(slot, picked),
            None => return false,
        };
        let hand = &mut self.state.seat_mut(seat).hand;
        remove_cards(hand, &[card]);
        hand.push(joker);
        sort_hand(hand);
        self.state
            .turn_history
            .push(TurnAction::ReplaceJoker { seat, meld });
        true
    }

    /// Freeze a meld against additions and joker replacement. Owner only,
    /// and only on the owner's turn.
    pub fn close_meld(&mut self, meld: MeldId) -> bool {
        self.set_meld_closed(meld, true)
    }

    /// Reopen a previously closed meld. Owner only, on the owner's turn.
    pub fn open_meld(&mut self, meld: MeldId) -> bool {
        self.set_meld_closed(meld, false)
    }

    fn set_meld_closed(&mut self, meld: MeldId, closed: bool) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        let seat = self.state.current;
        match self.state.meld_mut(meld) {
            Some(m) if m.owner == seat && m.closed != closed => m.closed = closed,
            _ => return false,
        }
        let action = if closed {
            TurnAction::CloseMeld { seat, meld }
        } else {
            TurnAction::OpenMeld { seat, meld }
        };
        self.state.turn_history.push(action);
        true
    }

    /// Whether the current player may discard this card right now.
    pub fn can_discard(&self, card: CardId) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        if !matches!(self.state.turn_phase, TurnPhase::Play | TurnPhase::Discard) {
            return false;
        }
        if !self.state.seat(self.state.current).holds(card) {
            return false;
        }
        self.state.restricted_discard() != Some(card)
    }

    /// Throw a hand card onto the discard pile and hand the turn over. An
    /// emptied hand ends the round instead. The first card taken from the
    /// discard pile this turn may not be thrown back.
    pub fn discard(&mut self, card: CardId) -> bool {
        if !self.can_discard(card) {
            return false;
        }
        let seat = self.state.current;
        let picked = match self.state.seat(seat).card(card) {
            Some(c) => *c,
            None => return false,
        };
        let hand = &mut self.state.seat_mut(seat).hand;
        remove_cards(hand, &[card]);
        let went_out = hand.is_empty();
        self.state.discard_pile.push(picked);
        self.state
            .turn_history
            .push(TurnAction::Discard { seat, card: picked });
        if went_out {
            self.go_out(seat);
        } else {
            self.state.current = seat.other();
            self.state.turn_phase = TurnPhase::Draw;
            self.state.drawn_from_discard = None;
        }
        true
    }

    fn go_out(&mut self, winner: Seat) {
        let loser = winner.other();
        let transfer = round_score(&self.state.seat(loser).hand);
        self.state.seat_mut(winner).score += transfer.winner_points;
        self.state.seat_mut(loser).score += transfer.loser_penalty;
        self.state.drawn_from_discard = None;
        self.state
            .turn_history
            .push(TurnAction::GoOut { seat: winner });
        self.state.phase = if winner_if_game_over(&self.state).is_some() {
            GamePhase::GameOver
        } else {
            GamePhase::RoundEnd
        };
    }

    fn in_turn_phase(&self, phase: TurnPhase) -> bool {
        self.state.phase == GamePhase::Playing && self.state.turn_phase == phase
    }
}
