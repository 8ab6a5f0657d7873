//! Session facade: one human seat, one bot seat, and a persistence seam.
//!
//! The facade owns the engine, the bot, and the snapshot store. Every
//! accepted player intent is written back to the store before the call
//! returns, so quitting mid-turn resumes exactly where play stopped. A save
//! that fails to load or validate falls back to a fresh session instead of
//! refusing to start.

use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ramino_ai::{create_bot, pick_bot_name, BotStrategy, DrawChoice, MeldMove};
use ramino_engine::engine::Engine;
use ramino_engine::state::{GamePhase, GameState, Seat, TurnAction};

use crate::store::{SavedSession, SnapshotStore};
use crate::validation::PlayerIntent;

pub struct GameSession {
    engine: Engine,
    bot: Box<dyn BotStrategy>,
    store: Box<dyn SnapshotStore>,
    seed: u64,
}

impl GameSession {
    /// Resume from the store if it holds a usable snapshot, otherwise start
    /// a fresh game. Returns the session and whether it was resumed.
    pub fn resume_or_new(
        seed: u64,
        player_name: &str,
        bot_type: &str,
        store: Box<dyn SnapshotStore>,
    ) -> (Self, bool) {
        let bot = create_bot(bot_type);
        if let Ok(Some(saved)) = store.load() {
            if let Ok(engine) = Engine::from_snapshot(saved.state, saved.seed) {
                return (
                    Self {
                        engine,
                        bot,
                        store,
                        seed: saved.seed,
                    },
                    true,
                );
            }
        }

        let bot_name = pick_bot_name(&mut StdRng::seed_from_u64(seed));
        let mut engine = Engine::new(Some(seed), player_name, bot_name);
        engine.start_round();
        let mut session = Self {
            engine,
            bot,
            store,
            seed,
        };
        let _ = session.persist();
        (session, false)
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Apply one game-mutating intent. `Ok(true)` means the engine accepted
    /// the move and the snapshot was saved; `Ok(false)` is a rule rejection.
    pub fn apply_intent(&mut self, intent: &PlayerIntent) -> Result<bool, String> {
        let accepted = match intent {
            PlayerIntent::DrawDeck => self.engine.draw_from_deck(),
            PlayerIntent::DrawDiscard { index } => self.engine.draw_from_discard(*index),
            PlayerIntent::PlayMeld { cards } => self.engine.play_meld(cards),
            PlayerIntent::AddToMeld { card, meld } => self.engine.add_to_meld(*card, *meld),
            PlayerIntent::ReplaceJoker { card, meld } => self.engine.replace_joker(*card, *meld),
            PlayerIntent::CloseMeld { meld } => self.engine.close_meld(*meld),
            PlayerIntent::OpenMeld { meld } => self.engine.open_meld(*meld),
            PlayerIntent::Discard { card } => self.engine.discard(*card),
            PlayerIntent::ShowHand | PlayerIntent::ShowTable | PlayerIntent::Help => false,
        };
        if accepted {
            self.persist()?;
        }
        Ok(accepted)
    }

    /// Play out the bot's whole turn and return the actions it took.
    pub fn run_bot_turn(&mut self) -> Result<Vec<TurnAction>, String> {
        let before = self.engine.state().turn_history.len();
        if self.engine.state().current == Seat::Opponent {
            drive_turn(&mut self.engine, self.bot.as_ref());
            self.persist()?;
        }
        Ok(self.engine.state().turn_history[before..].to_vec())
    }

    /// Deal the next round once the current one has been scored.
    pub fn start_next_round(&mut self) -> Result<bool, String> {
        let started = self.engine.start_next_round();
        if started {
            self.persist()?;
        }
        Ok(started)
    }

    /// Throw the whole game away and start over with the same seed.
    pub fn restart(&mut self) -> Result<(), String> {
        let player_name = self.engine.state().player.name.clone();
        let bot_name = self.engine.state().opponent.name.clone();
        self.store.clear()?;
        self.engine = Engine::new(Some(self.seed), &player_name, &bot_name);
        self.engine.start_round();
        self.persist()
    }

    fn persist(&mut self) -> Result<(), String> {
        let session = SavedSession {
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            seed: self.seed,
            state: self.engine.state().clone(),
        };
        self.store.save(&session)
    }
}

/// Drive one complete turn for whichever seat is to act: draw, lay melds,
/// work the table, discard. Returns `false` if the turn could not finish
/// (nothing left to draw, or no legal discard).
pub fn drive_turn(engine: &mut Engine, bot: &dyn BotStrategy) -> bool {
    if engine.state().phase != GamePhase::Playing {
        return false;
    }

    let drew = match bot.choose_draw(engine.state()) {
        DrawChoice::Deck => engine.draw_from_deck(),
        DrawChoice::Discard { from_index } => {
            engine.draw_from_discard(from_index) || engine.draw_from_deck()
        }
    };
    if !drew {
        return false;
    }

    // Going out happens on the discard, so always keep one card back.
    for group in bot.choose_melds(engine.state()) {
        if group.len() >= engine.state().current_hand().len() {
            continue;
        }
        engine.play_meld(&group);
    }
    for mv in bot.choose_meld_moves(engine.state()) {
        if engine.state().current_hand().len() <= 1 {
            break;
        }
        match mv {
            MeldMove::Add { card, meld } => {
                engine.add_to_meld(card, meld);
            }
            MeldMove::ReplaceJoker { card, meld } => {
                engine.replace_joker(card, meld);
            }
        }
    }
    for meld in bot.choose_closes(engine.state()) {
        engine.close_meld(meld);
    }

    if let Some(card) = bot.choose_discard(engine.state()) {
        if engine.discard(card) {
            return true;
        }
    }
    let ids: Vec<_> = engine.state().current_hand().iter().map(|c| c.id).collect();
    for id in ids {
        if engine.discard(id) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use ramino_engine::engine::CARDS_PER_HAND;

    #[test]
    fn test_fresh_session_deals_both_hands() {
        let (session, resumed) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        assert!(!resumed);
        assert_eq!(session.state().player.hand.len(), CARDS_PER_HAND);
        assert_eq!(session.state().opponent.hand.len(), CARDS_PER_HAND);
        assert_eq!(session.state().discard_pile.len(), 1);
    }

    #[test]
    fn test_bot_name_comes_from_the_pool() {
        let (session, _) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        assert!(ramino_ai::BOT_NAMES.contains(&session.state().opponent.name.as_str()));
    }

    #[test]
    fn test_accepted_intent_is_persisted() {
        let (mut session, _) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        let accepted = session.apply_intent(&PlayerIntent::DrawDeck).unwrap();
        assert!(accepted);
        assert_eq!(session.state().player.hand.len(), CARDS_PER_HAND + 1);

        let saved = session.store.load().unwrap().unwrap();
        assert_eq!(&saved.state, session.state());
        assert_eq!(saved.seed, 42);
    }

    #[test]
    fn test_rejected_intent_reports_false() {
        let (mut session, _) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        // Drawing twice in one turn is not a legal move.
        assert!(session.apply_intent(&PlayerIntent::DrawDeck).unwrap());
        assert!(!session.apply_intent(&PlayerIntent::DrawDeck).unwrap());
    }

    #[test]
    fn test_resume_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let (mut session, _) = GameSession::resume_or_new(
            42,
            "Alice",
            "greedy",
            Box::new(FileStore::new(&path)),
        );
        session.apply_intent(&PlayerIntent::DrawDeck).unwrap();
        let expected = session.state().clone();
        drop(session);

        let (session, resumed) = GameSession::resume_or_new(
            7,
            "Someone Else",
            "greedy",
            Box::new(FileStore::new(&path)),
        );
        assert!(resumed);
        assert_eq!(session.state(), &expected);
        assert_eq!(session.seed(), 42);
    }

    #[test]
    fn test_corrupt_save_falls_back_to_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "{not json").unwrap();

        let (session, resumed) = GameSession::resume_or_new(
            42,
            "Alice",
            "greedy",
            Box::new(FileStore::new(&path)),
        );
        assert!(!resumed);
        assert_eq!(session.state().player.hand.len(), CARDS_PER_HAND);
    }

    #[test]
    fn test_bot_turn_hands_play_back() {
        let (mut session, _) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        // Finish the human turn first.
        session.apply_intent(&PlayerIntent::DrawDeck).unwrap();
        let card = session.state().player.hand[0].id;
        assert!(session
            .apply_intent(&PlayerIntent::Discard { card })
            .unwrap());
        assert_eq!(session.state().current, Seat::Opponent);

        let actions = session.run_bot_turn().unwrap();
        assert!(!actions.is_empty());
        if session.state().phase == GamePhase::Playing {
            assert_eq!(session.state().current, Seat::Player);
        }
    }

    #[test]
    fn test_restart_clears_progress() {
        let (mut session, _) =
            GameSession::resume_or_new(42, "Alice", "greedy", Box::new(MemoryStore::new()));
        session.apply_intent(&PlayerIntent::DrawDeck).unwrap();
        session.restart().unwrap();
        assert_eq!(session.state().player.hand.len(), CARDS_PER_HAND);
        assert_eq!(session.state().round_number, 1);
        assert!(session.state().turn_history.is_empty());
    }
}
