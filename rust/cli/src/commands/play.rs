//! # Play Command
//!
//! Interactive rummy against the bot. The human drives their own turn with
//! text commands; the bot's turn is played out automatically and echoed as a
//! list of actions. The session is saved after every accepted move, so
//! quitting mid-turn and running `play` again resumes in place.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_action, format_card, format_hand, format_meld, format_scores};
use crate::io_utils::read_stdin_line;
use crate::session::GameSession;
use crate::store::{FileStore, SnapshotStore};
use crate::ui;
use crate::validation::{parse_intent, ParseResult, PlayerIntent};
use ramino_engine::scoring::winner_if_game_over;
use ramino_engine::state::{GamePhase, GameState, Seat};
use std::io::{BufRead, Write};

const HELP_TEXT: &str = "Commands:
  draw              draw the top card of the deck
  take <n>          take the discard pile from index <n> upward
  meld <cards>      lay a new meld (e.g. 'meld 7P 8P 9P')
  add <card> <m>    add a hand card to meld #<m>
  swap <card> <m>   trade a hand card for a joker in meld #<m>
  close <m>         close meld #<m> against further changes
  open <m>          reopen meld #<m>
  discard <card>    discard and end your turn
  hand              show your hand
  table             show melds and the discard pile
  q                 save and quit";

/// Handle the play command: interactive rummy gameplay.
///
/// # Arguments
///
/// * `name` - Display name for the human seat (overrides config)
/// * `seed` - RNG seed for reproducibility (overrides config)
/// * `save` - Save file path (overrides config)
/// * `fresh` - Discard any existing save before starting
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for player commands
pub fn handle_play_command(
    name: Option<String>,
    seed: Option<u64>,
    save: Option<String>,
    fresh: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = match config::load_with_sources() {
        Ok(r) => r.config,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let player_name = name.unwrap_or(cfg.player_name);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let save_path = save.unwrap_or(cfg.save_path);

    let mut store = FileStore::new(&save_path);
    if fresh {
        store.clear()?;
    }
    let (mut session, resumed) =
        GameSession::resume_or_new(seed, &player_name, &cfg.bot, Box::new(store));

    if resumed {
        writeln!(out, "Resumed saved game from {}", save_path)?;
    } else {
        writeln!(out, "New game (seed {})", session.seed())?;
    }
    writeln!(
        out,
        "{} vs {}. Type 'help' for commands.",
        session.state().player.name,
        session.state().opponent.name
    )?;

    loop {
        match session.state().phase {
            GamePhase::GameOver => {
                writeln!(out, "\nGame over. {}", format_scores(session.state()))?;
                if let Some(winner) = winner_if_game_over(session.state()) {
                    writeln!(out, "{} wins the game!", session.state().seat(winner).name)?;
                }
                break;
            }
            GamePhase::RoundEnd => {
                writeln!(
                    out,
                    "\nRound {} over. {}",
                    session.state().round_number,
                    format_scores(session.state())
                )?;
                write!(out, "Press Enter for the next round (q to quit): ")?;
                out.flush()?;
                match read_stdin_line(stdin) {
                    None => break,
                    Some(line) if line == "q" || line == "quit" => break,
                    Some(_) => {
                        session.start_next_round()?;
                        writeln!(out, "Round {}", session.state().round_number)?;
                    }
                }
            }
            GamePhase::Playing => {
                if session.state().current == Seat::Opponent {
                    let actions = session.run_bot_turn()?;
                    for action in &actions {
                        writeln!(out, "  {}", format_action(session.state(), action))?;
                    }
                    if session.state().phase == GamePhase::Playing
                        && session.state().current == Seat::Opponent
                    {
                        ui::write_error(err, "opponent has no legal move; game abandoned")?;
                        break;
                    }
                } else if !human_turn_step(&mut session, out, err, stdin)? {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// One prompt/response cycle of the human turn. Returns `false` when the
/// player quits or stdin closes.
fn human_turn_step(
    session: &mut GameSession,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<bool, CliError> {
    show_prompt_context(session.state(), out)?;
    write!(out, "> ")?;
    out.flush()?;

    let line = match read_stdin_line(stdin) {
        Some(line) => line,
        None => return Ok(false),
    };
    match parse_intent(&line) {
        ParseResult::Quit => Ok(false),
        ParseResult::Invalid(msg) => {
            ui::write_error(err, &msg)?;
            Ok(true)
        }
        ParseResult::Intent(PlayerIntent::ShowHand) => {
            writeln!(out, "Hand: {}", format_hand(&session.state().player.hand))?;
            Ok(true)
        }
        ParseResult::Intent(PlayerIntent::ShowTable) => {
            show_table(session.state(), out)?;
            Ok(true)
        }
        ParseResult::Intent(PlayerIntent::Help) => {
            writeln!(out, "{}", HELP_TEXT)?;
            Ok(true)
        }
        ParseResult::Intent(intent) => {
            if session.apply_intent(&intent)? {
                if let Some(action) = session.state().turn_history.last() {
                    writeln!(out, "  {}", format_action(session.state(), action))?;
                }
            } else {
                ui::write_error(err, "move not allowed")?;
            }
            Ok(true)
        }
    }
}

fn show_prompt_context(state: &GameState, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "\nHand: {}", format_hand(&state.player.hand))?;
    match state.discard_pile.last() {
        Some(top) => writeln!(
            out,
            "Discard top: {} ({} in pile)  Deck: {} cards",
            format_card(top),
            state.discard_pile.len(),
            state.deck.len()
        )?,
        None => writeln!(out, "Discard pile empty  Deck: {} cards", state.deck.len())?,
    }
    Ok(())
}

fn show_table(state: &GameState, out: &mut dyn Write) -> Result<(), CliError> {
    if state.melds.is_empty() {
        writeln!(out, "No melds on the table")?;
    } else {
        for meld in &state.melds {
            writeln!(out, "  {}", format_meld(meld))?;
        }
    }
    write!(out, "Discard pile:")?;
    for (i, card) in state.discard_pile.iter().enumerate() {
        write!(out, " {}:{}", i, format_card(card))?;
    }
    writeln!(out)?;
    Ok(())
}
