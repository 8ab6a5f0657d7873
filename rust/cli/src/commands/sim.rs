//! # Sim Command
//!
//! Bot-vs-bot simulation. Each game runs the same greedy strategy on both
//! seats until one side passes the winning score, optionally appending one
//! JSONL round record per finished round for audit and replay.

use crate::error::CliError;
use crate::session::drive_turn;
use crate::ui;
use ramino_ai::create_bot;
use ramino_engine::engine::Engine;
use ramino_engine::logger::{RoundLogger, RoundRecord, ScoreLine};
use ramino_engine::scoring::winner_if_game_over;
use ramino_engine::state::{GamePhase, Seat, TurnAction};
use std::io::Write;

/// Turns per game before the simulation is declared stuck. A rummy round
/// recycles the discard pile, so a busted heuristic could loop forever.
const MAX_TURNS: u32 = 10_000;

/// Handle the sim command: run bot-vs-bot games.
///
/// # Arguments
///
/// * `games` - Number of games to simulate (must be >= 1)
/// * `seed` - Seed for the first game; game `i` uses `seed + i`
/// * `log` - Optional JSONL path for per-round records
/// * `out` - Output stream for per-game results and the summary
/// * `err` - Error stream for warnings
pub fn handle_sim_command(
    games: u32,
    seed: Option<u64>,
    log: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let mut logger = match &log {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    let bot = create_bot("greedy");

    writeln!(out, "sim: games={} seed={}", games, seed)?;

    let mut player_wins = 0u32;
    let mut opponent_wins = 0u32;
    let mut abandoned = 0u32;

    for game in 0..games {
        let game_seed = seed.wrapping_add(game as u64);
        let mut engine = Engine::new(Some(game_seed), "Bot A", "Bot B");
        engine.start_round();

        let mut turns = 0u32;
        let winner = loop {
            match engine.state().phase {
                GamePhase::Playing => {
                    if !drive_turn(&mut engine, bot.as_ref()) {
                        ui::display_warning(
                            err,
                            &format!("game {} stalled with nothing to draw; abandoned", game + 1),
                        )?;
                        break None;
                    }
                    turns += 1;
                    if turns > MAX_TURNS {
                        return Err(CliError::Engine(format!(
                            "game {} exceeded {} turns",
                            game + 1,
                            MAX_TURNS
                        )));
                    }
                }
                GamePhase::RoundEnd | GamePhase::GameOver => {
                    if let Some(logger) = &mut logger {
                        let record = round_record(&engine, game_seed, logger.next_id());
                        logger.write(&record)?;
                    }
                    if engine.state().phase == GamePhase::GameOver {
                        break winner_if_game_over(engine.state());
                    }
                    engine.start_next_round();
                }
            }
        };

        let state = engine.state();
        match winner {
            Some(Seat::Player) => player_wins += 1,
            Some(Seat::Opponent) => opponent_wins += 1,
            None => abandoned += 1,
        }
        writeln!(
            out,
            "game {}: {} {} - {} {} ({} rounds)",
            game + 1,
            state.player.name,
            state.player.score,
            state.opponent.name,
            state.opponent.score,
            state.round_number
        )?;
    }

    writeln!(
        out,
        "simulated {} games: Bot A {} wins, Bot B {} wins{}",
        games,
        player_wins,
        opponent_wins,
        if abandoned > 0 {
            format!(", {} abandoned", abandoned)
        } else {
            String::new()
        }
    )?;
    Ok(())
}

fn round_record(engine: &Engine, game_seed: u64, round_id: String) -> RoundRecord {
    let state = engine.state();
    let winner = state.turn_history.iter().rev().find_map(|a| match a {
        TurnAction::GoOut { seat } => Some(*seat),
        _ => None,
    });
    RoundRecord {
        round_id,
        seed: Some(game_seed),
        round_number: state.round_number,
        actions: state.turn_history.clone(),
        scores: ScoreLine {
            player: state.player.score,
            opponent: state.opponent.score,
        },
        winner,
        ts: None,
        meta: Some(serde_json::json!({
            "mode": "sim",
            "final": state.phase == GamePhase::GameOver,
        })),
    }
}
