//! Configuration command handler.
//!
//! Displays the resolved configuration as JSON, each value paired with its
//! source (default, file, or environment).

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the current configuration with source tracking and displays it
/// as formatted JSON to the output stream.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "player_name": {
            "value": config.player_name,
            "source": sources.player_name,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "save_path": {
            "value": config.save_path,
            "source": sources.save_path,
        },
        "bot": {
            "value": config.bot,
            "source": sources.bot,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
