use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub player_name: String,
    pub seed: Option<u64>,
    pub save_path: String,
    pub bot: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub player_name: ValueSource,
    pub seed: ValueSource,
    pub save_path: ValueSource,
    pub bot: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            player_name: ValueSource::Default,
            seed: ValueSource::Default,
            save_path: ValueSource::Default,
            bot: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_name: "You".into(),
            seed: None,
            save_path: "ramino_save.json".into(),
            bot: "greedy".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[allow(dead_code)]
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("RAMINO_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.player_name {
            cfg.player_name = v;
            sources.player_name = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.save_path {
            cfg.save_path = v;
            sources.save_path = ValueSource::File;
        }
        if let Some(v) = f.bot {
            cfg.bot = v;
            sources.bot = ValueSource::File;
        }
    }

    if let Ok(name) = std::env::var("RAMINO_PLAYER") {
        if !name.is_empty() {
            cfg.player_name = name;
            sources.player_name = ValueSource::Env;
        }
    }
    if let Ok(seed) = std::env::var("RAMINO_SEED") {
        if !seed.is_empty() {
            cfg.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
            );
            sources.seed = ValueSource::Env;
        }
    }
    if let Ok(path) = std::env::var("RAMINO_SAVE") {
        if !path.is_empty() {
            cfg.save_path = path;
            sources.save_path = ValueSource::Env;
        }
    }
    if let Ok(bot) = std::env::var("RAMINO_BOT") {
        if !bot.is_empty() {
            cfg.bot = bot;
            sources.bot = ValueSource::Env;
        }
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    save_path: Option<String>,
    #[serde(default)]
    bot: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.player_name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player_name must not be empty".into(),
        ));
    }
    if cfg.save_path.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_path must not be empty".into(),
        ));
    }
    if cfg.bot != "greedy" {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown bot '{}'",
            cfg.bot
        )));
    }
    Ok(())
}
