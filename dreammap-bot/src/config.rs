//! Bot configuration: environment, optional JSON config file, CLI token override.
//!
//! Precedence (lowest to highest): env vars, config file, `--token`. Empty values count as unset.

use anyhow::{bail, Context, Result};
use llm_client::{mask_token, DEFAULT_GEMINI_MODEL, GEMINI_DEFAULT_BASE_URL};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Database file used when `DREAMMAP_DB` is not set.
pub const DEFAULT_DB_PATH: &str = "dreammap.sqlite3";

/// DreamMap bot configuration.
#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Gemini API key; dream analysis is disabled without it.
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// SQLite database file.
    pub database_path: String,
    /// Optional Telegram Bot API base URL (tests point it at a mock server).
    pub telegram_api_url: Option<String>,
}

/// Keys accepted in the JSON config file. Same names as the env vars.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "TELEGRAM_BOT_TOKEN")]
    telegram_bot_token: Option<String>,
    #[serde(rename = "GOOGLE_API_KEY")]
    google_api_key: Option<String>,
    #[serde(rename = "GEMINI_MODEL")]
    gemini_model: Option<String>,
    #[serde(rename = "DREAMMAP_DB")]
    dreammap_db: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_opt(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

/// Reads the config file. A missing implicit file is fine; a broken implicit file is logged and
/// skipped; any problem with an explicitly requested file is an error.
fn read_config_file(explicit: Option<&Path>) -> Result<ConfigFile> {
    let (path, required): (PathBuf, bool) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
        return Ok(ConfigFile::default());
    }

    let parsed = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
        .and_then(|raw| {
            serde_json::from_str::<ConfigFile>(&raw)
                .with_context(|| format!("Invalid JSON in config file {}", path.display()))
        });

    match parsed {
        Ok(file) => Ok(file),
        Err(e) if !required => {
            warn!(error = %e, "Ignoring unreadable default config file");
            Ok(ConfigFile::default())
        }
        Err(e) => Err(e),
    }
}

impl BotConfig {
    /// Loads configuration. `token` (from `--token`) overrides everything else.
    ///
    /// Fails when no Telegram token is configured anywhere.
    pub fn load(token: Option<String>, config_file: Option<&Path>) -> Result<Self> {
        let file = read_config_file(config_file)?;

        let bot_token = non_empty(token)
            .or_else(|| non_empty(file.telegram_bot_token))
            .or_else(|| env_opt("TELEGRAM_BOT_TOKEN"));
        let Some(bot_token) = bot_token else {
            bail!("TELEGRAM_BOT_TOKEN not set (env, config file or --token)");
        };

        let google_api_key =
            non_empty(file.google_api_key).or_else(|| env_opt("GOOGLE_API_KEY"));
        let gemini_model = non_empty(file.gemini_model)
            .or_else(|| env_opt("GEMINI_MODEL"))
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let database_path = non_empty(file.dreammap_db)
            .or_else(|| env_opt("DREAMMAP_DB"))
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let gemini_base_url =
            env_opt("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_DEFAULT_BASE_URL.to_string());
        let telegram_api_url =
            env_opt("TELEGRAM_API_URL").or_else(|| env_opt("TELOXIDE_API_URL"));

        Ok(Self {
            bot_token,
            google_api_key,
            gemini_model,
            gemini_base_url,
            database_path,
            telegram_api_url,
        })
    }

    /// Database path alone, for commands that do not talk to Telegram (`premium`, `check`).
    /// Same precedence as [`BotConfig::load`] but no token is required.
    pub fn database_path(config_file: Option<&Path>) -> Result<String> {
        let file = read_config_file(config_file)?;
        Ok(non_empty(file.dreammap_db)
            .or_else(|| env_opt("DREAMMAP_DB"))
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()))
    }

    /// True when a Gemini key is configured.
    pub fn llm_enabled(&self) -> bool {
        self.google_api_key.is_some()
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &mask_token(&self.bot_token))
            .field(
                "google_api_key",
                &self.google_api_key.as_deref().map(mask_token),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("database_path", &self.database_path)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}
