//! `dreammap check`: preflight of configuration and storage before deploying.
//!
//! A missing Telegram token or an unusable database fails the check; a missing Gemini key
//! only warns, since the bot still runs without analysis.

use std::fmt;
use std::path::Path;

use llm_client::mask_token;
use tracing::instrument;

use crate::components::open_repository;
use crate::config::BotConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct CheckItem {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub items: Vec<CheckItem>,
}

impl CheckReport {
    fn push(&mut self, name: &'static str, status: CheckStatus, detail: impl Into<String>) {
        self.items.push(CheckItem {
            name,
            status,
            detail: detail.into(),
        });
    }

    /// True when no item failed (warnings are fine).
    pub fn passed(&self) -> bool {
        self.items.iter().all(|i| i.status != CheckStatus::Fail)
    }

    pub fn status_of(&self, name: &str) -> Option<CheckStatus> {
        self.items.iter().find(|i| i.name == name).map(|i| i.status)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "[{}] {}: {}", item.status, item.name, item.detail)?;
        }
        Ok(())
    }
}

/// Runs every check; never returns early so the report lists all problems at once.
#[instrument(skip(token))]
pub async fn run_checks(token: Option<String>, config_file: Option<&Path>) -> CheckReport {
    let mut report = CheckReport::default();

    let database_path = match BotConfig::load(token, config_file) {
        Ok(config) => {
            report.push(
                "telegram_token",
                CheckStatus::Ok,
                format!("set ({})", mask_token(&config.bot_token)),
            );
            match config.google_api_key.as_deref() {
                Some(key) => report.push(
                    "gemini",
                    CheckStatus::Ok,
                    format!("model {} (key {})", config.gemini_model, mask_token(key)),
                ),
                None => report.push(
                    "gemini",
                    CheckStatus::Warn,
                    "GOOGLE_API_KEY not set; dreams will not be analysed",
                ),
            }
            if let Some(url) = &config.telegram_api_url {
                match reqwest::Url::parse(url) {
                    Ok(_) => report.push("telegram_api_url", CheckStatus::Ok, url.clone()),
                    Err(e) => report.push(
                        "telegram_api_url",
                        CheckStatus::Warn,
                        format!("invalid ({e}); the default API URL will be used"),
                    ),
                }
            }
            Some(config.database_path)
        }
        Err(e) => {
            report.push("telegram_token", CheckStatus::Fail, format!("{e:#}"));
            BotConfig::database_path(config_file).ok()
        }
    };

    match database_path {
        Some(path) => match open_repository(&path).await {
            Ok(_) => report.push("database", CheckStatus::Ok, path),
            Err(e) => report.push("database", CheckStatus::Fail, format!("{path}: {e:#}")),
        },
        None => report.push("database", CheckStatus::Fail, "config file could not be read"),
    }

    report
}
