//! Component factory: builds BotComponents from config. Isolates assembly logic from the runner.

use anyhow::Result;
use dream_analysis::DreamAnalyzer;
use dreammap_core::Bot as CoreBot;
use handler_chain::HandlerChain;
use llm_client::{GeminiLlmClient, LlmClient};
use std::sync::Arc;
use storage::DreamRepository;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, DreamHandler, UserHandler};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for the runner; produced by the component factory.
pub struct BotComponents {
    pub repo: Arc<DreamRepository>,
    pub analyzer: DreamAnalyzer,
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
}

/// Opens the database (running migrations).
#[instrument]
pub async fn open_repository(database_path: &str) -> Result<Arc<DreamRepository>> {
    let repo = DreamRepository::new(database_path)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to initialize dream storage");
            anyhow::anyhow!("Failed to initialize dream storage: {}", e)
        })?;
    Ok(Arc::new(repo))
}

/// Gemini-backed analyzer, or an unavailable one when no API key is configured.
pub fn build_analyzer(config: &BotConfig) -> DreamAnalyzer {
    let Some(api_key) = config.google_api_key.clone() else {
        warn!("GOOGLE_API_KEY not set, dream analysis disabled");
        return DreamAnalyzer::new(None);
    };
    let llm: Arc<dyn LlmClient> = Arc::new(
        GeminiLlmClient::with_base_url(api_key, config.gemini_base_url.clone())
            .with_model(config.gemini_model.clone()),
    );
    info!(model = %config.gemini_model, "Gemini analysis enabled");
    DreamAnalyzer::new(Some(llm))
}

/// teloxide Bot for the configured token, pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds BotComponents from config.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = open_repository(&config.database_path).await?;
    let analyzer = build_analyzer(config);
    let teloxide_bot = build_teloxide_bot(config);
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    Ok(BotComponents {
        repo,
        analyzer,
        teloxide_bot,
        bot_adapter,
    })
}

/// This bot's username from `getMe`, used to ignore commands addressed to other bots.
/// `None` when Telegram cannot be reached; commands are then accepted whatever their suffix.
pub async fn fetch_bot_username(bot: &Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            info!(username = ?me.user.username, "Connected to Telegram");
            me.user.username.clone()
        }
        Err(e) => {
            warn!(error = %e, "getMe failed; continuing with polling");
            None
        }
    }
}

/// Builds the handler chain (user registration → commands → dreams).
pub fn build_handler_chain(
    repo: Arc<DreamRepository>,
    analyzer: DreamAnalyzer,
    bot: Arc<dyn CoreBot>,
    bot_username: Option<String>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(UserHandler::new(repo.clone())))
        .add_handler(Arc::new(CommandHandler::new(
            repo.clone(),
            analyzer.clone(),
            bot.clone(),
            bot_username,
        )))
        .add_handler(Arc::new(DreamHandler::new(repo, analyzer, bot)))
}
