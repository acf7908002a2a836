//! Entry points behind the CLI subcommands: run the bot, toggle premium.

use anyhow::{bail, Result};
use tracing::{info, instrument};

use crate::components::{
    build_bot_components, build_handler_chain, fetch_bot_username, open_repository,
};
use crate::config::BotConfig;
use crate::telegram::run_repl;

/// Builds components and the handler chain, then long-polls until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    info!(config = ?config, "Initializing bot");

    let components = build_bot_components(&config).await?;
    let bot_username = fetch_bot_username(&components.teloxide_bot).await;
    let handler_chain = build_handler_chain(
        components.repo.clone(),
        components.analyzer.clone(),
        components.bot_adapter.clone(),
        bot_username,
    );

    info!(handlers = handler_chain.len(), "Bot started successfully");
    run_repl(components.teloxide_bot, handler_chain).await?;
    info!("Bot stopped");
    Ok(())
}

/// Grants or revokes premium for a Telegram user. Fails when the user never wrote to the bot.
#[instrument]
pub async fn set_premium(database_path: &str, tg_user_id: i64, premium: bool) -> Result<()> {
    let repo = open_repository(database_path).await?;
    if !repo.set_premium(tg_user_id, premium).await? {
        bail!("No user with Telegram id {}", tg_user_id);
    }
    info!(tg_user_id, premium, "Premium updated");
    Ok(())
}
