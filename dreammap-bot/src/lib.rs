//! # dreammap-bot
//!
//! DreamMap Telegram bot: configuration, Telegram adapters, handlers, component assembly,
//! REPL runner and the `dreammap` CLI.

pub mod check;
pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use check::{run_checks, CheckReport, CheckStatus};
pub use cli::{Cli, Commands};
pub use components::{
    build_analyzer, build_bot_components, build_handler_chain, fetch_bot_username, BotComponents,
};
pub use config::BotConfig;
pub use runner::{run_bot, set_premium};
