//! Telegram layer: teloxide adapters, the [`dreammap_core::Bot`] implementation and the REPL runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{split_message, TelegramBotAdapter, MAX_MESSAGE_LENGTH};
pub use runner::run_repl;
