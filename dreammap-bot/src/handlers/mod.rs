//! Handlers of the DreamMap chain, in chain order: user registration, commands, free-text dreams.

mod command;
mod dream;
mod user;

pub use command::{parse_command, CommandHandler};
pub use dream::DreamHandler;
pub use user::UserHandler;

use dreammap_core::{BotError, HandlerError, Message, Result};
use prompt::{resolve_language, Language};
use storage::{DreamRepository, StorageError};

pub(crate) fn storage_err(e: StorageError) -> BotError {
    BotError::Database(e.to_string())
}

/// Reply language for a message: its text (command stripped), else the client language.
pub(crate) fn message_language(message: &Message) -> Language {
    resolve_language(&message.content, message.user.language_code.as_deref())
}

/// Internal users.id of the sender. [`UserHandler`] creates the row in `before`.
pub(crate) async fn internal_user_id(repo: &DreamRepository, message: &Message) -> Result<i64> {
    let tg_user_id = message.user.id;
    repo.get_user(tg_user_id)
        .await
        .map_err(storage_err)?
        .map(|u| u.id)
        .ok_or_else(|| HandlerError::UnknownUser(tg_user_id).into())
}
