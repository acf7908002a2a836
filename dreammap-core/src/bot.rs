//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; dreammap-bot implements it on top of teloxide and tests
//! substitute a recording mock.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for talking back to a chat. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    /// Shows a "typing" indicator in the chat while a slow answer is prepared.
    async fn send_typing(&self, _chat: &Chat) -> Result<()> {
        Ok(())
    }
}
