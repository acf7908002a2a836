//! Wraps teloxide::Bot and implements [`dreammap_core::Bot`]. Production code sends messages via
//! Telegram; tests substitute a recording Bot.

use async_trait::async_trait;
use dreammap_core::{Bot as CoreBot, BotError, Chat, Result};
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId},
};
use tracing::debug;

/// Longest text sent in one Telegram message (the API limit is 4096).
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Splits text into chunks of at most `max_chars` characters, breaking on line boundaries.
/// A single line longer than the limit is cut at character boundaries.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_chars {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        let chunks = split_message(text, MAX_MESSAGE_LENGTH);
        debug!(chat_id = chat.id, chunks = chunks.len(), "Sending message");
        for chunk in chunks {
            self.bot
                .send_message(ChatId(chat.id), chunk)
                .await
                .map_err(|e| BotError::Bot(e.to_string()))?;
        }
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: Short text is sent as one chunk, unchanged.**
    #[test]
    fn test_split_short_text() {
        assert_eq!(split_message("hello\nworld", 4000), vec!["hello\nworld"]);
        assert_eq!(split_message("", 4000), vec![""]);
    }

    /// **Test: Long text is split on line boundaries and every chunk respects the limit.**
    #[test]
    fn test_split_on_lines() {
        let text = "aaaa\nbbbb\ncccc";
        assert_eq!(split_message(text, 9), vec!["aaaa\nbbbb", "cccc"]);

        let long: String = (0..300)
            .map(|i| format!("line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split_message(&long, MAX_MESSAGE_LENGTH);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_MESSAGE_LENGTH));
        assert_eq!(chunks.join("\n"), long);
    }

    /// **Test: A single over-long line is hard-cut by characters (multi-byte safe).**
    #[test]
    fn test_split_long_line() {
        let chunks = split_message("сонсонсон", 4);
        assert_eq!(chunks, vec!["сонс", "онсо", "н"]);
    }
}
