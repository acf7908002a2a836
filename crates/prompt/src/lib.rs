//! # Prompt
//!
//! Builds the text sent to the language model.
//!
//! ## Contents
//!
//! - [`ChatMessage`] / [`MessageRole`]: one element of an OpenAI-style `messages` array.
//! - [`Language`], [`detect_language`], [`resolve_language`]: pick uk/ru/en for a message.
//! - Dream prompts: [`structure_prompt`], [`interpretation_prompt`], [`question_prompt`], [`scene_prompt`].
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to the Gemini chat completion endpoint by `llm-client`.

mod dream;
mod language;

pub use dream::{interpretation_prompt, question_prompt, scene_prompt, structure_prompt};
pub use language::{detect_language, resolve_language, Language};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}
