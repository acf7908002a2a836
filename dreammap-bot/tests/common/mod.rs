//! Shared test doubles: a recording [`Bot`], a scripted [`LlmClient`], message builders and a temp database.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dream_analysis::DreamAnalyzer;
use dreammap_bot::build_handler_chain;
use dreammap_core::{Bot, Chat, Message, MessageDirection, Result, User};
use handler_chain::HandlerChain;
use llm_client::LlmClient;
use prompt::ChatMessage;
use storage::DreamRepository;
use tempfile::TempDir;

/// One recorded outgoing action.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Typing { chat_id: i64 },
}

/// Mock Bot that records every message and typing action.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<Sent>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Typing { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Typing { chat_id: chat.id });
        Ok(())
    }
}

/// Replays queued replies in order and records the last message of every request.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn model(&self) -> &str {
        "gemini-test"
    }
}

pub const TEST_USER_ID: i64 = 123456;
pub const BOT_USERNAME: &str = "dreammap_bot";

/// The production chain wired to the given test doubles.
pub fn dreammap_chain(
    repo: Arc<DreamRepository>,
    analyzer: DreamAnalyzer,
    bot: Arc<MockBot>,
) -> HandlerChain {
    build_handler_chain(repo, analyzer, bot, Some(BOT_USERNAME.to_string()))
}
pub const TEST_CHAT_ID: i64 = 123456;

/// Incoming private text message from the test user.
pub fn text_message(content: &str, language_code: Option<&str>) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: TEST_USER_ID,
            username: Some("dreamer".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
            language_code: language_code.map(str::to_string),
        },
        chat: Chat {
            id: TEST_CHAT_ID,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: chrono::Utc::now(),
        reply_to_message_id: None,
    }
}

/// Fresh repository in a temp dir (kept alive by the returned TempDir).
pub async fn temp_repo() -> (TempDir, Arc<DreamRepository>) {
    let dir = TempDir::new().expect("TempDir::new must succeed");
    let path = dir.path().join("dreammap.sqlite3");
    let repo = DreamRepository::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("DreamRepository::new");
    (dir, Arc::new(repo))
}

pub const STRUCTURE_REPLY: &str = r#"{"location":"sea","characters":[{"name":"gull","role":"guide"}],"actions":["flying"],"symbols":["water"],"emotions":[{"label":"joy","score":0.9},{"label":"fear","score":0.2}],"themes":["freedom"],"archetypes":["Hero"],"summary":"Flying over the sea"}"#;

pub const INTERPRETATION_REPLY: &str = "PSYCH\nA wish for freedom.\nESOTERIC\nA good omen.\nADVICE\n- Take a walk by the water.";
