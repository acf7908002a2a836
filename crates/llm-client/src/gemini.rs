//! Gemini implementation of [`LlmClient`] over the OpenAI-compatible endpoint.

use std::sync::Arc;

use anyhow::Result;
use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::{info, instrument};

use super::{chat_message_to_openai, mask_token, LlmClient};

/// OpenAI-compatible base URL of the Gemini API.
pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Gemini chat client. Cloning shares the underlying HTTP client.
#[derive(Clone)]
pub struct GeminiLlmClient {
    client: Arc<Client<OpenAIConfig>>,
    masked_key: String,
    model: String,
    system_prompt: Option<String>,
}

impl GeminiLlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_DEFAULT_BASE_URL.to_string())
    }

    /// Builds a client against a custom base URL (proxies, or a mock server in tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let masked_key = mask_token(&api_key);
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url.trim_end_matches('/'));
        Self {
            client: Arc::new(Client::with_config(config)),
            masked_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Optional system message prepended to every request.
    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt.filter(|p| !p.trim().is_empty());
        self
    }
}

#[async_trait]
impl LlmClient for GeminiLlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system_prompt {
            openai_messages.push(chat_message_to_openai(&ChatMessage::system(system.clone()))?);
        }
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }

        info!(
            message_count = openai_messages.len(),
            api_key = %self.masked_key,
            "Gemini chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(openai_messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "Gemini chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Gemini chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No response from Gemini"),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
