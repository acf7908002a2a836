//! Orchestrates the model calls behind a dream analysis, a question and a scene description.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{
    interpretation_prompt, question_prompt, scene_prompt, structure_prompt, ChatMessage, Language,
};
use tracing::{error, info, instrument};

use crate::interpretation::{parse_interpretation, Interpretation};
use crate::structure::{extract_structure, DreamStructure};

/// Interpretation mode stored with every analysis.
pub const ANALYSIS_MODE: &str = "Mixed";

/// Result of [`DreamAnalyzer::analyze`].
#[derive(Debug, Clone, Default)]
pub struct DreamAnalysis {
    pub structure: DreamStructure,
    pub interpretation: Interpretation,
}

/// Dream analyzer. Without an LLM client every call yields empty output.
#[derive(Clone, Default)]
pub struct DreamAnalyzer {
    llm: Option<Arc<dyn LlmClient>>,
}

impl DreamAnalyzer {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    /// True when a model is configured.
    pub fn is_available(&self) -> bool {
        self.llm.is_some()
    }

    /// Model identifier recorded with each dream; empty without a model.
    pub fn model_version(&self) -> String {
        self.llm
            .as_ref()
            .map(|l| l.model().to_string())
            .unwrap_or_default()
    }

    /// One single-prompt call. Failures are logged and give an empty string.
    async fn complete(&self, prompt: String) -> String {
        let Some(llm) = &self.llm else {
            return String::new();
        };
        match llm
            .get_llm_response_with_messages(vec![ChatMessage::user(prompt)])
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "LLM request failed");
                String::new()
            }
        }
    }

    /// Two calls: structure the dream, then interpret the structure.
    #[instrument(skip(self, text), fields(text_len = text.len(), lang = lang.code()))]
    pub async fn analyze(&self, text: &str, mode: &str, lang: Language) -> DreamAnalysis {
        let structure_raw = self.complete(structure_prompt(text, lang)).await;
        let structure = extract_structure(&structure_raw);
        info!(
            empty = structure.is_empty(),
            themes = structure.themes.len(),
            "step: dream structure extracted"
        );

        let interpretation_raw = self
            .complete(interpretation_prompt(&structure.to_json(), mode, lang))
            .await;
        let interpretation = parse_interpretation(&interpretation_raw);
        info!(
            empty = interpretation.is_empty(),
            "step: dream interpretation parsed"
        );

        DreamAnalysis {
            structure,
            interpretation,
        }
    }

    /// Personal answer to a `/ask` question; empty when the model gave nothing.
    #[instrument(skip_all, fields(lang = lang.code(), summaries = summaries.len()))]
    pub async fn answer_question(
        &self,
        question: &str,
        summaries: &[String],
        patterns: &[String],
        lang: Language,
    ) -> String {
        self.complete(question_prompt(question, summaries, patterns, lang))
            .await
            .trim()
            .to_string()
    }

    /// Scene description for `/image`. `None` when the structure call returned nothing
    /// (no model, or the model failed).
    #[instrument(skip(self, text), fields(lang = lang.code()))]
    pub async fn describe_scene(&self, text: &str, lang: Language) -> Option<String> {
        let structure_raw = self.complete(structure_prompt(text, lang)).await;
        if structure_raw.trim().is_empty() {
            return None;
        }
        let structure = extract_structure(&structure_raw);
        let description = self
            .complete(scene_prompt(&structure.to_json(), lang))
            .await;
        Some(description.trim().to_string())
    }
}
