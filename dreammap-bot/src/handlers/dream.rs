//! Free text is a dream: store it, analyse it, record its patterns and reply with the analysis.

use std::sync::Arc;

use async_trait::async_trait;
use dream_analysis::{render_analysis, DreamAnalyzer, DreamStructure, UiText, ANALYSIS_MODE};
use dreammap_core::{Bot, Handler, HandlerResponse, Message, Result};
use storage::{DreamRepository, NewAnalysis, PatternKind};
use tracing::{info, instrument};

use super::{internal_user_id, message_language, storage_err};

/// Patterns tracked for a dream: themes, archetypes, symbols and the dominant emotion.
fn patterns_of(structure: &DreamStructure) -> Vec<(PatternKind, String)> {
    let mut patterns: Vec<(PatternKind, String)> = Vec::new();
    patterns.extend(structure.themes.iter().map(|t| (PatternKind::Theme, t.clone())));
    patterns.extend(
        structure
            .archetypes
            .iter()
            .map(|a| (PatternKind::Archetype, a.clone())),
    );
    patterns.extend(structure.symbols.iter().map(|s| (PatternKind::Symbol, s.clone())));
    if let Some(emotion) = structure.dominant_emotion() {
        patterns.push((PatternKind::Emotion, emotion.label.clone()));
    }
    patterns.sort();
    patterns.dedup();
    patterns
}

/// Handles any non-command text as a dream description.
pub struct DreamHandler {
    repo: Arc<DreamRepository>,
    analyzer: DreamAnalyzer,
    bot: Arc<dyn Bot>,
}

impl DreamHandler {
    pub fn new(repo: Arc<DreamRepository>, analyzer: DreamAnalyzer, bot: Arc<dyn Bot>) -> Self {
        Self { repo, analyzer, bot }
    }
}

#[async_trait]
impl Handler for DreamHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_command() || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Continue);
        }

        let lang = message_language(message);
        let ui = UiText::for_language(lang);

        if !self.analyzer.is_available() {
            self.bot.reply_to(message, ui.no_api).await?;
            return Ok(HandlerResponse::Reply(ui.no_api.to_string()));
        }

        let user_id = internal_user_id(&self.repo, message).await?;
        self.bot.reply_to(message, ui.processing).await?;

        let dream_id = self
            .repo
            .insert_dream(user_id, &message.content, &self.analyzer.model_version())
            .await
            .map_err(storage_err)?;

        let analysis = self
            .analyzer
            .analyze(&message.content, ANALYSIS_MODE, lang)
            .await;

        self.repo
            .insert_analysis(&NewAnalysis {
                dream_id,
                language: lang.code().to_string(),
                mode: ANALYSIS_MODE.to_string(),
                json_struct: analysis.structure.to_json(),
                psych: analysis.interpretation.psych.clone(),
                esoteric: analysis.interpretation.esoteric.clone(),
                advice: analysis.interpretation.advice.clone(),
            })
            .await
            .map_err(storage_err)?;

        self.repo
            .record_patterns(user_id, &patterns_of(&analysis.structure))
            .await
            .map_err(storage_err)?;

        info!(dream_id, "step: dream analysed");
        let text = render_analysis(&analysis.structure, &analysis.interpretation, lang);
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
