//! Slash commands: /start, /help, /dream, /stats, /ask, /image.

use std::sync::Arc;

use async_trait::async_trait;
use dream_analysis::{render_stats, DreamAnalyzer, DreamStats, DreamStructure, UiText};
use dreammap_core::{Bot, Handler, HandlerResponse, Message, Result};
use prompt::Language;
use storage::{DreamRepository, PatternKind};
use tracing::{debug, info, instrument, warn};

use super::{internal_user_id, message_language, storage_err};

/// Analyses considered by /stats.
const STATS_STRUCTURES: i64 = 50;
/// Analyses scanned for summaries by /ask, and how many summaries are sent.
const ASK_STRUCTURES: i64 = 10;
const ASK_SUMMARIES: usize = 5;
/// Recurring themes sent with /ask.
const ASK_THEMES: i64 = 3;

/// Splits `/cmd@botname args` into the lower-cased command name and trimmed args.
///
/// Returns `None` for text that is not a command, and for commands addressed to another bot.
/// `bot_username` is this bot's username without `@`; when unknown every suffix is accepted.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<(String, String)> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let (name, addressee) = match head.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (head, None),
    };
    if let (Some(addressee), Some(own)) = (addressee, bot_username) {
        if !addressee.eq_ignore_ascii_case(own.trim_start_matches('@')) {
            return None;
        }
    }
    let name = name.to_lowercase();
    if name.is_empty() {
        return None;
    }
    Some((name, args.to_string()))
}

/// Routes slash commands. Non-commands pass through; unknown commands are ignored.
pub struct CommandHandler {
    repo: Arc<DreamRepository>,
    analyzer: DreamAnalyzer,
    bot: Arc<dyn Bot>,
    bot_username: Option<String>,
}

impl CommandHandler {
    pub fn new(
        repo: Arc<DreamRepository>,
        analyzer: DreamAnalyzer,
        bot: Arc<dyn Bot>,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            repo,
            analyzer,
            bot,
            bot_username,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn stats(&self, message: &Message, lang: Language) -> Result<String> {
        let user_id = internal_user_id(&self.repo, message).await?;
        let total_dreams = self.repo.count_dreams(user_id).await.map_err(storage_err)?;
        let total_analyses = self.repo.count_analyses(user_id).await.map_err(storage_err)?;
        let structures = self
            .repo
            .recent_structures(user_id, STATS_STRUCTURES)
            .await
            .map_err(storage_err)?;
        let stats = DreamStats::from_structures(total_dreams, total_analyses, &structures);
        Ok(render_stats(&stats, lang))
    }

    async fn ask(&self, message: &Message, question: &str, lang: Language) -> Result<String> {
        let ui = UiText::for_language(lang);
        if question.is_empty() {
            return Ok(ui.ask_need_text.to_string());
        }

        let user_id = internal_user_id(&self.repo, message).await?;
        let summaries: Vec<String> = self
            .repo
            .recent_structures(user_id, ASK_STRUCTURES)
            .await
            .map_err(storage_err)?
            .iter()
            .map(|raw| DreamStructure::from_json_str(raw).summary)
            .filter(|s| !s.is_empty())
            .take(ASK_SUMMARIES)
            .collect();

        if !self.analyzer.is_available() {
            return Ok(ui.no_api.to_string());
        }

        let themes: Vec<String> = self
            .repo
            .top_patterns(user_id, PatternKind::Theme, ASK_THEMES)
            .await
            .map_err(storage_err)?
            .into_iter()
            .map(|p| p.pattern_value)
            .collect();

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, "Failed to send typing action");
        }

        let mut answer = self
            .analyzer
            .answer_question(question, &summaries, &themes, lang)
            .await;
        if answer.is_empty() {
            answer = ui.no_answer.to_string();
        }

        self.repo
            .save_question(user_id, question, &answer)
            .await
            .map_err(storage_err)?;
        info!(user_id, summaries = summaries.len(), "step: question answered");
        Ok(answer)
    }

    async fn image(&self, message: &Message, text: &str, lang: Language) -> Result<String> {
        let ui = UiText::for_language(lang);
        if text.is_empty() {
            return Ok(ui.image_need_text.to_string());
        }
        let premium = self
            .repo
            .user_is_premium(message.user.id)
            .await
            .map_err(storage_err)?;
        if !premium {
            return Ok(ui.image_paid.to_string());
        }

        match self.analyzer.describe_scene(text, lang).await {
            Some(description) => Ok(format!("{}\n{}", ui.image_ok, description)),
            None => Ok(ui.no_api.to_string()),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some((command, args)) = parse_command(&message.content, self.bot_username.as_deref())
        else {
            return Ok(HandlerResponse::Continue);
        };
        let lang = message_language(message);
        let ui = UiText::for_language(lang);
        info!(command = %command, lang = lang.code(), "step: command received");

        let text = match command.as_str() {
            "start" => ui.hello.to_string(),
            "help" => ui.help.to_string(),
            "dream" => ui.prompt_dream.to_string(),
            "stats" => self.stats(message, lang).await?,
            "ask" => self.ask(message, &args, lang).await?,
            "image" => self.image(message, &args, lang).await?,
            other => {
                debug!(command = %other, "Unknown command ignored");
                return Ok(HandlerResponse::Ignore);
            }
        };
        self.reply(message, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let own = Some("dreammap_bot");
        assert_eq!(parse_command("/start", own), Some(("start".into(), "".into())));
        assert_eq!(
            parse_command("/ask@dreammap_bot  why water? ", own),
            Some(("ask".into(), "why water?".into()))
        );
        assert_eq!(
            parse_command("/Image\nforest at night", own),
            Some(("image".into(), "forest at night".into()))
        );
        assert_eq!(parse_command("I dreamt", own), None);
        assert_eq!(parse_command("/", own), None);
    }

    #[test]
    fn test_parse_command_addressee() {
        assert_eq!(parse_command("/ask@some_other_bot why?", Some("dreammap_bot")), None);
        assert_eq!(
            parse_command("/stats@DreamMap_Bot", Some("dreammap_bot")),
            Some(("stats".into(), "".into()))
        );
        assert_eq!(
            parse_command("/stats@any_bot", None),
            Some(("stats".into(), "".into()))
        );
        assert_eq!(parse_command("/@dreammap_bot", Some("dreammap_bot")), None);
    }
}
