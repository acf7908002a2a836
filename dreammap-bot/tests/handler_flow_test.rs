//! End-to-end tests of the handler chain with a mock bot, a scripted LLM and a temp SQLite file.
//!
//! External interactions: local SQLite only; Telegram and Gemini are replaced by test doubles.

mod common;

use common::{
    dreammap_chain, temp_repo, text_message, MockBot, ScriptedLlm, Sent, INTERPRETATION_REPLY,
    STRUCTURE_REPLY, TEST_CHAT_ID, TEST_USER_ID,
};
use dream_analysis::DreamAnalyzer;
use dreammap_core::HandlerResponse;
use storage::PatternKind;

/// **Test: /start registers the user and replies with the greeting in the client language.**
#[tokio::test]
async fn start_registers_user_and_greets() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(None), bot.clone());

    let response = chain
        .handle(&text_message("/start", Some("uk")))
        .await
        .expect("chain");

    assert!(matches!(response, HandlerResponse::Reply(ref t) if t.starts_with("Вітаю!")));
    let user = repo.get_user(TEST_USER_ID).await.unwrap().expect("user row");
    assert_eq!(user.language.as_deref(), Some("uk"));
    assert_eq!(user.username.as_deref(), Some("dreamer"));
    assert_eq!(
        bot.sent(),
        vec![Sent::Text {
            chat_id: TEST_CHAT_ID,
            text: response_text(&response)
        }]
    );
}

fn response_text(response: &HandlerResponse) -> String {
    match response {
        HandlerResponse::Reply(t) => t.clone(),
        other => panic!("expected Reply, got {:?}", other),
    }
}

/// **Test: /help and /dream reply with fixed texts; unknown commands send nothing and are not dreams.**
#[tokio::test]
async fn simple_and_unknown_commands() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm.clone())), bot.clone());

    chain.handle(&text_message("/help", Some("en"))).await.unwrap();
    chain.handle(&text_message("/dream", Some("en"))).await.unwrap();
    let unknown = chain.handle(&text_message("/foo bar", Some("en"))).await.unwrap();

    assert_eq!(unknown, HandlerResponse::Continue);
    let texts = bot.texts();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("Commands:"));
    assert_eq!(texts[1], "Please send your dream text in a single message.");
    assert!(llm.prompts().is_empty());
    let user_id = repo.get_user(TEST_USER_ID).await.unwrap().unwrap().id;
    assert_eq!(repo.count_dreams(user_id).await.unwrap(), 0);
}

/// **Test: Commands addressed to another bot get no reply; commands addressed to this bot do.**
#[tokio::test]
async fn commands_for_other_bots_are_ignored() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm.clone())), bot.clone());

    let other = chain
        .handle(&text_message("/stats@some_other_bot", Some("en")))
        .await
        .unwrap();
    assert_eq!(other, HandlerResponse::Continue);
    assert!(bot.texts().is_empty());
    assert!(llm.prompts().is_empty());

    let own = chain
        .handle(&text_message("/help@dreammap_bot", Some("en")))
        .await
        .unwrap();
    assert!(matches!(own, HandlerResponse::Reply(ref t) if t.starts_with("Commands:")));
    assert_eq!(bot.texts().len(), 1);
}

/// **Test: Without an API key a dream gets the no_api reply and nothing is stored.**
#[tokio::test]
async fn dream_without_api_key() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(None), bot.clone());

    chain
        .handle(&text_message("I was flying over the sea", None))
        .await
        .unwrap();

    assert_eq!(bot.texts(), vec!["Analysis requires GOOGLE_API_KEY to be set."]);
    let user_id = repo.get_user(TEST_USER_ID).await.unwrap().unwrap().id;
    assert_eq!(repo.count_dreams(user_id).await.unwrap(), 0);
}

/// **Test: A dream is acknowledged, stored, analysed, its patterns recorded and the analysis rendered.**
#[tokio::test]
async fn dream_is_analysed_and_stored() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[STRUCTURE_REPLY, INTERPRETATION_REPLY]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm.clone())), bot.clone());

    let response = chain
        .handle(&text_message("  I was flying over the sea  ", Some("en")))
        .await
        .unwrap();

    let texts = bot.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], "Processing your dream…");
    assert!(texts[1].starts_with("Dream Analysis (Mixed)\nLocation: sea\nCharacters: gull"));
    assert!(texts[1].contains("A wish for freedom."));
    assert!(texts[1].contains("- Take a walk by the water."));
    assert_eq!(response, HandlerResponse::Reply(texts[1].clone()));

    let user_id = repo.get_user(TEST_USER_ID).await.unwrap().unwrap().id;
    assert_eq!(repo.count_dreams(user_id).await.unwrap(), 1);
    assert_eq!(repo.count_analyses(user_id).await.unwrap(), 1);

    let dream = repo.get_dream(1).await.unwrap().expect("dream row");
    assert_eq!(dream.raw_text, "I was flying over the sea");
    assert_eq!(dream.model_version.as_deref(), Some("gemini-test"));

    let analyses = repo.analyses_for_dream(dream.id).await.unwrap();
    assert_eq!(analyses[0].mode.as_deref(), Some("Mixed"));
    assert_eq!(analyses[0].language.as_deref(), Some("en"));
    assert_eq!(analyses[0].advice.as_deref(), Some("- Take a walk by the water."));
    assert_eq!(
        analyses[0].mixed_interpretation.as_deref(),
        Some("A wish for freedom.\n\nA good omen.")
    );

    let emotions = repo.top_patterns(user_id, PatternKind::Emotion, 5).await.unwrap();
    assert_eq!(emotions.len(), 1);
    assert_eq!(emotions[0].pattern_value, "joy");
    let themes = repo.top_patterns(user_id, PatternKind::Theme, 5).await.unwrap();
    assert_eq!(themes[0].pattern_value, "freedom");
}

/// **Test: /stats aggregates stored analyses in the message language.**
#[tokio::test]
async fn stats_after_two_dreams() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[
        STRUCTURE_REPLY,
        INTERPRETATION_REPLY,
        STRUCTURE_REPLY,
        INTERPRETATION_REPLY,
    ]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm)), bot.clone());

    chain.handle(&text_message("first dream", Some("en"))).await.unwrap();
    chain.handle(&text_message("second dream", Some("en"))).await.unwrap();
    let response = chain.handle(&text_message("/stats", Some("en"))).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply(
            "Your dream stats\nTotal dreams: 2\nAnalysed: 2\nTop themes: freedom(2)\nArchetypes: Hero(2)\nEmotions (avg): fear=0.2, joy=0.9"
                .to_string()
        )
    );
}

/// **Test: /ask without text replies with usage; with text it types, answers from context and stores the Q&A.**
#[tokio::test]
async fn ask_uses_history_and_stores_answer() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[STRUCTURE_REPLY, INTERPRETATION_REPLY, "Water mirrors your feelings."]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm.clone())), bot.clone());

    let usage = chain.handle(&text_message("/ask", Some("ru"))).await.unwrap();
    assert_eq!(usage, HandlerResponse::Reply("Используй: /ask ваш вопрос".to_string()));

    chain.handle(&text_message("I was flying", Some("en"))).await.unwrap();
    let response = chain
        .handle(&text_message("/ask why water?", Some("en")))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("Water mirrors your feelings.".to_string()));
    assert!(bot.sent().contains(&Sent::Typing { chat_id: TEST_CHAT_ID }));

    let prompt = llm.prompts().last().cloned().unwrap();
    assert!(prompt.contains("Question: why water?"));
    assert!(prompt.contains("Flying over the sea"));
    assert!(prompt.contains("freedom"));

    let user_id = repo.get_user(TEST_USER_ID).await.unwrap().unwrap().id;
    let qa = repo.recent_questions(user_id, 5).await.unwrap();
    assert_eq!(qa.len(), 1);
    assert_eq!(qa[0].question.as_deref(), Some("why water?"));
    assert_eq!(qa[0].answer.as_deref(), Some("Water mirrors your feelings."));
}

/// **Test: /image needs text, is refused for free users and describes the scene for premium users.**
#[tokio::test]
async fn image_requires_premium() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let llm = ScriptedLlm::new(&[STRUCTURE_REPLY, "Silver gulls over a dark sea."]);
    let chain = dreammap_chain(repo.clone(), DreamAnalyzer::new(Some(llm.clone())), bot.clone());

    let usage = chain.handle(&text_message("/image", Some("en"))).await.unwrap();
    assert_eq!(
        usage,
        HandlerResponse::Reply("Use: /image short dream description".to_string())
    );

    let paid = chain
        .handle(&text_message("/image sea at night", Some("en")))
        .await
        .unwrap();
    assert_eq!(
        paid,
        HandlerResponse::Reply(
            "Image generation is a paid feature. You are currently on the free tier.".to_string()
        )
    );
    assert!(llm.prompts().is_empty());

    assert!(repo.set_premium(TEST_USER_ID, true).await.unwrap());
    let response = chain
        .handle(&text_message("/image sea at night", Some("en")))
        .await
        .unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply(
            "Preparing visualization (demo description):\nSilver gulls over a dark sea.".to_string()
        )
    );
    assert_eq!(llm.prompts().len(), 2);
}

/// **Test: A premium /image whose structure call returns nothing replies no_api.**
#[tokio::test]
async fn image_with_empty_model_reply() {
    let (_dir, repo) = temp_repo().await;
    let bot = MockBot::new();
    let chain = dreammap_chain(
        repo.clone(),
        DreamAnalyzer::new(Some(ScriptedLlm::new(&[]))),
        bot.clone(),
    );

    chain.handle(&text_message("/start", Some("en"))).await.unwrap();
    repo.set_premium(TEST_USER_ID, true).await.unwrap();
    let response = chain
        .handle(&text_message("/image sea", Some("en")))
        .await
        .unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply("Analysis requires GOOGLE_API_KEY to be set.".to_string())
    );
}
