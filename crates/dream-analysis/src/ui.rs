//! Localized bot texts and rendering of analyses and statistics.

use prompt::Language;

use crate::interpretation::Interpretation;
use crate::stats::DreamStats;
use crate::structure::DreamStructure;

/// Every user-facing string for one language.
#[derive(Debug, Clone, Copy)]
pub struct UiText {
    pub hello: &'static str,
    pub help: &'static str,
    pub prompt_dream: &'static str,
    pub processing: &'static str,
    pub no_api: &'static str,
    pub image_paid: &'static str,
    pub image_ok: &'static str,
    pub image_need_text: &'static str,
    pub ask_need_text: &'static str,
    pub no_answer: &'static str,

    pub stats_title: &'static str,
    pub stats_total: &'static str,
    pub stats_analysed: &'static str,
    pub stats_themes: &'static str,
    pub stats_archetypes: &'static str,
    pub stats_emotions: &'static str,

    pub analysis_header: &'static str,
    pub location: &'static str,
    pub characters: &'static str,
    pub actions: &'static str,
    pub symbols: &'static str,
    pub emotions: &'static str,
    pub themes: &'static str,
    pub archetypes: &'static str,
    pub summary: &'static str,
    pub psych_header: &'static str,
    pub esoteric_header: &'static str,
    pub advice_header: &'static str,
    pub not_available: &'static str,
}

const UK: UiText = UiText {
    hello: "Вітаю! Надішли текст сну, і я надам структурований аналіз (Mixed). Команда /dream — також приймає сон.",
    help: "Команди:\n/dream — як надіслати сон\n/stats — статистика снів\n/ask <питання> — запитання про твої сни\n/image <опис> — опис сцени для зображення (преміум)\nАбо просто надішли текст сну.",
    prompt_dream: "Будь ласка, надішли текст сну одним повідомленням.",
    processing: "Опрацьовую сон…",
    no_api: "Аналіз доступний після налаштування GOOGLE_API_KEY.",
    image_paid: "Генерація зображень — платна функція. У вас наразі безкоштовний тариф.",
    image_ok: "Готую візуалізацію (демо-опис):",
    image_need_text: "Використай: /image короткий опис сну",
    ask_need_text: "Використай: /ask ваше запитання",
    no_answer: "Відповідь недоступна.",
    stats_title: "Статистика ваших снів",
    stats_total: "Усього снів",
    stats_analysed: "З аналізом",
    stats_themes: "Топ теми",
    stats_archetypes: "Архетипи",
    stats_emotions: "Емоції (сер.)",
    analysis_header: "Аналіз сну (Mixed)",
    location: "Локація",
    characters: "Персонажі",
    actions: "Дії",
    symbols: "Символи",
    emotions: "Емоції",
    themes: "Теми",
    archetypes: "Архетипи",
    summary: "Стислий підсумок",
    psych_header: "— Психологічне —",
    esoteric_header: "— Езотеричне —",
    advice_header: "— Порада/Урок —",
    not_available: "(н/д)",
};

const RU: UiText = UiText {
    hello: "Привет! Пришли текст сна — верну структурированный анализ (Mixed). Команда /dream — тоже принимает сон.",
    help: "Команды:\n/dream — как отправить сон\n/stats — статистика снов\n/ask <вопрос> — вопрос о твоих снах\n/image <описание> — описание сцены для изображения (премиум)\nИли просто пришли текст сна.",
    prompt_dream: "Пожалуйста, отправь текст сна одним сообщением.",
    processing: "Обрабатываю сон…",
    no_api: "Анализ доступен после настройки GOOGLE_API_KEY.",
    image_paid: "Генерация изображений — платная функция. У вас сейчас бесплатный тариф.",
    image_ok: "Готовлю визуализацию (демо-описание):",
    image_need_text: "Используй: /image краткое описание сна",
    ask_need_text: "Используй: /ask ваш вопрос",
    no_answer: "Ответ недоступен.",
    stats_title: "Статистика ваших снов",
    stats_total: "Всего снов",
    stats_analysed: "С анализом",
    stats_themes: "Топ темы",
    stats_archetypes: "Архетипы",
    stats_emotions: "Эмоции (avg)",
    analysis_header: "Анализ сна (Mixed)",
    location: "Локация",
    characters: "Персонажи",
    actions: "Действия",
    symbols: "Символы",
    emotions: "Эмоции",
    themes: "Темы",
    archetypes: "Архетипы",
    summary: "Краткое резюме",
    psych_header: "— Психологическая —",
    esoteric_header: "— Эзотерическая —",
    advice_header: "— Совет/Урок —",
    not_available: "(н/д)",
};

const EN: UiText = UiText {
    hello: "Hi! Send your dream text to get a structured Mixed interpretation. You can also use /dream.",
    help: "Commands:\n/dream - how to send a dream\n/stats - your dream stats\n/ask <question> - ask about your dreams\n/image <description> - scene description for an image (premium)\nOr just send your dream text.",
    prompt_dream: "Please send your dream text in a single message.",
    processing: "Processing your dream…",
    no_api: "Analysis requires GOOGLE_API_KEY to be set.",
    image_paid: "Image generation is a paid feature. You are currently on the free tier.",
    image_ok: "Preparing visualization (demo description):",
    image_need_text: "Use: /image short dream description",
    ask_need_text: "Use: /ask your question",
    no_answer: "No answer available.",
    stats_title: "Your dream stats",
    stats_total: "Total dreams",
    stats_analysed: "Analysed",
    stats_themes: "Top themes",
    stats_archetypes: "Archetypes",
    stats_emotions: "Emotions (avg)",
    analysis_header: "Dream Analysis (Mixed)",
    location: "Location",
    characters: "Characters",
    actions: "Actions",
    symbols: "Symbols",
    emotions: "Emotions",
    themes: "Themes",
    archetypes: "Archetypes",
    summary: "Summary",
    psych_header: "— Psychological —",
    esoteric_header: "— Esoteric —",
    advice_header: "— Advice/Lesson —",
    not_available: "(n/a)",
};

impl UiText {
    pub fn for_language(lang: Language) -> &'static UiText {
        match lang {
            Language::Uk => &UK,
            Language::Ru => &RU,
            Language::En => &EN,
        }
    }
}

fn labeled_list<S: AsRef<str>>(label: &str, values: &[S]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let joined: Vec<&str> = values.iter().map(|v| v.as_ref()).collect();
    format!("{}: {}", label, joined.join(", "))
}

fn or_na<'a>(text: &'a str, ui: &'a UiText) -> &'a str {
    if text.trim().is_empty() {
        ui.not_available
    } else {
        text
    }
}

/// Renders an analysis as the reply text. Empty list lines are omitted.
pub fn render_analysis(
    structure: &DreamStructure,
    interpretation: &Interpretation,
    lang: Language,
) -> String {
    let ui = UiText::for_language(lang);
    let characters: Vec<&str> = structure.characters.iter().map(|c| c.name.as_str()).collect();
    let emotions: Vec<String> = structure
        .emotions
        .iter()
        .map(|e| format!("{}({})", e.label, e.score))
        .collect();

    let parts = [
        ui.analysis_header.to_string(),
        format!("{}: {}", ui.location, structure.location.as_deref().unwrap_or("")),
        labeled_list(ui.characters, &characters),
        labeled_list(ui.actions, &structure.actions),
        labeled_list(ui.symbols, &structure.symbols),
        format!("{}: {}", ui.emotions, emotions.join(", ")),
        labeled_list(ui.themes, &structure.themes),
        labeled_list(ui.archetypes, &structure.archetypes),
        format!("{}: {}", ui.summary, structure.summary),
        ui.psych_header.to_string(),
        or_na(&interpretation.psych, ui).to_string(),
        ui.esoteric_header.to_string(),
        or_na(&interpretation.esoteric, ui).to_string(),
        ui.advice_header.to_string(),
        or_na(&interpretation.advice, ui).to_string(),
    ];

    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `/stats`. Empty sections show `—`.
pub fn render_stats(stats: &DreamStats, lang: Language) -> String {
    let ui = UiText::for_language(lang);
    let or_dash = |s: String| if s.is_empty() { "—".to_string() } else { s };
    let counted = |items: &[(String, usize)]| {
        items
            .iter()
            .map(|(k, v)| format!("{k}({v})"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let emotions = stats
        .avg_emotions
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        ui.stats_title,
        ui.stats_total,
        stats.total_dreams,
        ui.stats_analysed,
        stats.total_analyses,
        ui.stats_themes,
        or_dash(counted(&stats.top_themes)),
        ui.stats_archetypes,
        or_dash(counted(&stats.top_archetypes)),
        ui.stats_emotions,
        or_dash(emotions),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Character, Emotion};

    #[test]
    fn test_render_analysis_en() {
        let structure = DreamStructure {
            location: Some("forest".into()),
            characters: vec![Character { name: "wolf".into(), role: None }],
            emotions: vec![Emotion { label: "fear".into(), score: 0.8 }],
            themes: vec!["loss".into(), "growth".into()],
            summary: "Lost in a forest".into(),
            ..Default::default()
        };
        let interpretation = Interpretation {
            psych: "Anxiety.".into(),
            esoteric: String::new(),
            advice: "Rest.".into(),
        };
        let text = render_analysis(&structure, &interpretation, Language::En);
        let expected = "Dream Analysis (Mixed)\n\
                        Location: forest\n\
                        Characters: wolf\n\
                        Emotions: fear(0.8)\n\
                        Themes: loss, growth\n\
                        Summary: Lost in a forest\n\
                        — Psychological —\n\
                        Anxiety.\n\
                        — Esoteric —\n\
                        (n/a)\n\
                        — Advice/Lesson —\n\
                        Rest.";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_analysis_uk_empty() {
        let text = render_analysis(
            &DreamStructure::default(),
            &Interpretation::default(),
            Language::Uk,
        );
        assert!(text.starts_with("Аналіз сну (Mixed)\nЛокація: \nЕмоції: \nСтислий підсумок: "));
        assert_eq!(text.matches("(н/д)").count(), 3);
    }

    #[test]
    fn test_render_stats() {
        let stats = DreamStats {
            total_dreams: 3,
            total_analyses: 2,
            top_themes: vec![("water".into(), 2)],
            top_archetypes: vec![],
            avg_emotions: vec![("fear".into(), 0.55)],
        };
        assert_eq!(
            render_stats(&stats, Language::En),
            "Your dream stats\nTotal dreams: 3\nAnalysed: 2\nTop themes: water(2)\nArchetypes: —\nEmotions (avg): fear=0.55"
        );
        assert!(render_stats(&DreamStats::default(), Language::Ru).starts_with("Статистика ваших снов\nВсего снов: 0"));
    }
}
