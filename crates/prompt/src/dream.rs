//! Localized prompts for the dream analysis steps.

use crate::Language;

/// Field list every structure prompt asks for; `extract_structure` in dream-analysis reads the same keys.
const STRUCTURE_FIELDS: &str = "location, characters[{name,role}], actions[], symbols[], emotions[{label,score:0..1}], themes[], archetypes[], summary";

/// Step 1: ask the model to turn a dream text into strict JSON.
pub fn structure_prompt(dream_text: &str, lang: Language) -> String {
    match lang {
        Language::Uk => format!(
            "Завдання: розбери сон на структуру й поверни строгий JSON без коментарів.\n\
             Поля: {STRUCTURE_FIELDS}.\n\
             Текст сну: \"{dream_text}\"\n\
             ПОВЕРТАЙ лише JSON."
        ),
        Language::Ru => format!(
            "Задача: разберите сон на структуру и верните строгий JSON без комментариев.\n\
             Поля: {STRUCTURE_FIELDS}.\n\
             Текст сна: \"{dream_text}\"\n\
             ВЕРНИТЕ только JSON."
        ),
        Language::En => format!(
            "Task: parse the dream into a structure and return strict JSON only.\n\
             Fields: {STRUCTURE_FIELDS}.\n\
             Dream text: \"{dream_text}\"\n\
             RETURN JSON only."
        ),
    }
}

/// Step 2: ask for the three labeled sections (PSYCH, ESOTERIC, ADVICE) from the structure JSON.
pub fn interpretation_prompt(struct_json: &str, mode: &str, lang: Language) -> String {
    let base = match lang {
        Language::Uk => "На основі структури дай: 1) Психологічну інтерпретацію 2) Езотеричну (м'яко) 3) Пораду/урок (2–3 пункти).",
        Language::Ru => "На основе структуры дай: 1) Психологическую интерпретацию 2) Эзотерическую (мягко) 3) Совет/урок (2–3 пункта).",
        Language::En => "Based on the structure, provide: 1) Psychological interpretation 2) Esoteric (gently) 3) Advice/lesson (2–3 bullets).",
    };
    format!(
        "{base}\n\
         Mode: {mode}.\n\
         Structure (JSON): {struct_json}\n\
         Return a compact response with three labeled sections: PSYCH, ESOTERIC, ADVICE."
    )
}

fn bracketed<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|s| format!("\"{}\"", s.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// `/ask`: a personal answer grounded in recent dream summaries and recurring themes.
///
/// `patterns` is omitted from the prompt when empty.
pub fn question_prompt<S: AsRef<str>, P: AsRef<str>>(
    question: &str,
    summaries: &[S],
    patterns: &[P],
    lang: Language,
) -> String {
    let summaries = bracketed(summaries);
    let (question_label, summaries_label, patterns_label, instruction) = match lang {
        Language::Uk => (
            "Питання",
            "Короткі резюме снів",
            "Повторювані теми",
            "Дай персональну відповідь, спираючись на повторювані мотиви. Без діагнозів.",
        ),
        Language::Ru => (
            "Вопрос",
            "Краткие резюме снов",
            "Повторяющиеся темы",
            "Дай персональный ответ, опираясь на повторяющиеся мотивы. Без диагнозов.",
        ),
        Language::En => (
            "Question",
            "Short dream summaries",
            "Recurring themes",
            "Provide a careful, non-diagnostic, personalized answer referencing patterns.",
        ),
    };

    let mut out = format!("{question_label}: {question}\n{summaries_label}: {summaries}\n");
    if !patterns.is_empty() {
        out.push_str(&format!("{patterns_label}: {}\n", bracketed(patterns)));
    }
    out.push_str(instruction);
    out
}

/// `/image`: a short scene description an image model could render.
pub fn scene_prompt(struct_json: &str, lang: Language) -> String {
    match lang {
        Language::Uk => format!(
            "Сформуй короткий опис сцени для генерації зображення (<=120 слів): \
             сеттінг, ключові символи, домінуючі кольори/світло, настрій за емоціями.\n\
             Структура: {struct_json}"
        ),
        Language::Ru => format!(
            "Сформируй краткое описание сцены для генерации изображения (<=120 слов): \
             сеттинг, ключевые символы, доминирующие цвета/свет, настроение по эмоциям.\n\
             Структура: {struct_json}"
        ),
        Language::En => format!(
            "Create a concise scene description for image generation (<=120 words): \
             setting, key symbols, dominant colors/light, mood from emotions.\n\
             Structure: {struct_json}"
        ),
    }
}
