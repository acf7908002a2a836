//! Language selection for replies and prompts.

/// Languages the bot answers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Uk,
    Ru,
    #[default]
    En,
}

impl Language {
    /// ISO 639-1 code, as stored in `users.language` and `analyses.language`.
    pub fn code(self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Maps a Telegram `language_code` (e.g. `uk`, `ru-RU`) to a language; anything else is English.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "uk" => Language::Uk,
            "ru" => Language::Ru,
            _ => Language::En,
        }
    }
}

const UKRAINIAN_ONLY: &[char] = &['і', 'ї', 'є', 'ґ', 'І', 'Ї', 'Є', 'Ґ'];

fn is_cyrillic_letter(c: char) -> bool {
    matches!(c, 'А'..='я' | 'Ё' | 'ё' | 'Ї' | 'ї' | 'І' | 'і' | 'Є' | 'є' | 'Ґ' | 'ґ')
}

/// Guesses the language of a text from its letters.
///
/// Any Ukrainian-only letter wins; otherwise any Cyrillic letter means Russian; otherwise English.
pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|c| UKRAINIAN_ONLY.contains(&c)) {
        Language::Uk
    } else if text.chars().any(is_cyrillic_letter) {
        Language::Ru
    } else {
        Language::En
    }
}

/// Language for a message: detected from the text after a leading `/command`,
/// or taken from the sender's `language_code` when that text has no letters.
pub fn resolve_language(text: &str, language_code: Option<&str>) -> Language {
    let trimmed = text.trim_start();
    let body = if trimmed.starts_with('/') {
        trimmed
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest)
            .unwrap_or("")
    } else {
        trimmed
    };

    if body.chars().any(char::is_alphabetic) {
        detect_language(body)
    } else {
        language_code.map(Language::from_code).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("Мені снилася їжа"), Language::Uk);
        assert_eq!(detect_language("Мне снилось море"), Language::Ru);
        assert_eq!(detect_language("I dreamt of the sea"), Language::En);
        assert_eq!(detect_language(""), Language::En);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("uk"), Language::Uk);
        assert_eq!(Language::from_code("ru-RU"), Language::Ru);
        assert_eq!(Language::from_code("de"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }
}
