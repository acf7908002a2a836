//! Splitting the interpretation reply into its labeled sections.

use once_cell::sync::Lazy;
use regex::Regex;

/// A heading line: optional `#`s, emphasis and list number (`1.` or `2)`), the label, optional
/// emphasis, then either end of line or a colon followed by inline text.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*#{0,6}\s*[*_]{0,3}\s*(?:\d+[.)]\s*)?[*_]{0,3}\s*(PSYCH|ESOTERIC|ADVICE)\s*[*_]{0,3}\s*(?::\s*[*_]{0,3}\s*(.*?))?\s*$",
    )
    .expect("heading regex")
});

/// The three sections of an interpretation. Missing sections are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation {
    pub psych: String,
    pub esoteric: String,
    pub advice: String,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.psych.is_empty() && self.esoteric.is_empty() && self.advice.is_empty()
    }
}

#[derive(Clone, Copy)]
enum Section {
    Psych,
    Esoteric,
    Advice,
}

fn store(result: &mut Interpretation, current: Option<(Section, Vec<&str>)>) {
    if let Some((section, lines)) = current {
        let text = lines.join("\n").trim().to_string();
        match section {
            Section::Psych => result.psych = text,
            Section::Esoteric => result.esoteric = text,
            Section::Advice => result.advice = text,
        }
    }
}

/// Parses a reply with `PSYCH`, `ESOTERIC` and `ADVICE` heading lines.
///
/// Text before the first heading is dropped. A repeated heading replaces the earlier section.
/// A non-empty reply with no headings at all is kept whole as the psychological part.
pub fn parse_interpretation(raw: &str) -> Interpretation {
    let mut result = Interpretation::default();
    let mut current: Option<(Section, Vec<&str>)> = None;
    let mut found_heading = false;

    for line in raw.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            found_heading = true;
            store(&mut result, current.take());
            let section = match caps[1].to_ascii_uppercase().as_str() {
                "PSYCH" => Section::Psych,
                "ESOTERIC" => Section::Esoteric,
                _ => Section::Advice,
            };
            let inline = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            current = Some((section, vec![inline]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    store(&mut result, current);

    if !found_heading {
        result.psych = raw.trim().to_string();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_headings() {
        let raw = "PSYCH\nFear of change.\n\nESOTERIC:\nRenewal.\nADVICE\n- rest\n- write it down";
        let i = parse_interpretation(raw);
        assert_eq!(i.psych, "Fear of change.");
        assert_eq!(i.esoteric, "Renewal.");
        assert_eq!(i.advice, "- rest\n- write it down");
    }

    #[test]
    fn test_markdown_and_inline_text() {
        let raw = "Intro line\n**PSYCH:** You feel stuck.\n## Esoteric\nA door opens.\n__Advice__: Breathe.";
        let i = parse_interpretation(raw);
        assert_eq!(i.psych, "You feel stuck.");
        assert_eq!(i.esoteric, "A door opens.");
        assert_eq!(i.advice, "Breathe.");
    }

    #[test]
    fn test_numbered_headings() {
        let i = parse_interpretation("1. PSYCH: Fear.\n2. ESOTERIC: Renewal.\n3. ADVICE: Rest.");
        assert_eq!(i.psych, "Fear.");
        assert_eq!(i.esoteric, "Renewal.");
        assert_eq!(i.advice, "Rest.");

        let i = parse_interpretation("**1) Psych**\nStuck.\n### 2) ESOTERIC\nA door.\n3) advice:\n- rest");
        assert_eq!(i.psych, "Stuck.");
        assert_eq!(i.esoteric, "A door.");
        assert_eq!(i.advice, "- rest");
    }

    #[test]
    fn test_sentence_starting_with_label_is_not_a_heading() {
        let raw = "ADVICE\nAdvice is to slow down.\nPsychology matters.";
        let i = parse_interpretation(raw);
        assert_eq!(i.advice, "Advice is to slow down.\nPsychology matters.");
        assert!(i.psych.is_empty());
    }

    #[test]
    fn test_no_headings_and_empty() {
        assert!(parse_interpretation("").is_empty());
        let i = parse_interpretation("Just some text.");
        assert_eq!(i.psych, "Just some text.");
        assert!(i.advice.is_empty());
    }
}
