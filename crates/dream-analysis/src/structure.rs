//! Dream structure: the JSON the first model call is asked to produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A person or creature in the dream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub role: Option<String>,
}

/// An emotion with its intensity in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub label: String,
    pub score: f64,
}

/// Parsed dream. Field names match the keys requested in the structure prompt and
/// stored in `analyses.json_struct`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DreamStructure {
    pub location: Option<String>,
    pub characters: Vec<Character>,
    pub actions: Vec<String>,
    pub symbols: Vec<String>,
    pub emotions: Vec<Emotion>,
    pub themes: Vec<String>,
    pub archetypes: Vec<String>,
    pub summary: String,
}

/// Keys tried, in order, when a list entry is an object instead of a string.
const NAME_KEYS: &[&str] = &["name", "label", "symbol", "value", "title"];

fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => NAME_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(|s| s.trim().to_string())?,
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn list_of(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn strings(value: Option<&Value>) -> Vec<String> {
    list_of(value).iter().filter_map(text_of).collect()
}

/// Emotion score in `0.0..=1.0`; out-of-range values are clamped, unparsable ones are 0.
fn score_of(value: Option<&Value>) -> f64 {
    let score = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn emotion_of(value: &Value) -> Option<Emotion> {
    match value {
        Value::Object(map) => {
            let label = ["label", "emotion", "name"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))?
                .trim()
                .to_string();
            if label.is_empty() {
                return None;
            }
            let score = score_of(map.get("score").or_else(|| map.get("intensity")));
            Some(Emotion { label, score })
        }
        other => text_of(other).map(|label| Emotion { label, score: 0.0 }),
    }
}

fn character_of(value: &Value) -> Option<Character> {
    let name = text_of(value)?;
    let role = value
        .get("role")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    Some(Character { name, role })
}

impl DreamStructure {
    /// Builds a structure from any JSON value. List entries may be strings or objects;
    /// unknown keys are ignored and wrong types yield empty fields.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key);
        Self {
            location: field("location").and_then(text_of),
            characters: list_of(field("characters"))
                .iter()
                .filter_map(character_of)
                .collect(),
            actions: strings(field("actions")),
            symbols: strings(field("symbols")),
            emotions: list_of(field("emotions"))
                .iter()
                .filter_map(emotion_of)
                .collect(),
            themes: strings(field("themes")),
            archetypes: strings(field("archetypes")),
            summary: field("summary").and_then(text_of).unwrap_or_default(),
        }
    }

    /// Parses a stored `json_struct`; anything unparsable gives the empty structure.
    pub fn from_json_str(json: &str) -> Self {
        serde_json::from_str::<Value>(json)
            .map(|v| Self::from_value(&v))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The emotion with the highest score; the first one wins a tie.
    pub fn dominant_emotion(&self) -> Option<&Emotion> {
        self.emotions.iter().fold(None, |best: Option<&Emotion>, e| match best {
            Some(b) if b.score >= e.score => Some(b),
            _ => Some(e),
        })
    }

    /// Compact JSON (non-ASCII kept as is) for storage and follow-up prompts.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Extracts the dream structure from raw model output.
///
/// Markdown code fences and surrounding prose are tolerated: the span from the first `{`
/// to the last `}` is parsed. Any failure returns the empty structure.
pub fn extract_structure(raw: &str) -> DreamStructure {
    let raw = raw.trim();
    let candidate = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return DreamStructure::default(),
    };
    match serde_json::from_str::<Value>(candidate) {
        Ok(value @ Value::Object(_)) => DreamStructure::from_value(&value),
        Ok(_) => DreamStructure::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Dream structure is not valid JSON");
            DreamStructure::default()
        }
    }
}
