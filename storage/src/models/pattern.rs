//! Recurring pattern model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of recurring element tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Theme,
    Emotion,
    Archetype,
    Symbol,
}

impl PatternKind {
    /// Value stored in `dream_patterns.pattern_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Theme => "theme",
            PatternKind::Emotion => "emotion",
            PatternKind::Archetype => "archetype",
            PatternKind::Symbol => "symbol",
        }
    }
}

/// One row from dream_patterns.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PatternRecord {
    pub pattern_type: String,
    pub pattern_value: String,
    pub frequency: i64,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}
