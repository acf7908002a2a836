//! Analysis row model and insert input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One analysis of a dream: the structure JSON plus the interpretation sections.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalysisRecord {
    pub id: i64,
    pub dream_id: i64,
    pub language: Option<String>,
    pub mode: Option<String>,
    /// Serialized dream structure (location, characters, emotions, themes, ...).
    pub json_struct: Option<String>,
    pub mixed_interpretation: Option<String>,
    pub psych_interpretation: Option<String>,
    pub esoteric_interpretation: Option<String>,
    pub advice: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for `DreamRepository::insert_analysis`.
#[derive(Debug, Clone, Default)]
pub struct NewAnalysis {
    pub dream_id: i64,
    pub language: String,
    pub mode: String,
    pub json_struct: String,
    pub psych: String,
    pub esoteric: String,
    pub advice: String,
}

impl NewAnalysis {
    /// The combined interpretation stored in `mixed_interpretation`: psychological, blank line, esoteric.
    pub fn mixed(&self) -> String {
        format!("{}\n\n{}", self.psych, self.esoteric)
    }
}
