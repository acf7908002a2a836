//! Dream row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One dream as told by the user, stored before it is analysed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DreamRecord {
    pub id: i64,
    /// Internal user id (users.id).
    pub user_id: i64,
    /// Trimmed dream text.
    pub raw_text: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Model identifier that analysed (or was configured to analyse) the dream.
    pub model_version: Option<String>,
}
