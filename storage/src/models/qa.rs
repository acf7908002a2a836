//! Question/answer row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `/ask` question and the answer the bot gave.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QaRecord {
    pub id: i64,
    pub user_id: i64,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
