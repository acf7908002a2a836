//! User row model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the users table. `id` is the internal key other tables reference.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    /// Telegram user id.
    pub tg_user_id: i64,
    pub username: Option<String>,
    /// Language code (`uk`, `ru`, `en`) detected from the user's last message.
    pub language: Option<String>,
    /// Paid tier; unlocks `/image`.
    pub premium: bool,
    pub created_at: Option<DateTime<Utc>>,
}
