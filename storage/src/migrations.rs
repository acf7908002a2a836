//! Schema creation. Every statement is idempotent, so running on every start is safe.

use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tg_user_id INTEGER UNIQUE NOT NULL,
        username TEXT,
        language TEXT,
        premium INTEGER NOT NULL DEFAULT 0,
        created_at TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS dreams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        raw_text TEXT NOT NULL,
        created_at TEXT,
        model_version TEXT,
        FOREIGN KEY(user_id) REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS analyses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dream_id INTEGER NOT NULL,
        language TEXT,
        mode TEXT,
        json_struct TEXT,
        mixed_interpretation TEXT,
        psych_interpretation TEXT,
        esoteric_interpretation TEXT,
        advice TEXT,
        created_at TEXT,
        FOREIGN KEY(dream_id) REFERENCES dreams(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS qa (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        question TEXT,
        answer TEXT,
        created_at TEXT,
        FOREIGN KEY(user_id) REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS dream_patterns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        pattern_type TEXT NOT NULL,
        pattern_value TEXT NOT NULL,
        frequency INTEGER NOT NULL DEFAULT 1,
        first_seen TEXT,
        last_seen TEXT,
        UNIQUE(user_id, pattern_type, pattern_value),
        FOREIGN KEY(user_id) REFERENCES users(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_dreams_user_id ON dreams(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_analyses_dream_id ON analyses(dream_id)",
    "CREATE INDEX IF NOT EXISTS idx_qa_user_id ON qa(user_id)",
];

/// Creates all tables and indexes inside one transaction.
pub(crate) async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Creating database tables if not exist");

    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!(statements = SCHEMA.len(), "Database schema ready");
    Ok(())
}
