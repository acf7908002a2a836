//! Dream repository: persistence and queries for users, dreams, analyses, patterns and Q&A.
//!
//! Uses SqlitePoolManager and the models. External: SQLite via sqlx.

use crate::error::StorageError;
use crate::migrations;
use crate::models::{
    AnalysisRecord, DreamRecord, NewAnalysis, PatternKind, PatternRecord, QaRecord, UserRecord,
};
use crate::sqlite_pool::SqlitePoolManager;
use chrono::Utc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct DreamRepository {
    pool_manager: SqlitePoolManager,
}

impl DreamRepository {
    /// Opens (creating if needed) the database file and applies the schema.
    pub async fn new(db_path: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(db_path).await?;
        migrations::run(pool_manager.pool()).await?;
        Ok(Self { pool_manager })
    }

    /// Returns the internal user id for a Telegram user, creating the row on first contact.
    ///
    /// On conflict the username is only replaced when a new one is given; the language is always refreshed.
    #[instrument(skip(self))]
    pub async fn get_or_create_user(
        &self,
        tg_user_id: i64,
        username: Option<&str>,
        language: &str,
    ) -> Result<i64, StorageError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (tg_user_id, username, language, premium, created_at)
            VALUES (?, ?, ?, 0, ?)
            ON CONFLICT(tg_user_id) DO UPDATE SET
                username = COALESCE(excluded.username, users.username),
                language = excluded.language
            RETURNING id
            "#,
        )
        .bind(tg_user_id)
        .bind(username)
        .bind(language)
        .bind(Utc::now())
        .fetch_one(self.pool_manager.pool())
        .await?;

        debug!(tg_user_id, user_id = id, "User registered");
        Ok(id)
    }

    pub async fn get_user(&self, tg_user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE tg_user_id = ?")
            .bind(tg_user_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(user)
    }

    /// Premium flag for a Telegram user; unknown users are not premium.
    pub async fn user_is_premium(&self, tg_user_id: i64) -> Result<bool, StorageError> {
        let row: Option<(bool,)> = sqlx::query_as("SELECT premium FROM users WHERE tg_user_id = ?")
            .bind(tg_user_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(row.map(|r| r.0).unwrap_or(false))
    }

    /// Sets the premium flag. Returns false when no such user exists.
    #[instrument(skip(self))]
    pub async fn set_premium(&self, tg_user_id: i64, premium: bool) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE users SET premium = ? WHERE tg_user_id = ?")
            .bind(premium)
            .bind(tg_user_id)
            .execute(self.pool_manager.pool())
            .await?;
        info!(tg_user_id, premium, updated = result.rows_affected(), "Premium flag changed");
        Ok(result.rows_affected() > 0)
    }

    /// Stores the trimmed dream text and returns the new dream id.
    #[instrument(skip(self, text))]
    pub async fn insert_dream(
        &self,
        user_id: i64,
        text: &str,
        model_version: &str,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO dreams (user_id, raw_text, created_at, model_version) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(text.trim())
        .bind(Utc::now())
        .bind(model_version)
        .execute(self.pool_manager.pool())
        .await?;

        let dream_id = result.last_insert_rowid();
        info!(user_id, dream_id, "Saved dream");
        Ok(dream_id)
    }

    pub async fn get_dream(&self, dream_id: i64) -> Result<Option<DreamRecord>, StorageError> {
        let dream = sqlx::query_as::<_, DreamRecord>("SELECT * FROM dreams WHERE id = ?")
            .bind(dream_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(dream)
    }

    /// Stores an analysis for an existing dream and returns its id.
    #[instrument(skip(self, analysis), fields(dream_id = analysis.dream_id))]
    pub async fn insert_analysis(&self, analysis: &NewAnalysis) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO analyses (dream_id, language, mode, json_struct, mixed_interpretation,
                                  psych_interpretation, esoteric_interpretation, advice, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(analysis.dream_id)
        .bind(&analysis.language)
        .bind(&analysis.mode)
        .bind(&analysis.json_struct)
        .bind(analysis.mixed())
        .bind(&analysis.psych)
        .bind(&analysis.esoteric)
        .bind(&analysis.advice)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        let analysis_id = result.last_insert_rowid();
        info!(analysis_id, "Saved analysis");
        Ok(analysis_id)
    }

    /// Analyses of a dream, oldest first.
    pub async fn analyses_for_dream(
        &self,
        dream_id: i64,
    ) -> Result<Vec<AnalysisRecord>, StorageError> {
        let rows = sqlx::query_as::<_, AnalysisRecord>(
            "SELECT * FROM analyses WHERE dream_id = ? ORDER BY id ASC",
        )
        .bind(dream_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }

    pub async fn count_dreams(&self, user_id: i64) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dreams WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count)
    }

    pub async fn count_analyses(&self, user_id: i64) -> Result<i64, StorageError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM analyses a JOIN dreams d ON a.dream_id = d.id WHERE d.user_id = ?",
        )
        .bind(user_id)
        .fetch_one(self.pool_manager.pool())
        .await?;
        Ok(count)
    }

    /// Structure JSON of the user's most recent analyses, newest first. Rows without JSON are skipped.
    pub async fn recent_structures(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<String>, StorageError> {
        let rows: Vec<(Option<String>,)> = sqlx::query_as(
            r#"
            SELECT a.json_struct FROM analyses a
            JOIN dreams d ON a.dream_id = d.id
            WHERE d.user_id = ?
            ORDER BY a.id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        Ok(rows.into_iter().filter_map(|r| r.0).collect())
    }

    /// Increments the frequency of each pattern, inserting unseen ones with frequency 1.
    #[instrument(skip(self, patterns), fields(count = patterns.len()))]
    pub async fn record_patterns(
        &self,
        user_id: i64,
        patterns: &[(PatternKind, String)],
    ) -> Result<(), StorageError> {
        if patterns.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut tx = self.pool_manager.pool().begin().await?;
        for (kind, value) in patterns {
            sqlx::query(
                r#"
                INSERT INTO dream_patterns (user_id, pattern_type, pattern_value, frequency, first_seen, last_seen)
                VALUES (?, ?, ?, 1, ?, ?)
                ON CONFLICT(user_id, pattern_type, pattern_value) DO UPDATE SET
                    frequency = dream_patterns.frequency + 1,
                    last_seen = excluded.last_seen
                "#,
            )
            .bind(user_id)
            .bind(kind.as_str())
            .bind(value)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!(user_id, "Recorded dream patterns");
        Ok(())
    }

    /// Most frequent patterns of one kind; ties broken by most recently seen.
    pub async fn top_patterns(
        &self,
        user_id: i64,
        kind: PatternKind,
        limit: i64,
    ) -> Result<Vec<PatternRecord>, StorageError> {
        let rows = sqlx::query_as::<_, PatternRecord>(
            r#"
            SELECT pattern_type, pattern_value, frequency, first_seen, last_seen
            FROM dream_patterns
            WHERE user_id = ? AND pattern_type = ?
            ORDER BY frequency DESC, last_seen DESC, pattern_value ASC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }

    #[instrument(skip(self, question, answer))]
    pub async fn save_question(
        &self,
        user_id: i64,
        question: &str,
        answer: &str,
    ) -> Result<i64, StorageError> {
        let result = sqlx::query(
            "INSERT INTO qa (user_id, question, answer, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(question)
        .bind(answer)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// The user's latest questions, newest first.
    pub async fn recent_questions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<QaRecord>, StorageError> {
        let rows = sqlx::query_as::<_, QaRecord>(
            "SELECT * FROM qa WHERE user_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows)
    }
}
