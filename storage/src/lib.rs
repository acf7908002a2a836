//! Storage crate: persistence of users, dreams, analyses, recurring patterns and Q&A in one SQLite file.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – row models (UserRecord, DreamRecord, AnalysisRecord, PatternRecord, QaRecord) and inputs
//! - [`migrations`] – idempotent schema creation
//! - [`dream_repo`] – DreamRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod dream_repo;
mod error;
mod migrations;
mod models;
mod sqlite_pool;

pub use dream_repo::DreamRepository;
pub use error::StorageError;
pub use models::{
    AnalysisRecord, DreamRecord, NewAnalysis, PatternKind, PatternRecord, QaRecord, UserRecord,
};
pub use sqlite_pool::SqlitePoolManager;
