//! Data models for storage: one row type per table plus insert inputs.

mod analysis;
mod dream;
mod pattern;
mod qa;
mod user;

pub use analysis::{AnalysisRecord, NewAnalysis};
pub use dream::DreamRecord;
pub use pattern::{PatternKind, PatternRecord};
pub use qa::QaRecord;
pub use user::UserRecord;
