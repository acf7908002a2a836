//! # Dream analysis
//!
//! Turns a dream text into a structure and an interpretation with two model calls, and
//! aggregates stored structures into per-user statistics.
//!
//! - [`structure`]: [`DreamStructure`] and lenient JSON extraction from model output.
//! - [`interpretation`]: splitting the PSYCH / ESOTERIC / ADVICE sections.
//! - [`analyzer`]: [`DreamAnalyzer`], the prompt/LLM orchestration.
//! - [`stats`]: [`DreamStats`] from stored structures.
//! - [`ui`]: localized texts and rendering of analyses and stats.

pub mod analyzer;
pub mod interpretation;
pub mod stats;
pub mod structure;
pub mod ui;

pub use analyzer::{DreamAnalysis, DreamAnalyzer, ANALYSIS_MODE};
pub use interpretation::{parse_interpretation, Interpretation};
pub use stats::DreamStats;
pub use structure::{extract_structure, Character, DreamStructure, Emotion};
pub use ui::{render_analysis, render_stats, UiText};
