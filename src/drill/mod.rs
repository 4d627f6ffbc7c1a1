//! Pronunciation drill: performance tracking and review scheduling
//!
//! This module provides:
//! - Per-glyph performance store (JSON, atomic rewrite on every trial)
//! - Two-bucket review interval classification
//! - Answer validation at syllable and tone level
//! - Character selection policies
//! - The interactive quiz loop

pub mod algorithm;
pub mod models;
pub mod selection;
pub mod session;
pub mod storage;
pub mod validator;

pub use algorithm::interval_for;
pub use models::*;
pub use selection::SelectionPolicy;
pub use session::{prompt_script_menu, QuizSession, QuizState, SessionError, SessionSummary};
pub use storage::{PerformanceStore, StorageError, DEFAULT_STORE_FILE};
pub use validator::{parse_tone_input, AnswerOutcome, AnswerValidator, SyllableRule};
