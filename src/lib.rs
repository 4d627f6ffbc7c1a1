pub mod config;
pub mod drill;
pub mod lexicon;
pub mod pronunciation;

pub use config::{ConfigError, DrillConfig};
pub use drill::{PerformanceStore, QuizSession, SessionSummary};
pub use lexicon::{CharacterRecord, ScriptVariant};
pub use pronunciation::{Pronunciation, Tone};
