//! Character lexicon for the drill
//!
//! This module provides:
//! - Character records (glyph, pronunciation, definition)
//! - Loading records from text or csv exports
//! - Simplified to traditional glyph conversion

pub mod loader;
pub mod models;
pub mod variant;

pub use loader::{load_lexicon, LexiconError};
pub use models::*;
pub use variant::{convert_all, ScriptConverter, VariantTable};
