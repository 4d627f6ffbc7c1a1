//! Data models for the lexicon

use std::fmt;

use serde::{Deserialize, Serialize};

/// One drillable character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// A single ideographic glyph
    pub character: String,
    /// Tone-marked or numbered reading, e.g. `hǎo` or `hao3`
    pub pronunciation: String,
    pub definition: String,
}

impl CharacterRecord {
    pub fn new(
        character: impl Into<String>,
        pronunciation: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            character: character.into(),
            pronunciation: pronunciation.into(),
            definition: definition.into(),
        }
    }
}

/// Script used for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptVariant {
    Simplified,
    Traditional,
}

impl Default for ScriptVariant {
    fn default() -> Self {
        Self::Simplified
    }
}

impl fmt::Display for ScriptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simplified => f.write_str("Simplified Chinese"),
            Self::Traditional => f.write_str("Traditional Chinese"),
        }
    }
}

/// True for a single code point in the CJK Unified Ideographs block
pub fn is_cjk_glyph(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ('\u{4e00}'..='\u{9fff}').contains(&c),
        _ => false,
    }
}
