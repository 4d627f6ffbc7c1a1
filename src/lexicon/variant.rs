//! Simplified to traditional glyph conversion
//!
//! Conversion only swaps the glyph; pronunciation and definition are kept.
//! Glyphs go through zhconv's OpenCC/MediaWiki tables (`zh-Hant`), with an
//! optional override file consulted first. Glyphs with no traditional form
//! pass through unchanged.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use zhconv::{zhconv, Variant};

use super::loader::{LexiconError, Result};
use super::models::CharacterRecord;

/// Maps a record to its counterpart in another script
pub trait ScriptConverter {
    fn convert_glyph(&self, glyph: &str) -> String;

    fn convert(&self, record: &CharacterRecord) -> CharacterRecord {
        CharacterRecord {
            character: self.convert_glyph(&record.character),
            pronunciation: record.pronunciation.clone(),
            definition: record.definition.clone(),
        }
    }
}

/// Simplified to traditional converter with per-glyph overrides
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    overrides: HashMap<String, String>,
}

impl VariantTable {
    /// Converter using only the bundled conversion tables
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Bundled tables plus a tab-separated `simplified<TAB>traditional` file.
    ///
    /// Entries from the file win over the bundled tables. Blank lines and
    /// lines starting with `#` are ignored.
    pub fn with_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LexiconError::NotFound(path.to_path_buf()));
        }

        let mut table = Self::builtin();
        let content = fs::read_to_string(path)?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t').map(str::trim);
            match (fields.next(), fields.next()) {
                (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => {
                    table.overrides.insert(s.to_string(), t.to_string());
                }
                _ => log::warn!("Ignoring malformed variant line: {}", line),
            }
        }

        log::info!("Loaded {} variant overrides from {:?}", table.overrides.len(), path);
        Ok(table)
    }
}

impl ScriptConverter for VariantTable {
    fn convert_glyph(&self, glyph: &str) -> String {
        match self.overrides.get(glyph) {
            Some(traditional) => traditional.clone(),
            None => zhconv(glyph, Variant::ZhHant),
        }
    }
}

/// Convert every record, preserving order
pub fn convert_all<C: ScriptConverter + ?Sized>(
    records: &[CharacterRecord],
    converter: &C,
) -> Vec<CharacterRecord> {
    records.iter().map(|r| converter.convert(r)).collect()
}
