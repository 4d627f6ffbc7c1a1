//! Lexicon loading
//!
//! Two layouts are accepted:
//! - `.csv` / `.tsv` with a `character,pronunciation,definition` header
//! - plain text extracted from the printed character list, one entry per
//!   line: `<pinyin> <glyph> <definition words...> <trailing column>`

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::{is_cjk_glyph, CharacterRecord};
use crate::pronunciation::Pronunciation;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Lexicon file not found: {0}")]
    NotFound(PathBuf),

    #[error("No usable character entries in {0}")]
    Empty(PathBuf),
}

pub type Result<T> = std::result::Result<T, LexiconError>;

/// Load a lexicon file, picking the parser from its extension.
///
/// An empty result is an error: a drill must never start without characters.
pub fn load_lexicon(path: &Path) -> Result<Vec<CharacterRecord>> {
    if !path.exists() {
        return Err(LexiconError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let records = match extension.as_deref() {
        Some("csv") => parse_delimited(&content, b',')?,
        Some("tsv") => parse_delimited(&content, b'\t')?,
        _ => parse_text_export(&content),
    };

    if records.is_empty() {
        return Err(LexiconError::Empty(path.to_path_buf()));
    }

    log::info!("Loaded {} characters from {:?}", records.len(), path);
    Ok(records)
}

/// Parse the plain text layout. Lines that don't fit are skipped silently.
pub fn parse_text_export(content: &str) -> Vec<CharacterRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        let pinyin = parts[0];
        let character = parts[1];
        if !is_cjk_glyph(character) || Pronunciation::parse(pinyin).is_err() {
            continue;
        }

        let definition = parts[2..parts.len() - 1].join(" ");
        push_unique(
            &mut records,
            &mut seen,
            CharacterRecord::new(character, pinyin, definition),
        );
    }

    records
}

/// Parse a headed csv/tsv export
pub fn parse_delimited(content: &str, delimiter: u8) -> Result<Vec<CharacterRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for row in reader.deserialize::<CharacterRecord>() {
        let record = row?;
        if !is_cjk_glyph(&record.character) {
            log::warn!("Skipping non-ideograph entry '{}'", record.character);
            continue;
        }
        if let Err(e) = Pronunciation::parse(&record.pronunciation) {
            log::warn!("Skipping '{}': {}", record.character, e);
            continue;
        }
        push_unique(&mut records, &mut seen, record);
    }

    Ok(records)
}

fn push_unique(
    records: &mut Vec<CharacterRecord>,
    seen: &mut HashSet<String>,
    record: CharacterRecord,
) {
    if seen.insert(record.character.clone()) {
        records.push(record);
    } else {
        log::debug!("Duplicate entry for '{}' ignored", record.character);
    }
}
