//! Structured pronunciation: a bare romanized syllable plus a tone class.
//!
//! Lexicon entries arrive either tone-marked (`hǎo`) or numbered (`hao3`).
//! Both are parsed into the same [`Pronunciation`] so the rest of the drill
//! never has to re-read diacritics out of rendered text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PronunciationError {
    #[error("Empty pronunciation")]
    Empty,

    #[error("Invalid tone number in '{0}'")]
    InvalidTone(String),
}

pub type Result<T> = std::result::Result<T, PronunciationError>;

/// Tone-marked vowels, with the bare vowel and the tone number they carry
const TONE_MARKS: [(char, char, u8); 24] = [
    ('ā', 'a', 1), ('á', 'a', 2), ('ǎ', 'a', 3), ('à', 'a', 4),
    ('ō', 'o', 1), ('ó', 'o', 2), ('ǒ', 'o', 3), ('ò', 'o', 4),
    ('ē', 'e', 1), ('é', 'e', 2), ('ě', 'e', 3), ('è', 'e', 4),
    ('ī', 'i', 1), ('í', 'i', 2), ('ǐ', 'i', 3), ('ì', 'i', 4),
    ('ū', 'u', 1), ('ú', 'u', 2), ('ǔ', 'u', 3), ('ù', 'u', 4),
    ('ǖ', 'ü', 1), ('ǘ', 'ü', 2), ('ǚ', 'ü', 3), ('ǜ', 'ü', 4),
];

const VOWELS: [char; 6] = ['a', 'o', 'e', 'i', 'u', 'ü'];

/// Tone class of a syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Neutral,
    First,
    Second,
    Third,
    Fourth,
}

impl Tone {
    /// Map a tone number to a tone. 0 is the neutral tone.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::Neutral),
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Neutral => 0,
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A single syllable with its tone, independent of how it was written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pronunciation {
    pub syllable: String,
    pub tone: Tone,
}

impl Pronunciation {
    pub fn new(syllable: impl Into<String>, tone: Tone) -> Self {
        Self {
            syllable: syllable.into(),
            tone,
        }
    }

    /// Parse tone-marked (`lǜ`) or numbered (`lv4`, `ma5`) text.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PronunciationError::Empty);
        }

        if let Some(last) = text.chars().last().filter(|c| c.is_ascii_digit()) {
            let stem = &text[..text.len() - 1];
            if stem.is_empty() {
                return Err(PronunciationError::Empty);
            }
            let tone = match last.to_digit(10) {
                Some(5) => Tone::Neutral,
                Some(n) => Tone::from_number(n as u8)
                    .ok_or_else(|| PronunciationError::InvalidTone(text.to_string()))?,
                None => return Err(PronunciationError::InvalidTone(text.to_string())),
            };
            return Ok(Self::new(stem.replace('v', "ü"), tone));
        }

        let mut tone = Tone::Neutral;
        let mut syllable = String::with_capacity(text.len());
        for c in text.chars() {
            match mark_of(c) {
                Some((bare, n)) => {
                    if tone == Tone::Neutral {
                        tone = Tone::from_number(n).unwrap_or(Tone::Neutral);
                    }
                    syllable.push(bare);
                }
                None => syllable.push(c),
            }
        }

        Ok(Self::new(syllable, tone))
    }

    /// Render with a tone mark in the conventional position.
    pub fn marked(&self) -> String {
        let Some(target) = mark_position(&self.syllable) else {
            return self.syllable.clone();
        };
        if self.tone == Tone::Neutral {
            return self.syllable.clone();
        }

        self.syllable
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i == target {
                    apply_mark(c, self.tone).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marked())
    }
}

fn mark_of(c: char) -> Option<(char, u8)> {
    TONE_MARKS
        .iter()
        .find(|(marked, _, _)| *marked == c)
        .map(|&(_, bare, n)| (bare, n))
}

fn apply_mark(bare: char, tone: Tone) -> Option<char> {
    TONE_MARKS
        .iter()
        .find(|(_, b, n)| *b == bare && *n == tone.number())
        .map(|&(marked, _, _)| marked)
}

/// Char index of the vowel that carries the tone mark
fn mark_position(syllable: &str) -> Option<usize> {
    let chars: Vec<char> = syllable.chars().collect();
    if let Some(i) = chars.iter().position(|&c| c == 'a' || c == 'e') {
        return Some(i);
    }
    if let Some(i) = chars.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    chars.iter().rposition(|c| VOWELS.contains(c))
}

/// Tone of tone-marked text: the first marked vowel wins, none means neutral.
pub fn tone_of_marked(text: &str) -> Tone {
    text.chars()
        .find_map(mark_of)
        .and_then(|(_, n)| Tone::from_number(n))
        .unwrap_or(Tone::Neutral)
}

/// Tone-marked text with its final character dropped.
///
/// Only yields the bare syllable when the marked vowel is the last character
/// (`mā` -> `m`); `hǎo` becomes `hǎ`.
pub fn truncated_syllable(text: &str) -> String {
    let mut chars = text.chars();
    chars.next_back();
    chars.as_str().to_string()
}
